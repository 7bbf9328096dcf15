//! Occurrence search types and the reshaping of upstream results.
//!
//! The upstream search API returns large, loosely-populated records. Only a
//! handful of fields are read ([`GbifOccurrence`]) and they are mapped into one
//! of two output shapes:
//!
//! - [`OccurrenceRecord`] for the fixed species list, with placeholders for
//!   missing location and date
//! - [`CustomOccurrenceRecord`] for ad-hoc searches, passed through verbatim
//!   except for the species name

use serde::{Deserialize, Serialize};

use crate::species::SpeciesQuery;

/// Placeholder used when an occurrence has no administrative region.
pub const LOCATION_PLACEHOLDER: &str = "Location not provided";

/// Placeholder used when an occurrence has no event date.
pub const DATE_PLACEHOLDER: &str = "Date not provided";

/// Placeholder used when a custom-search occurrence has no species name.
pub const SPECIES_PLACEHOLDER: &str = "Unknown";

/// Result cap for custom searches when the caller gives none.
pub const DEFAULT_CUSTOM_LIMIT: u32 = 10;

/// Parameters of one upstream occurrence search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceSearch {
    pub scientific_name: String,
    pub country: String,
    /// Only return records carrying coordinates. Sent upstream only when set.
    pub has_coordinate: bool,
    pub limit: u32,
}

impl OccurrenceSearch {
    pub fn new(scientific_name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            country: country.into(),
            has_coordinate: false,
            limit: DEFAULT_CUSTOM_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_coordinates_only(mut self) -> Self {
        self.has_coordinate = true;
        self
    }

    /// Query string pairs in the upstream API's parameter names.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("scientificName", self.scientific_name.clone()),
            ("country", self.country.clone()),
        ];
        if self.has_coordinate {
            pairs.push(("hasCoordinate", "true".to_string()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Envelope of an upstream search response.
#[derive(Debug, Clone, Deserialize)]
pub struct GbifSearchResponse {
    pub results: Vec<GbifOccurrence>,
}

/// The fields of an upstream occurrence that are read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GbifOccurrence {
    pub species: Option<String>,
    pub state_province: Option<String>,
    pub event_date: Option<String>,
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
    pub dataset_name: Option<String>,
}

/// Simplified occurrence for one of the fixed species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OccurrenceRecord {
    /// Common name of the species.
    pub species: String,
    /// State or province of the observation.
    pub location: String,
    /// Event date as reported upstream.
    pub date: String,
}

impl OccurrenceRecord {
    pub fn from_gbif(species: &SpeciesQuery, item: &GbifOccurrence) -> Self {
        Self {
            species: species.common_name.to_string(),
            location: non_empty_or(item.state_province.as_deref(), LOCATION_PLACEHOLDER),
            date: non_empty_or(item.event_date.as_deref(), DATE_PLACEHOLDER),
        }
    }
}

/// Occurrence returned by a custom search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CustomOccurrenceRecord {
    /// Species name, or "Unknown".
    pub species: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: Option<String>,
    /// Name of the dataset that published the record.
    pub source: Option<String>,
}

impl From<GbifOccurrence> for CustomOccurrenceRecord {
    fn from(item: GbifOccurrence) -> Self {
        Self {
            species: non_empty_or(item.species.as_deref(), SPECIES_PLACEHOLDER),
            latitude: item.decimal_latitude,
            longitude: item.decimal_longitude,
            date: item.event_date,
            source: item.dataset_name,
        }
    }
}

fn non_empty_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}
