//! HTTP client for the upstream data sources.
//!
//! [`EcoClient`] owns a pooled [`reqwest::Client`] and the two upstream
//! locations. It is cheap to clone and safe to share between tasks.

use std::time::Duration;

use futures_util::future::join_all;
use reqwest::Response;

use crate::emissions::{summarize_csv, EmissionsSummary};
use crate::error::{EcoError, Result};
use crate::occurrence::{
    CustomOccurrenceRecord, GbifOccurrence, GbifSearchResponse, OccurrenceRecord,
    OccurrenceSearch,
};
use crate::species::{SpeciesQuery, FIXED_SPECIES_COUNTRY, FIXED_SPECIES_LIMIT};

/// Default occurrence search endpoint.
pub const DEFAULT_OCCURRENCE_URL: &str = "https://api.gbif.org/v1/occurrence/search";

/// Default location of the CO2 dataset.
pub const DEFAULT_CO2_URL: &str =
    "https://raw.githubusercontent.com/owid/co2-data/master/owid-co2-data.csv";

/// Default timeout for outbound requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for the occurrence search API and the CO2 dataset.
#[derive(Debug, Clone)]
pub struct EcoClient {
    http: reqwest::Client,
    occurrence_url: String,
    co2_url: String,
}

impl EcoClient {
    /// Create a builder with default upstream locations.
    pub fn builder() -> EcoClientBuilder {
        EcoClientBuilder::new()
    }

    /// Occurrence search endpoint in use.
    pub fn occurrence_url(&self) -> &str {
        &self.occurrence_url
    }

    /// CO2 dataset location in use.
    pub fn co2_url(&self) -> &str {
        &self.co2_url
    }

    /// Run one occurrence search and return the raw result items.
    ///
    /// # Errors
    ///
    /// - [`EcoError::Http`] on transport failure
    /// - [`EcoError::Status`] if upstream answers with a non-success status
    /// - [`EcoError::Decode`] if the body is not a search response
    pub async fn search_occurrences(&self, search: &OccurrenceSearch) -> Result<Vec<GbifOccurrence>> {
        tracing::debug!(
            scientific_name = %search.scientific_name,
            country = %search.country,
            limit = search.limit,
            has_coordinate = search.has_coordinate,
            "Occurrence search"
        );

        let response = self
            .http
            .get(&self.occurrence_url)
            .query(&search.query_pairs())
            .send()
            .await?;
        let response = check_status(response, &self.occurrence_url)?;

        let body = response.bytes().await?;
        let parsed: GbifSearchResponse =
            serde_json::from_slice(&body).map_err(|e| EcoError::Decode {
                url: self.occurrence_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(parsed.results)
    }

    /// Look up every species in `species`, restricted to Brazil and five
    /// results each, and flatten the results.
    ///
    /// Lookups run concurrently. Output keeps the order of `species`, then the
    /// upstream order within each species. A failed lookup is logged and
    /// contributes no records.
    pub async fn fixed_species_occurrences(&self, species: &[SpeciesQuery]) -> Vec<OccurrenceRecord> {
        let lookups = species.iter().map(|entry| async move {
            let search = OccurrenceSearch::new(entry.scientific_name, FIXED_SPECIES_COUNTRY)
                .with_limit(FIXED_SPECIES_LIMIT);

            match self.search_occurrences(&search).await {
                Ok(items) => items
                    .iter()
                    .map(|item| OccurrenceRecord::from_gbif(entry, item))
                    .collect::<Vec<_>>(),
                Err(e) => {
                    tracing::warn!(
                        species = entry.common_name,
                        error = %e,
                        "Occurrence lookup failed, skipping species"
                    );
                    Vec::new()
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Search occurrences that carry coordinates and map them to
    /// [`CustomOccurrenceRecord`]s.
    pub async fn custom_occurrences(
        &self,
        search: &OccurrenceSearch,
    ) -> Result<Vec<CustomOccurrenceRecord>> {
        let search = search.clone().with_coordinates_only();
        let items = self.search_occurrences(&search).await?;
        Ok(items.into_iter().map(CustomOccurrenceRecord::from).collect())
    }

    /// Download the CO2 dataset as text.
    ///
    /// The body is read chunk by chunk until the transfer completes. Bytes
    /// that are not valid UTF-8 become U+FFFD.
    pub async fn fetch_emissions_csv(&self) -> Result<String> {
        let response = self.http.get(&self.co2_url).send().await?;
        let mut response = check_status(response, &self.co2_url)?;

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url = %self.co2_url, bytes = body.len(), "Downloaded emissions dataset");

        // Invalid UTF-8 is replaced, not rejected
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Download the CO2 dataset and summarize it.
    pub async fn emissions_summary(&self) -> Result<Vec<EmissionsSummary>> {
        let text = self.fetch_emissions_csv().await?;
        summarize_csv(&text)
    }
}

fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(EcoError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Builder for [`EcoClient`].
///
/// # Example
///
/// ```ignore
/// use ecodata::EcoClientBuilder;
///
/// let client = EcoClientBuilder::new()
///     .occurrence_url("http://localhost:9000/v1/occurrence/search")
///     .timeout_secs(10)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct EcoClientBuilder {
    occurrence_url: String,
    co2_url: String,
    timeout_secs: u64,
}

impl Default for EcoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EcoClientBuilder {
    /// Create a builder pointing at the public upstreams.
    pub fn new() -> Self {
        Self {
            occurrence_url: DEFAULT_OCCURRENCE_URL.to_string(),
            co2_url: DEFAULT_CO2_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ECODATA_OCCURRENCE_URL` | Occurrence search endpoint | GBIF v1 search |
    /// | `ECODATA_CO2_URL` | CO2 dataset CSV location | OWID master CSV |
    /// | `ECODATA_TIMEOUT_SECS` | Outbound request timeout | 60 |
    ///
    /// Unset variables and unparseable timeouts keep the default.
    pub fn from_env() -> Self {
        let mut builder = Self::new();

        if let Ok(url) = std::env::var("ECODATA_OCCURRENCE_URL") {
            builder.occurrence_url = url;
        }
        if let Ok(url) = std::env::var("ECODATA_CO2_URL") {
            builder.co2_url = url;
        }
        if let Some(secs) = std::env::var("ECODATA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder.timeout_secs = secs;
        }

        builder
    }

    /// Set the occurrence search endpoint.
    pub fn occurrence_url(mut self, url: impl Into<String>) -> Self {
        self.occurrence_url = url.into();
        self
    }

    /// Set the CO2 dataset location.
    pub fn co2_url(mut self, url: impl Into<String>) -> Self {
        self.co2_url = url.into();
        self
    }

    /// Set the outbound request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the [`EcoClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created (e.g. TLS
    /// backend initialization failure).
    pub fn build(self) -> Result<EcoClient> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(concat!("ecodata/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(EcoClient {
            http,
            occurrence_url: self.occurrence_url,
            co2_url: self.co2_url,
        })
    }
}
