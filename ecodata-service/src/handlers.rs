//! HTTP request handlers for the occurrence and emissions service.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ecodata::{
    CustomOccurrenceRecord, EmissionsSummary, OccurrenceRecord, OccurrenceSearch,
    DEFAULT_CUSTOM_LIMIT, FIXED_SPECIES,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Message returned when a required custom-search parameter is missing.
pub const MISSING_PARAMS_MESSAGE: &str = "Required parameters: scientificName and country.";

/// Message returned when `limit` is not a non-negative integer.
pub const INVALID_LIMIT_MESSAGE: &str = "Parameter limit must be a non-negative integer.";

/// Message returned when the occurrence API cannot be reached.
pub const OCCURRENCE_API_ERROR: &str = "Error accessing occurrence API";

/// Message returned when the CO2 dataset cannot be loaded.
pub const CO2_LOAD_ERROR: &str = "Error loading CO2 data";

/// Query parameters for the custom occurrence search.
///
/// Every field is optional at the extractor level so that missing values get
/// a JSON error body instead of the default rejection. The handler reads the
/// raw pairs through [`CustomSearchQuery::from_pairs`]; the derives describe
/// the parameters for the OpenAPI document.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomSearchQuery {
    /// Scientific name of the species (required).
    pub scientific_name: Option<String>,
    /// Two-letter country code (required).
    pub country: Option<String>,
    /// Maximum number of records (default 10).
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
}

impl CustomSearchQuery {
    /// Collect the known parameters from raw query pairs.
    ///
    /// A repeated key keeps its first value. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self {
            scientific_name: None,
            country: None,
            limit: None,
        };

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "scientificName" => &mut query.scientific_name,
                "country" => &mut query.country,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        query
    }

    /// Turn the raw parameters into an upstream search, or the 400 message.
    fn to_search(&self) -> Result<OccurrenceSearch, &'static str> {
        let (Some(scientific_name), Some(country)) = (
            non_empty(self.scientific_name.as_deref()),
            non_empty(self.country.as_deref()),
        ) else {
            return Err(MISSING_PARAMS_MESSAGE);
        };

        let limit = match non_empty(self.limit.as_deref()) {
            Some(raw) => raw.trim().parse().map_err(|_| INVALID_LIMIT_MESSAGE)?,
            None => DEFAULT_CUSTOM_LIMIT,
        };

        Ok(OccurrenceSearch::new(scientific_name, country).with_limit(limit))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Recent occurrences of the fixed threatened-species list in Brazil.
///
/// Upstream failures for a species are logged and that species is left out;
/// this endpoint always answers 200.
#[utoipa::path(
    get,
    path = "/api/ocorrencias",
    tag = "occurrences",
    responses(
        (status = 200, description = "Occurrences in species-list order", body = Vec<OccurrenceRecord>)
    )
)]
pub async fn get_occurrences(State(state): State<Arc<AppState>>) -> Json<Vec<OccurrenceRecord>> {
    let records = state.client.fixed_species_occurrences(FIXED_SPECIES).await;

    tracing::info!(records = records.len(), "Fixed species occurrences");

    Json(records)
}

/// Search occurrences with coordinates for a species in a country.
///
/// # Query Parameters
///
/// - `scientificName`: species to search for (required)
/// - `country`: two-letter country code (required)
/// - `limit`: maximum number of records (default 10)
///
/// # Returns
///
/// - `200 OK` with the (possibly empty) list of occurrences
/// - `400 Bad Request` if a required parameter is missing or `limit` is invalid
/// - `500 Internal Server Error` if the occurrence API fails
#[utoipa::path(
    get,
    path = "/api/ocorrencias/custom",
    tag = "occurrences",
    params(CustomSearchQuery),
    responses(
        (status = 200, description = "Matching occurrences", body = Vec<CustomOccurrenceRecord>),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 500, description = "Occurrence API failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_custom_occurrences(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match pairs {
        Ok(Query(pairs)) => CustomSearchQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed custom occurrence query");
            return error_response(StatusCode::BAD_REQUEST, MISSING_PARAMS_MESSAGE);
        }
    };

    let search = match query.to_search() {
        Ok(search) => search,
        Err(message) => {
            tracing::debug!(?query, reason = message, "Rejected custom occurrence query");
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    match state.client.custom_occurrences(&search).await {
        Ok(records) => {
            tracing::info!(
                scientific_name = %search.scientific_name,
                country = %search.country,
                limit = search.limit,
                records = records.len(),
                "Custom occurrence search"
            );
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            tracing::error!(
                scientific_name = %search.scientific_name,
                country = %search.country,
                error = %e,
                "Custom occurrence search failed"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, OCCURRENCE_API_ERROR)
        }
    }
}

/// Latest-year CO2 emissions for Brazil and the World.
#[utoipa::path(
    get,
    path = "/api/co2",
    tag = "emissions",
    responses(
        (status = 200, description = "One entry per country at the latest year", body = Vec<EmissionsSummary>),
        (status = 500, description = "Dataset could not be loaded", body = ErrorResponse)
    )
)]
pub async fn get_co2(State(state): State<Arc<AppState>>) -> Response {
    match state.client.emissions_summary().await {
        Ok(summary) => {
            tracing::info!(entries = summary.len(), "CO2 summary");
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => {
            tracing::error!(url = state.client.co2_url(), error = %e, "Failed to load CO2 data");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, CO2_LOAD_ERROR)
        }
    }
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
