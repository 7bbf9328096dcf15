//! OpenAPI document for the service.

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;

/// OpenAPI documentation for the ecodata service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ecodata Service",
        description = "Simplified access to species occurrence records and CO2 emissions statistics.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_occurrences,
        handlers::get_custom_occurrences,
        handlers::get_co2,
        handlers::health_check,
    ),
    components(
        schemas(
            ecodata::OccurrenceRecord,
            ecodata::CustomOccurrenceRecord,
            ecodata::EmissionsSummary,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "occurrences", description = "Species occurrence endpoints"),
        (name = "emissions", description = "CO2 emissions endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
