//! ecodata Service Library
//!
//! HTTP handlers, router and configuration for the occurrence and emissions
//! service. This library is used by both the ecodata-service binary and
//! integration tests.

pub mod config;
pub mod handlers;
pub mod openapi;

use std::sync::Arc;

use axum::{routing::get, Router};
use ecodata::EcoClient;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers.
pub struct AppState {
    /// Client for the upstream data sources.
    pub client: EcoClient,
}

/// Build the application router with tracing and a permissive CORS policy.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ocorrencias", get(handlers::get_occurrences))
        .route(
            "/api/ocorrencias/custom",
            get(handlers::get_custom_occurrences),
        )
        .route("/api/co2", get(handlers::get_co2))
        .route("/health", get(handlers::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use config::ServiceConfig;
pub use handlers::{CustomSearchQuery, ErrorResponse, HealthResponse};
