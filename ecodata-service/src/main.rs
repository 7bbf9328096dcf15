//! ecodata Service - HTTP microservice for species occurrence and CO2 data.
//!
//! Forwards queries to the GBIF occurrence search API and the Our World in
//! Data CO2 dataset, and answers with simplified JSON.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PORT` | HTTP server port | 3000 |
//! | `ECODATA_OCCURRENCE_URL` | Occurrence search endpoint | GBIF v1 search |
//! | `ECODATA_CO2_URL` | CO2 dataset CSV location | OWID master CSV |
//! | `ECODATA_TIMEOUT_SECS` | Outbound request timeout | 60 |
//! | `RUST_LOG` | Log filter (e.g., "info", "debug") | "ecodata_service=info,ecodata=info,tower_http=info" |
//!
//! ## Endpoints
//!
//! - `GET /api/ocorrencias` - Occurrences of the fixed species list
//! - `GET /api/ocorrencias/custom?scientificName=X&country=Y&limit=N` - Custom search
//! - `GET /api/co2` - Latest CO2 emissions for Brazil and the World
//! - `GET /health` - Health check
//! - `GET /api-docs/openapi.json` - OpenAPI document

use std::net::SocketAddr;
use std::sync::Arc;

use ecodata_service::config::DEFAULT_LOG_FILTER;
use ecodata_service::{router, AppState, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();
    let client = config.client.build()?;

    tracing::info!(
        occurrence_url = client.occurrence_url(),
        co2_url = client.co2_url(),
        port = config.port,
        "Starting ecodata service"
    );

    let app = router(Arc::new(AppState { client }));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
