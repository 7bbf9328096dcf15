//! Service configuration, read once at startup.

use ecodata::EcoClientBuilder;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "ecodata_service=info,ecodata=info,tower_http=info";

/// Startup configuration for the service binary.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Upstream client settings.
    pub client: EcoClientBuilder,
}

impl ServiceConfig {
    /// Read configuration from the environment.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PORT` | HTTP server port | 3000 |
    /// | `ECODATA_*` | Upstream settings, see [`EcoClientBuilder::from_env`] | |
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok().as_deref()),
            client: EcoClientBuilder::from_env(),
        }
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(value = v, "Invalid PORT value, using default {}", DEFAULT_PORT);
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}
