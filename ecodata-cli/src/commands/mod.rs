pub mod co2;
pub mod occurrences;
pub mod search;

use anyhow::{Context, Result};
use ecodata::{EcoClient, EcoClientBuilder};

/// Upstream settings shared by every subcommand.
pub struct Upstream {
    pub occurrence_url: Option<String>,
    pub co2_url: Option<String>,
    pub timeout_secs: u64,
}

impl Upstream {
    /// Build a client, keeping the library defaults for unset locations.
    pub fn client(&self) -> Result<EcoClient> {
        let mut builder = EcoClientBuilder::new().timeout_secs(self.timeout_secs);

        if let Some(url) = &self.occurrence_url {
            builder = builder.occurrence_url(url);
        }
        if let Some(url) = &self.co2_url {
            builder = builder.co2_url(url);
        }

        builder.build().context("Failed to create HTTP client")
    }
}
