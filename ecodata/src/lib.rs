//! # ecodata - species occurrence and CO2 emissions data
//!
//! Thin translation layer over two public data sources:
//!
//! - the [GBIF](https://www.gbif.org/) occurrence search API
//! - the [Our World in Data](https://github.com/owid/co2-data) CO2 dataset (CSV)
//!
//! Upstream responses are reshaped into small, stable record types that the
//! HTTP service and the CLI serialize as JSON.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ecodata::{EcoClientBuilder, FIXED_SPECIES};
//!
//! let client = EcoClientBuilder::from_env().build()?;
//!
//! // Five Brazilian records per species, missing fields replaced by placeholders
//! let records = client.fixed_species_occurrences(FIXED_SPECIES).await;
//!
//! // Latest-year CO2 figures for Brazil and the World
//! let summary = client.emissions_summary().await?;
//! ```

pub mod client;
pub mod csv_table;
pub mod emissions;
pub mod error;
pub mod occurrence;
pub mod species;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use client::{EcoClient, EcoClientBuilder};
pub use csv_table::{CsvRow, CsvTable};
pub use emissions::{summarize_csv, summarize_emissions, summarize_file, EmissionsSummary};
pub use error::{EcoError, Result};
pub use occurrence::{
    CustomOccurrenceRecord, GbifOccurrence, OccurrenceRecord, OccurrenceSearch,
    DEFAULT_CUSTOM_LIMIT,
};
pub use species::{SpeciesQuery, FIXED_SPECIES};
