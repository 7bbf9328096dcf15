use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Species occurrence and CO2 emissions data CLI tool
#[derive(Parser)]
#[command(name = "ecodata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Occurrence search endpoint
    #[arg(long, env = "ECODATA_OCCURRENCE_URL", global = true)]
    occurrence_url: Option<String>,

    /// CO2 dataset CSV location
    #[arg(long, env = "ECODATA_CO2_URL", global = true)]
    co2_url: Option<String>,

    /// Timeout for upstream requests, in seconds
    #[arg(
        short,
        long,
        env = "ECODATA_TIMEOUT_SECS",
        default_value = "60",
        global = true
    )]
    timeout: u64,

    /// Output results as JSON
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recent occurrences of the fixed threatened-species list in Brazil
    Occurrences,

    /// Search occurrences with coordinates for a species in a country
    Search {
        /// Scientific name of the species (e.g. "Panthera onca")
        #[arg(short, long)]
        scientific_name: String,

        /// Two-letter country code (e.g. BR)
        #[arg(short, long)]
        country: String,

        /// Maximum number of records
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Output results as a GeoJSON FeatureCollection (takes precedence over --json)
        #[arg(short, long)]
        geojson: bool,
    },

    /// Latest CO2 emissions for Brazil and the World
    Co2 {
        /// Read a local copy of the dataset instead of downloading it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let upstream = commands::Upstream {
        occurrence_url: cli.occurrence_url,
        co2_url: cli.co2_url,
        timeout_secs: cli.timeout,
    };

    match cli.command {
        Commands::Occurrences => commands::occurrences::run(&upstream, cli.json).await,
        Commands::Search {
            scientific_name,
            country,
            limit,
            geojson,
        } => {
            let format = if geojson {
                commands::search::Format::GeoJson
            } else if cli.json {
                commands::search::Format::Json
            } else {
                commands::search::Format::Text
            };
            commands::search::run(&upstream, scientific_name, country, limit, format).await
        }
        Commands::Co2 { file } => commands::co2::run(&upstream, file, cli.json).await,
    }
}
