use anyhow::{Context, Result};
use ecodata::{summarize_csv, summarize_file, EmissionsSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use super::Upstream;

pub async fn run(upstream: &Upstream, file: Option<PathBuf>, json: bool) -> Result<()> {
    let summary = match file {
        Some(path) => summarize_file(&path)
            .with_context(|| format!("Failed to read CO2 dataset: {}", path.display()))?,
        None => download_summary(upstream).await?,
    };

    if json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    print_table(&summary);
    Ok(())
}

async fn download_summary(upstream: &Upstream) -> Result<Vec<EmissionsSummary>> {
    let client = upstream.client()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Downloading {}", client.co2_url()));

    let text = client.fetch_emissions_csv().await;
    spinner.finish_and_clear();

    let text = text.context("Failed to download CO2 dataset")?;
    summarize_csv(&text).context("Failed to parse CO2 dataset")
}

fn print_table(summary: &[EmissionsSummary]) {
    if summary.is_empty() {
        println!("No emissions data for the tracked countries");
        return;
    }

    println!(
        "{:<10} {:>6} {:>14} {:>16}",
        "COUNTRY", "YEAR", "CO2 (Mt)", "PER CAPITA (t)"
    );
    println!("{}", "-".repeat(49));
    for entry in summary {
        println!(
            "{:<10} {:>6} {:>14} {:>16}",
            entry.country, entry.year, entry.co2, entry.co2_per_capita
        );
    }
}
