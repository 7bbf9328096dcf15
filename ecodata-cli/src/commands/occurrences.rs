use anyhow::Result;
use ecodata::FIXED_SPECIES;
use indicatif::ProgressBar;
use std::time::Duration;

use super::Upstream;

pub async fn run(upstream: &Upstream, json: bool) -> Result<()> {
    let client = upstream.client()?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Querying {} species...", FIXED_SPECIES.len()));

    let records = client.fixed_species_occurrences(FIXED_SPECIES).await;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No occurrences found");
        return Ok(());
    }

    println!("{:<20} {:<28} {}", "SPECIES", "LOCATION", "DATE");
    println!("{}", "-".repeat(72));
    for record in &records {
        println!(
            "{:<20} {:<28} {}",
            record.species, record.location, record.date
        );
    }
    println!("{}", "-".repeat(72));
    println!("Total: {} occurrences", records.len());

    Ok(())
}
