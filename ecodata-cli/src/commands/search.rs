use anyhow::{Context, Result};
use ecodata::{geojson::occurrences_to_feature_collection, CustomOccurrenceRecord, OccurrenceSearch};

use super::Upstream;

/// How search results are printed.
pub enum Format {
    Text,
    Json,
    GeoJson,
}

pub async fn run(
    upstream: &Upstream,
    scientific_name: String,
    country: String,
    limit: u32,
    format: Format,
) -> Result<()> {
    let client = upstream.client()?;
    let search = OccurrenceSearch::new(scientific_name, country).with_limit(limit);

    let records = client
        .custom_occurrences(&search)
        .await
        .with_context(|| {
            format!(
                "Failed to search occurrences of '{}' in {}",
                search.scientific_name, search.country
            )
        })?;

    match format {
        Format::Json => println!("{}", serde_json::to_string(&records)?),
        Format::GeoJson => {
            let collection = occurrences_to_feature_collection(&records);
            println!("{}", serde_json::to_string(&collection)?);
        }
        Format::Text => print_table(&records),
    }

    Ok(())
}

fn print_table(records: &[CustomOccurrenceRecord]) {
    if records.is_empty() {
        println!("No occurrences found");
        return;
    }

    println!(
        "{:<24} {:>10} {:>11} {:<22} {}",
        "SPECIES", "LAT", "LON", "DATE", "SOURCE"
    );
    println!("{}", "-".repeat(90));
    for record in records {
        println!(
            "{:<24} {:>10} {:>11} {:<22} {}",
            record.species,
            format_coord(record.latitude),
            format_coord(record.longitude),
            record.date.as_deref().unwrap_or("-"),
            record.source.as_deref().unwrap_or("-"),
        );
    }
    println!("{}", "-".repeat(90));
    println!("Total: {} occurrences", records.len());
}

fn format_coord(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| "-".to_string())
}
