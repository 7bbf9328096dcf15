//! CO2 emissions summary from the Our World in Data dataset.
//!
//! The dataset is one wide CSV with a row per country and year. The summary
//! keeps the tracked countries, finds the most recent year for which both
//! total and per-capita emissions are reported, and formats those values with
//! two decimals.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::csv_table::{CsvRow, CsvTable};
use crate::error::Result;

/// Countries (dataset "country" values) included in the summary.
pub const TRACKED_COUNTRIES: [&str; 2] = ["Brazil", "World"];

/// Latest-year emissions for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EmissionsSummary {
    pub country: String,
    pub year: i64,
    /// Annual CO2 emissions in million tonnes, two decimals.
    pub co2: String,
    /// Annual CO2 emissions per capita in tonnes, two decimals.
    pub co2_per_capita: String,
}

/// A dataset row that passed the country and value filter.
struct EmissionsRow<'a> {
    country: &'a str,
    year: i64,
    co2: f64,
    co2_per_capita: f64,
}

impl<'a> EmissionsRow<'a> {
    fn from_csv(row: CsvRow<'a>) -> Option<Self> {
        let country = row.get("country")?;
        if !TRACKED_COUNTRIES.contains(&country) {
            return None;
        }

        let co2 = row.get_non_empty("co2")?.trim().parse().ok()?;
        let co2_per_capita = row.get_non_empty("co2_per_capita")?.trim().parse().ok()?;
        let year = parse_year(row.get("year")?)?;

        Some(Self {
            country,
            year,
            co2,
            co2_per_capita,
        })
    }
}

/// Summarize a parsed dataset.
///
/// Returns one entry per tracked country row at the latest year present among
/// the filtered rows, in file order. Returns an empty list when no row passes
/// the filter.
pub fn summarize_emissions(table: &CsvTable) -> Vec<EmissionsSummary> {
    let filtered: Vec<EmissionsRow<'_>> = table.rows().filter_map(EmissionsRow::from_csv).collect();

    let Some(latest_year) = filtered.iter().map(|row| row.year).max() else {
        tracing::warn!(rows = table.len(), "No emissions rows matched the country filter");
        return Vec::new();
    };

    tracing::debug!(
        rows = table.len(),
        matched = filtered.len(),
        latest_year,
        "Summarized emissions dataset"
    );

    filtered
        .into_iter()
        .filter(|row| row.year == latest_year)
        .map(|row| EmissionsSummary {
            country: row.country.to_string(),
            year: latest_year,
            co2: to_fixed_2(row.co2),
            co2_per_capita: to_fixed_2(row.co2_per_capita),
        })
        .collect()
}

/// Parse CSV text and summarize it.
pub fn summarize_csv(text: &str) -> Result<Vec<EmissionsSummary>> {
    let table = CsvTable::parse(text)?;
    Ok(summarize_emissions(&table))
}

/// Read a local copy of the dataset and summarize it.
pub fn summarize_file<P: AsRef<Path>>(path: P) -> Result<Vec<EmissionsSummary>> {
    let text = std::fs::read_to_string(path)?;
    summarize_csv(&text)
}

/// Format with exactly two decimals, rounding exact ties away from zero.
///
/// `{:.2}` rounds exact binary ties (odd multiples of 1/8, e.g. 2.125) to
/// even; published figures expect 2.125 to read "2.13".
fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        // value * 100 is exactly k + 0.5 here, and round() goes away from zero
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{:.2}", value)
}

/// Integer prefix of a year cell (`"2022"`, `" 2022"`, `"2022.0"` all give
/// 2022). Cells without leading digits are rejected.
fn parse_year(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first()? {
        b'-' => (-1, &value[1..]),
        b'+' => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|year| sign * year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
country,year,iso_code,population,co2,co2_per_capita
Argentina,2022,ARG,45510324,187.5,4.12
Brazil,2020,BRA,213196304,467.4,2.19
Brazil,2021,BRA,214326223,497.3,2.32
Brazil,2022,BRA,215313504,481.2,2.236
World,2021,,7954448391,37123.9,4.67
World,2022,,8021407128,37149.8,4.63
World,2023,,8091734930,,
";

    #[test]
    fn test_latest_year_per_country() {
        let summary = summarize_csv(SAMPLE).unwrap();

        // World 2023 has no co2 values so 2022 is the latest complete year
        assert_eq!(
            summary,
            vec![
                EmissionsSummary {
                    country: "Brazil".to_string(),
                    year: 2022,
                    co2: "481.20".to_string(),
                    co2_per_capita: "2.24".to_string(),
                },
                EmissionsSummary {
                    country: "World".to_string(),
                    year: 2022,
                    co2: "37149.80".to_string(),
                    co2_per_capita: "4.63".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_two_decimal_formatting() {
        let csv = "country,year,co2,co2_per_capita\nBrazil,2019,123.4,2\n";
        let summary = summarize_csv(csv).unwrap();
        assert_eq!(summary[0].co2, "123.40");
        assert_eq!(summary[0].co2_per_capita, "2.00");
    }

    #[test]
    fn test_to_fixed_2_ties_round_away_from_zero() {
        assert_eq!(to_fixed_2(2.125), "2.13");
        assert_eq!(to_fixed_2(0.625), "0.63");
        assert_eq!(to_fixed_2(0.375), "0.38");
        assert_eq!(to_fixed_2(-2.125), "-2.13");
        // Not exact ties
        assert_eq!(to_fixed_2(2.25), "2.25");
        assert_eq!(to_fixed_2(1.005), "1.00");
        assert_eq!(to_fixed_2(481.2), "481.20");
    }

    #[test]
    fn test_summary_rounds_ties_up() {
        let csv = "country,year,co2,co2_per_capita\nBrazil,2022,2.125,0.375\n";
        let summary = summarize_csv(csv).unwrap();
        assert_eq!(summary[0].co2, "2.13");
        assert_eq!(summary[0].co2_per_capita, "0.38");
    }

    #[test]
    fn test_only_latest_year_countries_are_kept() {
        // Brazil has no row for the latest year shared by World
        let csv = "country,year,co2,co2_per_capita\nBrazil,2020,1,1\nWorld,2021,2,2\n";
        let summary = summarize_csv(csv).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].country, "World");
        assert_eq!(summary[0].year, 2021);
    }

    #[test]
    fn test_empty_filter_result() {
        let csv = "country,year,co2,co2_per_capita\nChile,2022,1,1\nBrazil,2022,,\n";
        assert!(summarize_csv(csv).unwrap().is_empty());
    }

    #[test]
    fn test_country_match_is_exact() {
        let csv = "country,year,co2,co2_per_capita\nbrazil,2022,1,1\nWorld ,2022,1,1\n";
        assert!(summarize_csv(csv).unwrap().is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let summary = EmissionsSummary {
            country: "Brazil".to_string(),
            year: 2022,
            co2: "481.20".to_string(),
            co2_per_capita: "2.24".to_string(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"country":"Brazil","year":2022,"co2":"481.20","co2PerCapita":"2.24"}"#
        );
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2022"), Some(2022));
        assert_eq!(parse_year(" 2022"), Some(2022));
        assert_eq!(parse_year("2022.0"), Some(2022));
        assert_eq!(parse_year("-50"), Some(-50));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("n/a"), None);
    }

    #[test]
    fn test_summarize_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let summary = summarize_file(file.path()).unwrap();
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_summarize_missing_file() {
        let result = summarize_file("/nonexistent/owid-co2-data.csv");
        assert!(matches!(result, Err(crate::EcoError::Io(_))));
    }
}
