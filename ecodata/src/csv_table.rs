//! Header-keyed CSV parsing.
//!
//! The first record names the columns; every following record is exposed as a
//! [`CsvRow`] that can be looked up by column name. Empty lines are skipped,
//! ragged rows are tolerated (a missing trailing cell reads as `None`) and the
//! delimiter is detected from the header line.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};

use crate::error::Result;

/// Delimiters considered by [`detect_delimiter`], in order of preference.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// A parsed CSV document.
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: StringRecord,
    columns: HashMap<String, usize>,
    records: Vec<StringRecord>,
}

/// A single data row, borrowed from its [`CsvTable`].
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a StringRecord,
}

impl CsvTable {
    /// Parse CSV text, treating the first non-empty line as the header.
    ///
    /// # Errors
    ///
    /// Returns [`EcoError::Csv`](crate::EcoError::Csv) if the text is not valid
    /// CSV (e.g. invalid UTF-8 inside a field).
    pub fn parse(text: &str) -> Result<Self> {
        let delimiter = detect_delimiter(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();

        let mut columns = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            // First occurrence wins on duplicate column names
            columns.entry(name.to_string()).or_insert(idx);
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            if is_blank(&record) {
                continue;
            }
            records.push(record);
        }

        tracing::debug!(
            columns = headers.len(),
            rows = records.len(),
            delimiter = %(delimiter as char).escape_default(),
            "Parsed CSV table"
        );

        Ok(Self {
            headers,
            columns,
            records,
        })
    }

    /// Column names, in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.records.iter().map(|record| CsvRow {
            columns: &self.columns,
            record,
        })
    }
}

impl<'a> CsvRow<'a> {
    /// Value of `column`, or `None` if the column does not exist or the row
    /// is too short to contain it.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.columns.get(column)?;
        self.record.get(idx)
    }

    /// Like [`get`](Self::get) but also treats an empty cell as absent.
    pub fn get_non_empty(&self, column: &str) -> Option<&'a str> {
        self.get(column).filter(|value| !value.is_empty())
    }
}

/// Pick the delimiter that occurs most often, outside quotes, in the first
/// non-empty line. Falls back to a comma.
pub fn detect_delimiter(text: &str) -> u8 {
    let Some(header) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };

    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in header.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(pos) = CANDIDATE_DELIMITERS.iter().position(|&d| d == byte) {
            counts[pos] += 1;
        }
    }

    // Ties keep the earlier (more common) candidate
    let mut best = 0;
    for (pos, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = pos;
        }
    }

    if counts[best] == 0 {
        b','
    } else {
        CANDIDATE_DELIMITERS[best]
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}
