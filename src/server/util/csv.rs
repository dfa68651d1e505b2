//! Minimal CSV reader for member imports.
//!
//! Supports quoted fields with `""` escapes and embedded commas or newlines. The first row is
//! the header; header names are trimmed, lowercased and have spaces replaced by `_`.

use std::collections::HashMap;

#[derive(Debug, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl CsvTable {
    /// Required headers absent from the file, in the order given
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .copied()
            .collect()
    }
}

pub fn parse_csv(text: &str) -> CsvTable {
    let mut records = split_records(text.trim_start_matches('\u{feff}')).into_iter();

    let Some(header_row) = records.next() else {
        return CsvTable::default();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|h| h.trim().to_lowercase().replace(' ', "_"))
        .collect();

    let rows = records
        .map(|record| {
            headers
                .iter()
                .cloned()
                .zip(record.into_iter().chain(std::iter::repeat(String::new())))
                .map(|(h, v)| (h, v.trim().to_string()))
                .collect()
        })
        .collect();

    CsvTable { headers, rows }
}

fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => record.push(std::mem::take(&mut field)),
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            c => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    records
}

/// Blank lines are skipped
fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    if record.iter().any(|f| !f.trim().is_empty()) {
        records.push(record);
    }
}
