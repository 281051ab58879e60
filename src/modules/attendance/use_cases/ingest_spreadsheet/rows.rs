use crate::modules::attendance::core::record::{AttendanceRecord, Cell};
use crate::modules::attendance::use_cases::ingest_spreadsheet::header::HeaderLayout;
use std::collections::BTreeMap;

/// Builds a record from one data row, or None when the row must be skipped.
pub fn extract_record(layout: &HeaderLayout, row: &[Cell]) -> Option<AttendanceRecord> {
    if row.iter().all(Cell::is_empty) {
        return None;
    }
    let identifier_cell = row.get(layout.identifier_column)?;
    let percentage_cell = row.get(layout.percentage_column)?;
    if identifier_cell.is_empty() || percentage_cell.is_empty() {
        return None;
    }

    let subject_breakdown: BTreeMap<String, String> = layout
        .subject_columns
        .iter()
        .filter_map(|(index, name)| {
            let value = row.get(*index)?.as_text();
            (!value.is_empty()).then(|| (name.clone(), value))
        })
        .collect();

    let record = AttendanceRecord::new(
        identifier_cell.as_text(),
        parse_percentage(percentage_cell),
        subject_breakdown,
    );
    (!record.normalized_identifier.is_empty()).then_some(record)
}

/// Lenient percentage parsing: the leading number of a text cell counts, anything else is 0.
pub fn parse_percentage(cell: &Cell) -> f64 {
    let value = match cell {
        Cell::Number(value) => *value,
        Cell::Text(text) => leading_number(text.trim()).unwrap_or(0.0),
        Cell::Empty | Cell::Bool(_) => 0.0,
    };
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if !text[digits_start..end].bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }
    text[..end].parse().ok()
}
