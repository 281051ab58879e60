// Shared spreadsheet fixtures: in-memory grids and a reader that serves them.

use crate::modules::attendance::use_cases::ingest_spreadsheet::reader_port::SpreadsheetReader;
use crate::modules::attendance::core::record::{AttendanceTable, Cell};
use crate::modules::attendance::use_cases::ingest_spreadsheet::header::{
    DEFAULT_HEADER_SCAN_LIMIT, locate_header,
};
use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::IngestError;
use crate::modules::attendance::use_cases::ingest_spreadsheet::rows::extract_record;

/// Header row followed by two students: c33 at 82%, c99 at 60%.
pub fn scenario_rows() -> Vec<Vec<Cell>> {
    attendance_sheet(&[("231fa04c33", 82.0), ("231fa04c99", 60.0)])
}

/// `REGD | M1 | TOTAL` sheet with one row per (identifier, percentage).
pub fn attendance_sheet(students: &[(&str, f64)]) -> Vec<Vec<Cell>> {
    let mut rows = vec![vec![Cell::from("REGD"), Cell::from("M1"), Cell::from("TOTAL")]];
    rows.extend(students.iter().enumerate().map(|(position, (identifier, percentage))| {
        let subject = if position % 2 == 0 { "x" } else { "y" };
        vec![
            Cell::from(*identifier),
            Cell::from(subject),
            Cell::from(*percentage),
        ]
    }));
    rows
}

pub fn scenario_table() -> AttendanceTable {
    let rows = scenario_rows();
    let layout = locate_header(&rows, DEFAULT_HEADER_SCAN_LIMIT).unwrap();
    rows[layout.row_index + 1..]
        .iter()
        .filter_map(|row| extract_record(&layout, row))
        .collect()
}

/// Reader that ignores the uploaded bytes and hands back a prepared grid.
pub struct GridReader {
    result: Result<Vec<Vec<Cell>>, String>,
}

impl GridReader {
    pub fn rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { result: Ok(rows) }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(reason.to_string()),
        }
    }
}

impl SpreadsheetReader for GridReader {
    fn read_rows(&self, _bytes: &[u8]) -> Result<Vec<Vec<Cell>>, IngestError> {
        self.result.clone().map_err(IngestError::Unreadable)
    }
}

#[cfg(test)]
mod sheets_fixture_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_build_the_scenario_table() {
        let table = scenario_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("231fa04c33").unwrap().percentage, 82.0);
        assert_eq!(
            table.get("231fa04c99").unwrap().subject_breakdown.get("M1"),
            Some(&"y".to_string())
        );
    }

    #[rstest]
    fn it_should_serve_or_fail_regardless_of_input() {
        assert_eq!(GridReader::rows(scenario_rows()).read_rows(b"").unwrap().len(), 3);
        assert!(matches!(
            GridReader::failing("broken").read_rows(b"anything"),
            Err(IngestError::Unreadable(reason)) if reason == "broken"
        ));
    }
}
