// calamine implementation of the SpreadsheetReader port.
//
// Purpose
// - Accept xlsx, xls, xlsb and ods workbooks from an in-memory buffer.
//
// Boundaries
// - PDF attendance files are refused outright; they cannot be matched row by row.
// - Only the first worksheet is read.
// - The grid is anchored at A1: blank rows and columns before the first used cell are kept, so
//   row positions match what the operator sees in the sheet.

use crate::modules::attendance::use_cases::ingest_spreadsheet::reader_port::SpreadsheetReader;
use crate::modules::attendance::core::record::Cell;
use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::IngestError;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::iter;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineSpreadsheetReader;

impl CalamineSpreadsheetReader {
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetReader for CalamineSpreadsheetReader {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<Cell>>, IngestError> {
        if bytes.starts_with(PDF_MAGIC) {
            return Err(IngestError::UnsupportedFormat(
                "PDF attendance files cannot be matched, upload an Excel sheet instead".into(),
            ));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|error| IngestError::Unreadable(error.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IngestError::Unreadable("workbook has no worksheets".into()))?
            .map_err(|error| IngestError::Unreadable(error.to_string()))?;

        let (first_row, first_column) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); first_row as usize];
        rows.extend(range.rows().map(|row| {
            iter::repeat_n(Cell::Empty, first_column as usize)
                .chain(row.iter().map(to_cell))
                .collect()
        }));
        Ok(rows)
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        other => Cell::Text(other.to_string()),
    }
}
