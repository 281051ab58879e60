// Locates the header row of an attendance sheet.
//
// Responsibilities
// - Find the first row, within the scan limit, whose concatenated text holds both REGD and TOTAL.
// - Pick the identifier column (REGD) and the percentage column (TOTAL) inside that row.
// - Collect the subject headers sitting strictly between the two columns.

use crate::modules::attendance::core::record::Cell;

pub const DEFAULT_HEADER_SCAN_LIMIT: usize = 100;

const IDENTIFIER_MARKER: &str = "REGD";
const PERCENTAGE_MARKER: &str = "TOTAL";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("header not found")]
    HeaderNotFound,
    #[error("required columns missing")]
    RequiredColumnsMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub row_index: usize,
    pub identifier_column: usize,
    pub percentage_column: usize,
    pub subject_columns: Vec<(usize, String)>,
}

pub fn locate_header(rows: &[Vec<Cell>], scan_limit: usize) -> Result<HeaderLayout, FormatError> {
    let (row_index, header) = rows
        .iter()
        .take(scan_limit)
        .enumerate()
        .find(|(_, row)| {
            let joined: String = row.iter().map(|cell| cell.as_text().to_uppercase()).collect();
            joined.contains(IDENTIFIER_MARKER) && joined.contains(PERCENTAGE_MARKER)
        })
        .ok_or(FormatError::HeaderNotFound)?;

    let column_with = |marker: &str| {
        header
            .iter()
            .position(|cell| cell.as_text().to_uppercase().contains(marker))
    };
    let (Some(identifier_column), Some(percentage_column)) =
        (column_with(IDENTIFIER_MARKER), column_with(PERCENTAGE_MARKER))
    else {
        return Err(FormatError::RequiredColumnsMissing);
    };

    let subject_columns = header
        .iter()
        .enumerate()
        .skip(identifier_column + 1)
        .take(percentage_column.saturating_sub(identifier_column + 1))
        .map(|(index, cell)| (index, cell.as_text()))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    Ok(HeaderLayout {
        row_index,
        identifier_column,
        percentage_column,
        subject_columns,
    })
}
