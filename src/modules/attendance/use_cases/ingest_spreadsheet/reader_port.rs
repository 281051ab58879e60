// Port through which the upload flow obtains a grid of cells from a file.
//
// Boundaries
// - No concrete input or output here. Readers live in the adapters layer.

use crate::modules::attendance::core::record::Cell;
use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::IngestError;

/// Turns an uploaded file into a grid of rows. Only the first worksheet is read.
pub trait SpreadsheetReader: Send + Sync {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<Cell>>, IngestError>;
}
