//! Export errors

use thiserror::Error;

/// Errors that can occur while producing a report file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Spreadsheet writer error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Report layout does not fit a worksheet: {0}")]
    Layout(String),
}
