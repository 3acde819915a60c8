//! Claim Report Export
//!
//! Builds the monthly claim spreadsheet from the session's claim list:
//! claims grouped by claimant (in order of first appearance), a subtotal per
//! claimant, and a grand total over everything.
//!
//! # Pipeline
//!
//! ```text
//! &[ClaimItem] -> ClaimantGroups -> ClaimReport (typed grid) -> xlsx bytes
//! ```

pub mod grouping;
pub mod report;
pub mod builder;
pub mod xlsx;
pub mod error;

pub use grouping::{ClaimantGroup, ClaimantGroups};
pub use report::{Cell, ClaimReport, MergeRange, ReportRow, RowKind};
pub use builder::{
    ReportBuilder, ReportOptions, ZeroAmountDisplay,
    COLUMN_COUNT, COLUMN_HEADERS,
};
pub use xlsx::render_xlsx;
pub use error::ExportError;

use chrono::NaiveDate;
use tracing::{debug, info};

use domain_claims::ClaimItem;

/// Media type of the produced workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A rendered report ready to be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Builds and renders the claim report
///
/// Returns `Ok(None)` when there are no claims; no file is produced.
pub fn export_claims(
    claims: &[ClaimItem],
    as_of: NaiveDate,
    options: &ReportOptions,
) -> Result<Option<ExportedFile>, ExportError> {
    let Some(report) = ReportBuilder::new(options.clone()).build(claims, as_of) else {
        debug!("Export skipped: no claims");
        return Ok(None);
    };

    let bytes = render_xlsx(&report)?;
    info!(
        claims = claims.len(),
        rows = report.row_count(),
        bytes = bytes.len(),
        file_name = %report.file_name,
        "Claim report exported"
    );

    Ok(Some(ExportedFile {
        file_name: report.file_name,
        content_type: XLSX_CONTENT_TYPE,
        bytes,
    }))
}
