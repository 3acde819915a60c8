//! Claim report grid
//!
//! A renderer-independent model of the exported sheet: typed cells in rows,
//! each row tagged with what it is so a renderer can style it.

use serde::Serialize;

use core_kernel::Amount;
use domain_claims::PaymentTotals;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Number(Amount),
    Blank,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Amount> {
        match self {
            Cell::Number(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }
}

/// What a row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Title,
    Spacer,
    ClaimantHeader,
    ColumnHeader,
    Claim,
    Subtotal,
    GrandTotal,
}

/// One row of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl ReportRow {
    pub fn new(kind: RowKind, cells: Vec<Cell>) -> Self {
        Self { kind, cells }
    }

    pub fn spacer() -> Self {
        Self::new(RowKind::Spacer, Vec::new())
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

/// A rectangular merged region, zero-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeRange {
    pub first_row: usize,
    pub first_column: usize,
    pub last_row: usize,
    pub last_column: usize,
}

impl MergeRange {
    /// Merges columns `first..=last` of a single row
    pub fn row_span(row: usize, first_column: usize, last_column: usize) -> Self {
        Self {
            first_row: row,
            first_column,
            last_row: row,
            last_column,
        }
    }
}

/// The complete export layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimReport {
    pub sheet_name: String,
    pub file_name: String,
    pub rows: Vec<ReportRow>,
    pub merges: Vec<MergeRange>,
    pub column_widths: Vec<f64>,
    /// Totals over every claim in the report
    pub grand_totals: PaymentTotals,
}

impl ClaimReport {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cell(column))
    }

    /// Rows of one kind, in sheet order
    pub fn rows_of_kind(&self, kind: RowKind) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(move |row| row.kind == kind)
    }

    /// The grand-total row, always the last row of a report
    pub fn grand_total_row(&self) -> Option<&ReportRow> {
        self.rows.last().filter(|row| row.kind == RowKind::GrandTotal)
    }
}
