//! Report builder
//!
//! Turns the flat, ordered claim list into the grouped and subtotaled grid:
//!
//! ```text
//! <organization>                                    (merged A:F)
//! Monthly Claim as of DD/MM/YYYY                    (merged A:F)
//!
//! <claimant>
//! Date | Description | Ref No | Credit Card | Cash | Remarks
//! ...one row per claim...
//!      | Subtotal    |        | credit      | cash |
//!
//! ...next claimant...
//!      | GRAND TOTAL (A) : |  | credit      | cash |
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use core_kernel::{format_title_date, Amount, CoreError};
use domain_claims::{ClaimItem, PaymentMethod, PaymentTotals};

use crate::grouping::ClaimantGroups;
use crate::report::{Cell, ClaimReport, MergeRange, ReportRow, RowKind};

/// Number of columns in the claims table
pub const COLUMN_COUNT: usize = 6;

/// Column headers of the claims table
pub const COLUMN_HEADERS: [&str; COLUMN_COUNT] =
    ["Date", "Description", "Ref No", "Credit Card", "Cash", "Remarks"];

pub const DEFAULT_ORGANIZATION: &str = "SER ENTERPRISE SDN. BHD.";
pub const DEFAULT_SHEET_NAME: &str = "Claims";
pub const DEFAULT_FILE_NAME: &str = "Claim_Report.xlsx";
pub const DEFAULT_COLUMN_WIDTHS: [f64; COLUMN_COUNT] = [12.0, 40.0, 10.0, 15.0, 15.0, 30.0];

const SUBTOTAL_LABEL: &str = "Subtotal";
const GRAND_TOTAL_LABEL: &str = "GRAND TOTAL (A) :";

/// How a zero amount is shown on a claim row
///
/// Subtotals and the grand total are always numeric. Parsing ignores case,
/// so `NUMERIC` and `numeric` read the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ZeroAmountDisplay {
    /// Leave the cell empty
    #[default]
    Blank,
    /// Write a numeric 0
    Numeric,
}

impl FromStr for ZeroAmountDisplay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" => Ok(ZeroAmountDisplay::Blank),
            "numeric" | "zero" => Ok(ZeroAmountDisplay::Numeric),
            other => Err(CoreError::configuration(format!(
                "Unknown zero amount display: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for ZeroAmountDisplay {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ZeroAmountDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroAmountDisplay::Blank => f.write_str("blank"),
            ZeroAmountDisplay::Numeric => f.write_str("numeric"),
        }
    }
}

/// Layout options for the exported report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub organization_name: String,
    pub sheet_name: String,
    pub file_name: String,
    pub column_widths: [f64; COLUMN_COUNT],
    pub zero_amount_display: ZeroAmountDisplay,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            organization_name: DEFAULT_ORGANIZATION.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            column_widths: DEFAULT_COLUMN_WIDTHS,
            zero_amount_display: ZeroAmountDisplay::default(),
        }
    }
}

/// Builds [`ClaimReport`] grids
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Lays out `claims` as of `as_of`; `None` when there is nothing to report
    pub fn build(&self, claims: &[ClaimItem], as_of: NaiveDate) -> Option<ClaimReport> {
        if claims.is_empty() {
            return None;
        }

        let groups = ClaimantGroups::from_claims(claims);
        let mut rows = vec![
            ReportRow::new(RowKind::Title, vec![Cell::text(&self.options.organization_name)]),
            ReportRow::new(
                RowKind::Title,
                vec![Cell::text(format!("Monthly Claim as of {}", format_title_date(as_of)))],
            ),
            ReportRow::spacer(),
        ];

        let mut grand_totals = PaymentTotals::default();
        for group in &groups {
            rows.push(ReportRow::new(RowKind::ClaimantHeader, vec![Cell::text(group.claimant)]));
            rows.push(ReportRow::new(
                RowKind::ColumnHeader,
                COLUMN_HEADERS.iter().map(|header| Cell::text(*header)).collect(),
            ));

            for claim in &group.claims {
                rows.push(self.claim_row(claim));
            }

            let subtotals = group.totals();
            rows.push(totals_row(RowKind::Subtotal, SUBTOTAL_LABEL, &subtotals));
            rows.push(ReportRow::spacer());
            grand_totals = grand_totals + subtotals;
        }

        rows.push(totals_row(RowKind::GrandTotal, GRAND_TOTAL_LABEL, &grand_totals));

        debug!(
            claims = claims.len(),
            claimants = groups.len(),
            rows = rows.len(),
            "Claim report laid out"
        );

        Some(ClaimReport {
            sheet_name: self.options.sheet_name.clone(),
            file_name: self.options.file_name.clone(),
            rows,
            merges: vec![
                MergeRange::row_span(0, 0, COLUMN_COUNT - 1),
                MergeRange::row_span(1, 0, COLUMN_COUNT - 1),
            ],
            column_widths: self.options.column_widths.to_vec(),
            grand_totals,
        })
    }

    fn claim_row(&self, claim: &ClaimItem) -> ReportRow {
        ReportRow::new(
            RowKind::Claim,
            vec![
                Cell::text(&claim.date),
                Cell::text(&claim.description),
                Cell::text(claim.ref_no_or_empty()),
                self.amount_cell(claim.amount_for(PaymentMethod::CreditCard)),
                self.amount_cell(claim.amount_for(PaymentMethod::Cash)),
                Cell::text(&claim.remarks),
            ],
        )
    }

    fn amount_cell(&self, amount: Option<Amount>) -> Cell {
        match (amount, self.options.zero_amount_display) {
            (None, _) => Cell::Blank,
            (Some(amount), ZeroAmountDisplay::Blank) if amount.is_zero() => Cell::Blank,
            (Some(amount), _) => Cell::Number(amount),
        }
    }
}

fn totals_row(kind: RowKind, label: &str, totals: &PaymentTotals) -> ReportRow {
    ReportRow::new(
        kind,
        vec![
            Cell::text(""),
            Cell::text(label),
            Cell::text(""),
            Cell::Number(totals.credit_card),
            Cell::Number(totals.cash),
            Cell::text(""),
        ],
    )
}
