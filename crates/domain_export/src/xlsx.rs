//! XLSX rendering of a [`ClaimReport`]
//!
//! Amounts are written as real numbers with a `#,##0.00` display format so
//! the sheet can be summed. Merged regions are written first; the value of
//! a merged title is then written into the top-left cell.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::ExportError;
use crate::report::{Cell, ClaimReport, RowKind};

const AMOUNT_FORMAT: &str = "#,##0.00";

/// Cell formats for each kind of row
struct Styles {
    title: Format,
    subtitle: Format,
    claimant: Format,
    header: Format,
    text: Format,
    amount: Format,
    total_label: Format,
    total_amount: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Format::new().set_bold().set_font_size(14).set_align(FormatAlign::Center),
            subtitle: Format::new().set_bold().set_align(FormatAlign::Center),
            claimant: Format::new().set_bold(),
            header: Format::new().set_bold().set_border_bottom(FormatBorder::Thin),
            text: Format::new(),
            amount: Format::new().set_num_format(AMOUNT_FORMAT),
            total_label: Format::new().set_bold(),
            total_amount: Format::new()
                .set_bold()
                .set_num_format(AMOUNT_FORMAT)
                .set_border_top(FormatBorder::Thin),
        }
    }

    /// Formats for (text, amount) cells of a row
    fn for_row(&self, kind: RowKind, row: usize) -> (&Format, &Format) {
        match kind {
            RowKind::Title if row == 0 => (&self.title, &self.title),
            RowKind::Title => (&self.subtitle, &self.subtitle),
            RowKind::ClaimantHeader => (&self.claimant, &self.claimant),
            RowKind::ColumnHeader => (&self.header, &self.header),
            RowKind::Subtotal | RowKind::GrandTotal => (&self.total_label, &self.total_amount),
            RowKind::Claim | RowKind::Spacer => (&self.text, &self.amount),
        }
    }
}

/// Renders `report` as an in-memory xlsx workbook with a single sheet
pub fn render_xlsx(report: &ClaimReport) -> Result<Vec<u8>, ExportError> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(&report.sheet_name)?;

    for merge in &report.merges {
        let (text_format, _) = styles.for_row(RowKind::Title, merge.first_row);
        worksheet.merge_range(
            to_row(merge.first_row)?,
            to_column(merge.first_column)?,
            to_row(merge.last_row)?,
            to_column(merge.last_column)?,
            "",
            text_format,
        )?;
    }

    for (row_index, row) in report.rows.iter().enumerate() {
        let (text_format, amount_format) = styles.for_row(row.kind, row_index);
        for (column_index, cell) in row.cells.iter().enumerate() {
            write_cell(
                worksheet,
                to_row(row_index)?,
                to_column(column_index)?,
                cell,
                text_format,
                amount_format,
            )?;
        }
    }

    for (column_index, width) in report.column_widths.iter().enumerate() {
        worksheet.set_column_width(to_column(column_index)?, *width)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    column: u16,
    cell: &Cell,
    text_format: &Format,
    amount_format: &Format,
) -> Result<(), ExportError> {
    match cell {
        Cell::Text(text) if text.is_empty() => {
            worksheet.write_blank(row, column, text_format)?;
        }
        Cell::Text(text) => {
            worksheet.write_string_with_format(row, column, text, text_format)?;
        }
        Cell::Number(amount) => {
            worksheet.write_number_with_format(row, column, amount.to_f64(), amount_format)?;
        }
        Cell::Blank => {
            worksheet.write_blank(row, column, amount_format)?;
        }
    }
    Ok(())
}

fn to_row(index: usize) -> Result<u32, ExportError> {
    u32::try_from(index).map_err(|_| ExportError::Layout(format!("row {index} out of range")))
}

fn to_column(index: usize) -> Result<u16, ExportError> {
    u16::try_from(index).map_err(|_| ExportError::Layout(format!("column {index} out of range")))
}
