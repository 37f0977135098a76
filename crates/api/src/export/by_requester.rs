//! Copies per requester over a single date window.
//!
//! Layout: merged title `A1:D1`, header row 2, one row per requester from
//! row 3 (largest total first), then a bold "Grand Total" row of `SUM`
//! formulas.

use rust_xlsxwriter::{Workbook, XlsxError};
use schooldesk_core::dates::DateWindow;
use schooldesk_core::reports::CopyTotals;

use super::{bold, title_format, write_sum_formulas, GRAND_TOTAL_LABEL};

const HEADERS: [&str; 4] = ["Requester", "Color Copies", "B&W Copies", "Total Copies"];

/// `print_report_{start}_-_{end}.xlsx`
pub fn filename(window: &DateWindow) -> String {
    format!("print_report_{}_-_{}.xlsx", window.start, window.end)
}

/// Render the report. `rows` are expected in display order.
pub fn build(window: &DateWindow, rows: &[CopyTotals]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = bold();

    sheet.merge_range(
        0,
        0,
        0,
        3,
        &format!("Print Report ({})", window.label()),
        &title_format(),
    )?;
    sheet.set_row_height(0, 20)?;
    sheet.set_row_height(1, 20)?;

    for (col, header) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(1, col, header, &bold)?;
    }

    let mut row = 2u32;
    for totals in rows {
        sheet.write_string(row, 0, totals.display_name())?;
        sheet.write_number(row, 1, totals.color_copies as f64)?;
        sheet.write_number(row, 2, totals.bw_copies as f64)?;
        sheet.write_number(row, 3, totals.total_copies as f64)?;
        row += 1;
    }

    sheet.write_string_with_format(row, 0, GRAND_TOTAL_LABEL, &bold)?;
    write_sum_formulas(sheet, row, 1..=3, 2, &bold)?;

    sheet.set_column_width(0, 25)?;
    for col in 1..=3 {
        sheet.set_column_width(col, 16)?;
    }

    workbook.save_to_buffer()
}
