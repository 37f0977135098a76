//! Copies per requester across two date windows.
//!
//! Layout: two-line merged title `A1:J1`, blank row 2, wrapped header row 3
//! naming each period, data from row 4 sorted by total difference, a bold
//! totals row over all ten numeric columns, and green/red fills on the
//! difference columns `H:J` for growth/decline.

use rust_xlsxwriter::{
    Color, ConditionalFormatCell, ConditionalFormatCellRule, Format, FormatAlign, Workbook,
    XlsxError,
};
use schooldesk_core::dates::DateWindow;
use schooldesk_core::reports::ComparisonRow;

use super::{bold, write_sum_formulas, GRAND_TOTAL_LABEL};

const INCREASE_FILL: u32 = 0xC6EFCE;
const DECREASE_FILL: u32 = 0xFFC7CE;

/// First 0-based row holding data.
const FIRST_DATA_ROW: u32 = 3;

/// `print_comparison_{s1}_{e1}_vs_{s2}_{e2}.xlsx`
pub fn filename(first: &DateWindow, second: &DateWindow) -> String {
    format!(
        "print_comparison_{}_{}_vs_{}_{}.xlsx",
        first.start, first.end, second.start, second.end
    )
}

fn headers(first: &DateWindow, second: &DateWindow) -> [String; 10] {
    let (l1, l2) = (first.label(), second.label());
    [
        "Requester".to_string(),
        format!("Period 1 Color\n({l1})"),
        format!("Period 1 B&W\n({l1})"),
        format!("Period 1 Total\n({l1})"),
        format!("Period 2 Color\n({l2})"),
        format!("Period 2 B&W\n({l2})"),
        format!("Period 2 Total\n({l2})"),
        "Color Difference".to_string(),
        "B&W Difference".to_string(),
        "Total Difference".to_string(),
    ]
}

/// Render the report. `rows` are expected in display order.
pub fn build(
    first: &DateWindow,
    second: &DateWindow,
    rows: &[ComparisonRow],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = bold();

    let title = format!(
        "Print Comparison Report\n{} vs {}",
        first.label(),
        second.label()
    );
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center)
        .set_text_wrap();
    sheet.merge_range(0, 0, 0, 9, &title, &title_format)?;
    sheet.set_row_height(0, 40)?;

    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Center);
    for (col, header) in (0u16..).zip(headers(first, second)) {
        sheet.write_string_with_format(2, col, &header, &header_format)?;
    }
    sheet.set_row_height(2, 40)?;

    let mut row = FIRST_DATA_ROW;
    for r in rows {
        let values = [
            r.first.color_copies,
            r.first.bw_copies,
            r.first.total_copies,
            r.second.color_copies,
            r.second.bw_copies,
            r.second.total_copies,
            r.color_difference(),
            r.bw_difference(),
            r.total_difference(),
        ];
        sheet.write_string(row, 0, &r.requester_name)?;
        for (col, value) in (1u16..).zip(values) {
            sheet.write_number(row, col, value as f64)?;
        }
        row += 1;
    }

    sheet.write_string_with_format(row, 0, GRAND_TOTAL_LABEL, &bold)?;
    write_sum_formulas(sheet, row, 1..=9, FIRST_DATA_ROW, &bold)?;

    if !rows.is_empty() {
        let last_data_row = row - 1;
        let increase = ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::GreaterThan(0))
            .set_format(Format::new().set_background_color(Color::RGB(INCREASE_FILL)));
        let decrease = ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::LessThan(0))
            .set_format(Format::new().set_background_color(Color::RGB(DECREASE_FILL)));
        sheet.add_conditional_format(FIRST_DATA_ROW, 7, last_data_row, 9, &increase)?;
        sheet.add_conditional_format(FIRST_DATA_ROW, 7, last_data_row, 9, &decrease)?;
    }

    sheet.set_column_width(0, 20)?;
    for col in 1..=9 {
        sheet.set_column_width(col, 12)?;
    }

    workbook.save_to_buffer()
}
