//! Every live print request, newest first.

use rust_xlsxwriter::{Workbook, XlsxError};
use schooldesk_core::dates::DateWindow;
use schooldesk_core::reports::UNKNOWN_REQUESTER;
use schooldesk_db::models::report::PrintRequestExportRow;

use super::{bold, title_format, write_sum_formulas, GRAND_TOTAL_LABEL};

const HEADERS: [&str; 9] = [
    "ID",
    "Requester",
    "Approver",
    "Color Copies",
    "B&W Copies",
    "Total Copies",
    "Description",
    "Requested At",
    "Status",
];

const COLUMN_WIDTHS: [f64; 9] = [8.0, 20.0, 20.0, 12.0, 15.0, 12.0, 30.0, 15.0, 12.0];

const NO_DESCRIPTION: &str = "No description";
const NOT_APPROVED: &str = "Not Approved Yet";

/// `all_print_requests.xlsx`, or `all_print_requests_{start}_{end}.xlsx`
/// when windowed.
pub fn filename(window: Option<&DateWindow>) -> String {
    match window {
        Some(w) => format!("all_print_requests_{}_{}.xlsx", w.start, w.end),
        None => "all_print_requests.xlsx".to_string(),
    }
}

fn title(window: Option<&DateWindow>) -> String {
    match window {
        Some(w) => format!("All Print Requests Report ({})", w.label()),
        None => "All Print Requests Report".to_string(),
    }
}

/// `Approved` while the approver is live, `Pending` otherwise.
fn status(row: &PrintRequestExportRow) -> &'static str {
    if row.approver_name.is_some() {
        "Approved"
    } else {
        "Pending"
    }
}

pub fn build(
    window: Option<&DateWindow>,
    rows: &[PrintRequestExportRow],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = bold();

    sheet.merge_range(0, 0, 0, 8, &title(window), &title_format())?;
    sheet.set_row_height(0, 20)?;
    sheet.set_row_height(1, 20)?;

    for (col, header) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(1, col, header, &bold)?;
    }

    let mut row = 2u32;
    for r in rows {
        sheet.write_number(row, 0, r.id as f64)?;
        sheet.write_string(row, 1, r.requester_name.as_deref().unwrap_or(UNKNOWN_REQUESTER))?;
        sheet.write_string(row, 2, r.approver_name.as_deref().unwrap_or(NOT_APPROVED))?;
        sheet.write_number(row, 3, f64::from(r.color_copies))?;
        sheet.write_number(row, 4, f64::from(r.bw_copies))?;
        sheet.write_number(row, 5, r.total_copies() as f64)?;
        sheet.write_string(row, 6, r.description.as_deref().unwrap_or(NO_DESCRIPTION))?;
        sheet.write_string(row, 7, r.requested_at.format("%d.%m.%Y %H:%M").to_string())?;
        sheet.write_string(row, 8, status(r))?;
        row += 1;
    }

    // Header plus data, in 0-based rows.
    sheet.autofilter(1, 0, row.max(2) - 1, 8)?;

    sheet.write_string_with_format(row, 0, GRAND_TOTAL_LABEL, &bold)?;
    write_sum_formulas(sheet, row, 3..=5, 2, &bold)?;

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        sheet.set_column_width(col, width)?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::export::inspect;

    fn row(approver: Option<&str>, description: Option<&str>) -> PrintRequestExportRow {
        PrintRequestExportRow {
            id: 3,
            requester_name: Some("Betül Görgülü".into()),
            approver_name: approver.map(str::to_string),
            color_copies: 2,
            bw_copies: 8,
            description: description.map(str::to_string),
            requested_at: Utc.with_ymd_and_hms(2025, 9, 3, 14, 5, 0).unwrap(),
        }
    }

    #[test]
    fn filename_includes_window_only_when_given() {
        let window = DateWindow {
            start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        };
        assert_eq!(filename(None), "all_print_requests.xlsx");
        assert_eq!(
            filename(Some(&window)),
            "all_print_requests_2025-09-01_2025-09-30.xlsx"
        );
        assert_eq!(
            title(Some(&window)),
            "All Print Requests Report (01.09.2025 - 30.09.2025)"
        );
    }

    #[test]
    fn status_follows_live_approver() {
        assert_eq!(status(&row(Some("Safa Koç"), None)), "Approved");
        assert_eq!(status(&row(None, None)), "Pending");
    }

    #[test]
    fn fills_placeholders_totals_and_filter() {
        let rows = vec![row(Some("Safa Koç"), Some("Exam copies")), row(None, None)];
        let bytes = build(None, &rows).expect("workbook should render");
        let xml = inspect::sheet(&bytes);
        let strings = inspect::shared_strings(&bytes);

        assert!(xml.contains(r#"<mergeCell ref="A1:I1"/>"#), "{xml}");
        assert!(xml.contains(r#"<autoFilter ref="A2:I4"/>"#), "{xml}");
        for col in ['D', 'E', 'F'] {
            assert!(xml.contains(&format!("<f>SUM({col}3:{col}4)</f>")), "{xml}");
        }
        for text in [
            "Exam copies",
            NO_DESCRIPTION,
            NOT_APPROVED,
            "Approved",
            "Pending",
            "03.09.2025 14:05",
        ] {
            assert!(strings.contains(text), "missing {text}");
        }
    }

    #[test]
    fn empty_export_keeps_header_filter_and_zero_totals() {
        let bytes = build(None, &[]).expect("workbook should render");
        let xml = inspect::sheet(&bytes);
        assert!(xml.contains(r#"<autoFilter ref="A2:I2"/>"#), "{xml}");
        assert!(!xml.contains("<f>"), "{xml}");
    }
}
