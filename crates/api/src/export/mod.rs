//! Spreadsheet exports of print request activity.
//!
//! Each builder renders one worksheet into an in-memory `.xlsx` buffer:
//!
//! - [`by_requester`] -- copies per requester over one window.
//! - [`comparison`] -- copies per requester across two windows, with diffs.
//! - [`all_requests`] -- every print request, optionally windowed.
//!
//! Handlers wrap the bytes in an [`XlsxFile`] to send them as a download.

pub mod all_requests;
pub mod by_requester;
pub mod comparison;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use rust_xlsxwriter::{ColNum, Format, FormatAlign, RowNum, Worksheet, XlsxError};

/// MIME type of Office Open XML workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Label of the totals row at the bottom of every report.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// A rendered workbook ready to be sent as an attachment.
#[derive(Debug)]
pub struct XlsxFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl IntoResponse for XlsxFile {
    fn into_response(self) -> Response {
        (
            [
                (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

fn title_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center)
}

fn bold() -> Format {
    Format::new().set_bold()
}

/// Write the totals for each column into `row`, the row directly below the
/// data that starts at the 0-based `first_data_row`.
///
/// Each total is `=SUM(col{first}:col{last})`. With no data rows there is
/// nothing to sum, and a formula would reference its own cell, so a literal
/// 0 is written instead.
fn write_sum_formulas(
    sheet: &mut Worksheet,
    row: RowNum,
    columns: impl IntoIterator<Item = ColNum>,
    first_data_row: RowNum,
    format: &Format,
) -> Result<(), XlsxError> {
    for col in columns {
        if row <= first_data_row {
            sheet.write_number_with_format(row, col, 0.0, format)?;
            continue;
        }
        let letter = column_letter(col);
        // 1-based rows: the data spans first_data_row + 1 ..= row.
        let formula = format!("=SUM({letter}{}:{letter}{row})", first_data_row + 1);
        sheet.write_formula_with_format(row, col, formula.as_str(), format)?;
    }
    Ok(())
}

/// `0 -> A`, `9 -> J`. Reports never exceed 26 columns.
fn column_letter(col: ColNum) -> char {
    char::from(b'A' + (col as u8))
}

/// Read parts of a rendered workbook back for assertions.
#[cfg(test)]
pub(crate) mod inspect {
    use std::io::{Cursor, Read};

    /// The XML of one archive member, e.g. `xl/worksheets/sheet1.xml`.
    pub fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    pub fn sheet(bytes: &[u8]) -> String {
        part(bytes, "xl/worksheets/sheet1.xml")
    }

    pub fn shared_strings(bytes: &[u8]) -> String {
        part(bytes, "xl/sharedStrings.xml")
    }
}
