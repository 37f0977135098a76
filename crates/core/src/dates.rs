//! Date parsing and report date windows.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::types::Timestamp;
use crate::validation::FieldErrors;

/// The only accepted format for report range parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Naive formats accepted for timestamps, tried in order. Values are read as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a timestamp leniently: RFC 3339, common naive date-time forms, or a
/// bare date (midnight).
pub fn parse_datetime(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| parse_date(value).map(start_of_day))
}

pub fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The last representable microsecond of `date`.
pub fn end_of_day(date: NaiveDate) -> Timestamp {
    start_of_day(date) + Duration::days(1) - Duration::microseconds(1)
}

/// `dd.mm.yyyy`, as printed in report titles.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// An inclusive range of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn starts_at(&self) -> Timestamp {
        start_of_day(self.start)
    }

    pub fn ends_at(&self) -> Timestamp {
        end_of_day(self.end)
    }

    /// `dd.mm.yyyy - dd.mm.yyyy`
    pub fn label(&self) -> String {
        format!("{} - {}", display_date(self.start), display_date(self.end))
    }
}

/// Validate a `YYYY-MM-DD` start/end pair into a [`DateWindow`].
///
/// When `required` is false, the window is only produced if both values are
/// present; a lone value is still format-checked. Failures are recorded in
/// `errors` under the given field names.
pub fn read_window(
    errors: &mut FieldErrors,
    start_field: &str,
    start: Option<&str>,
    end_field: &str,
    end: Option<&str>,
    required: bool,
) -> Option<DateWindow> {
    let start = read_date(errors, start_field, start, required);
    let end = read_date(errors, end_field, end, required);

    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            errors.add(
                end_field,
                format!("The {end_field} field must be a date after or equal to {start_field}."),
            );
            None
        }
        (Some(start), Some(end)) => Some(DateWindow { start, end }),
        _ => None,
    }
}

fn read_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    required: bool,
) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    let value = if required {
        errors.require(field, value)?
    } else {
        value?
    };
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.add(field, format!("The {field} field must match the format Y-m-d."));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_strict_dates_only() {
        assert_eq!(parse_date("2025-09-01"), Some(date(2025, 9, 1)));
        assert_eq!(parse_date("01.09.2025"), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }

    #[test]
    fn parses_various_datetime_forms() {
        let rfc = parse_datetime("2025-09-01T10:30:00+03:00").unwrap();
        assert_eq!(rfc.hour(), 7);

        let naive = parse_datetime("2025-09-01 10:30:00").unwrap();
        assert_eq!(naive.hour(), 10);
        assert_eq!(naive.minute(), 30);

        let short = parse_datetime("2025-09-01 10:30").unwrap();
        assert_eq!(short.minute(), 30);

        let bare = parse_datetime("2025-09-01").unwrap();
        assert_eq!(bare.day(), 1);
        assert_eq!(bare.hour(), 0);

        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn window_covers_whole_days() {
        let window = DateWindow {
            start: date(2025, 9, 1),
            end: date(2025, 9, 30),
        };
        assert_eq!(window.starts_at().hour(), 0);
        assert_eq!(window.ends_at().day(), 30);
        assert_eq!(window.ends_at().hour(), 23);
        assert_eq!(window.ends_at().minute(), 59);
        assert_eq!(window.label(), "01.09.2025 - 30.09.2025");
    }

    #[test]
    fn required_window_reports_missing_fields() {
        let mut errors = FieldErrors::new();
        let window = read_window(&mut errors, "start_date", None, "end_date", None, true);
        assert!(window.is_none());
        assert!(errors.contains("start_date"));
        assert!(errors.contains("end_date"));
    }

    #[test]
    fn reversed_window_is_rejected_on_end_field() {
        let mut errors = FieldErrors::new();
        let window = read_window(
            &mut errors,
            "start_date",
            Some("2025-09-10"),
            "end_date",
            Some("2025-09-01"),
            true,
        );
        assert!(window.is_none());
        assert!(!errors.contains("start_date"));
        assert!(errors.contains("end_date"));
    }

    #[test]
    fn same_day_window_is_valid() {
        let mut errors = FieldErrors::new();
        let window = read_window(
            &mut errors,
            "start_date",
            Some("2025-09-10"),
            "end_date",
            Some("2025-09-10"),
            true,
        );
        assert!(errors.is_empty());
        assert_eq!(window.unwrap().start, date(2025, 9, 10));
    }

    #[test]
    fn optional_window_needs_both_bounds() {
        let mut errors = FieldErrors::new();
        let window = read_window(
            &mut errors,
            "start_date",
            Some("2025-09-10"),
            "end_date",
            None,
            false,
        );
        assert!(window.is_none());
        assert!(errors.is_empty());

        let bad = read_window(&mut errors, "start_date", Some("10/09/2025"), "end_date", None, false);
        assert!(bad.is_none());
        assert!(errors.contains("start_date"));
    }
}
