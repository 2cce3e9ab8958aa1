//! Date/time helpers for CLI input and display.

use chrono::{DateTime, Local, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// ISO 8601 timestamp → local `YYYY-MM-DD HH:MM:SS`. Unparseable input is
/// returned unchanged.
pub fn iso_to_local(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| iso.to_string())
}
