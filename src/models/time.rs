//! Calendar helpers for the lexically ordered ISO date column.
//!
//! Measurement dates are stored as `YYYY-MM-DD` text and compared
//! lexically throughout the query layer. These helpers only come into
//! play for the reporting-window computation, which needs real calendar
//! arithmetic to step back one year from the newest measurement.

use chrono::{Datelike, NaiveDate};

/// Format of the measurement date column.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date, returning `None` on malformed input.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT).ok()
}

/// Format a date back into the column representation.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// The date one calendar year earlier, keeping month and day.
///
/// Policy for the one undefined case: Feb 29 rolled back into a
/// non-leap year clamps to Feb 28.
pub fn year_before(date: NaiveDate) -> NaiveDate {
    let year = date.year() - 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day()).unwrap_or_else(|| {
        // Only reachable from Feb 29; Feb 28 exists in every year.
        NaiveDate::from_ymd_opt(year, 2, 28).expect("Feb 28 is valid in every year")
    })
}
