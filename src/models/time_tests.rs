//! Unit tests for calendar helpers.

use super::time::{format_iso_date, parse_iso_date, year_before};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_valid_iso_date() {
    assert_eq!(parse_iso_date("2017-08-23"), Some(date(2017, 8, 23)));
}

#[test]
fn test_parse_rejects_malformed_input() {
    assert_eq!(parse_iso_date("08/23/2017"), None);
    assert_eq!(parse_iso_date("2017-13-01"), None);
    assert_eq!(parse_iso_date(""), None);
    assert_eq!(parse_iso_date("not-a-date"), None);
}

#[test]
fn test_format_round_trips() {
    assert_eq!(format_iso_date(date(2017, 8, 23)), "2017-08-23");
    assert_eq!(format_iso_date(date(2017, 1, 5)), "2017-01-05");
}

#[test]
fn test_year_before_ordinary_date() {
    assert_eq!(year_before(date(2017, 8, 23)), date(2016, 8, 23));
}

#[test]
fn test_year_before_keeps_month_and_day() {
    assert_eq!(year_before(date(2020, 1, 31)), date(2019, 1, 31));
    assert_eq!(year_before(date(2021, 12, 1)), date(2020, 12, 1));
}

#[test]
fn test_year_before_feb_29_clamps_to_feb_28() {
    assert_eq!(year_before(date(2016, 2, 29)), date(2015, 2, 28));
    assert_eq!(year_before(date(2020, 2, 29)), date(2019, 2, 28));
}

#[test]
fn test_year_before_feb_28_never_clamps() {
    assert_eq!(year_before(date(2000, 2, 28)), date(1999, 2, 28));
    assert_eq!(year_before(date(2017, 2, 28)), date(2016, 2, 28));
}
