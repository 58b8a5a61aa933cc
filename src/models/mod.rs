//! Domain helpers shared across the crate.

pub mod time;

pub use time::{format_iso_date, parse_iso_date, year_before, ISO_DATE_FORMAT};

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
