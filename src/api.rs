//! Shared data types for climate query results.
//!
//! These types flow between the repository layer, the service layer, and
//! the HTTP handlers. They all serialize directly into the response
//! shapes the API exposes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observation row as produced by a map query: station code, ISO
/// date, and the projected reading (precipitation or temperature).
///
/// Rows arrive ordered by station code then date; a station code appears
/// in exactly one contiguous run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub station: String,
    pub date: String,
    pub value: Option<f64>,
}

impl ObservationRow {
    pub fn new(station: impl Into<String>, date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            value,
        }
    }
}

/// Nested map of station code -> date -> reading.
///
/// `BTreeMap` keeps key order deterministic, so repeated identical
/// requests against an unchanged dataset serialize byte-identically.
pub type StationReadings = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// Aggregated temperature statistics for one station over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    /// Station code
    pub station: String,
    /// Minimum observed temperature
    pub min: f64,
    /// Maximum observed temperature
    pub max: f64,
    /// Mean observed temperature
    pub avg: f64,
}

/// Inclusive date-range filter over ISO `YYYY-MM-DD` strings.
///
/// Comparison is lexical; this matches chronological order only because
/// ISO date text sorts identically to it. No validation is performed on
/// the bounds: malformed text simply compares lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    /// Open-ended range: all dates from `start` onward.
    pub fn since(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Bounded range `[start, end]`, both ends inclusive.
    pub fn bounded(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Whether `date` falls inside this range (lexical comparison).
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && self.end.as_deref().is_none_or(|end| date <= end)
    }
}
