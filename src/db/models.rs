//! Domain entities for the climate dataset.
//!
//! Both entities are pre-populated in the storage engine before the
//! service starts; the service never writes them.

use serde::{Deserialize, Serialize};

/// A single dated observation for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    /// Station code referencing [`Station::station`] (referential, not
    /// enforced by this service)
    pub station: String,
    /// ISO `YYYY-MM-DD` text; lexical order matches chronological order
    pub date: String,
    /// Precipitation reading, absent for some rows
    pub prcp: Option<f64>,
    /// Observed temperature
    pub tobs: f64,
}

/// A weather station and its fixed metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    /// Unique station code, the grouping key for observations
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}
