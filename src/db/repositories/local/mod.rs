//! In-memory repository for unit testing and local development.
//!
//! Holds the dataset behind a `parking_lot::RwLock`; reads take a shared
//! lock, so concurrent requests never block each other. Seeding happens
//! through explicit insert methods, never through the query surface.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::api::{DateRange, ObservationRow, TemperatureSummary};
use crate::db::models::{Measurement, Station};
use crate::db::repository::{ClimateRepository, Reading, RepositoryResult};

#[derive(Debug, Default)]
struct Store {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
}

/// In-memory implementation of [`ClimateRepository`].
#[derive(Debug, Default)]
pub struct LocalRepository {
    inner: RwLock<Store>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one measurement. The HTTP surface is strictly read-only;
    /// this exists for tests and local development only.
    pub fn insert_measurement(&self, measurement: Measurement) {
        self.inner.write().measurements.push(measurement);
    }

    /// Seed one station.
    pub fn insert_station(&self, station: Station) {
        self.inner.write().stations.push(station);
    }
}

#[async_trait]
impl ClimateRepository for LocalRepository {
    async fn latest_date(&self) -> RepositoryResult<Option<String>> {
        let store = self.inner.read();
        Ok(store.measurements.iter().map(|m| m.date.clone()).max())
    }

    async fn observations_since(
        &self,
        start: &str,
        reading: Reading,
    ) -> RepositoryResult<Vec<ObservationRow>> {
        let store = self.inner.read();
        let mut rows: Vec<ObservationRow> = store
            .measurements
            .iter()
            .filter(|m| m.date.as_str() >= start)
            .map(|m| {
                let value = match reading {
                    Reading::Precipitation => m.prcp,
                    Reading::Temperature => Some(m.tobs),
                };
                ObservationRow::new(m.station.clone(), m.date.clone(), value)
            })
            .collect();
        rows.sort_by(|a, b| a.station.cmp(&b.station).then_with(|| a.date.cmp(&b.date)));
        Ok(rows)
    }

    async fn station_codes(&self) -> RepositoryResult<Vec<String>> {
        let store = self.inner.read();
        let mut codes: Vec<String> = store.stations.iter().map(|s| s.station.clone()).collect();
        codes.sort();
        codes.dedup();
        Ok(codes)
    }

    async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> RepositoryResult<Vec<TemperatureSummary>> {
        let store = self.inner.read();
        let range = match end {
            Some(end) => DateRange::bounded(start, end),
            None => DateRange::since(start),
        };

        // BTreeMap keyed by station code gives group-by with ascending
        // output order in one pass.
        let mut groups: BTreeMap<&str, (f64, f64, f64, usize)> = BTreeMap::new();
        for m in store.measurements.iter().filter(|m| range.contains(&m.date)) {
            let entry = groups
                .entry(m.station.as_str())
                .or_insert((f64::INFINITY, f64::NEG_INFINITY, 0.0, 0));
            entry.0 = entry.0.min(m.tobs);
            entry.1 = entry.1.max(m.tobs);
            entry.2 += m.tobs;
            entry.3 += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(station, (min, max, sum, count))| TemperatureSummary {
                station: station.to_string(),
                min,
                max,
                avg: sum / count as f64,
            })
            .collect())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
