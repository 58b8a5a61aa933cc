//! Service layer for the climate query operations.
//!
//! These functions hold the behavior shared by every repository backend:
//! reporting-window computation, run-grouping of ordered observation
//! rows, and result shaping. HTTP handlers call into this layer rather
//! than touching repositories directly.

use std::collections::BTreeMap;

use crate::api::{ObservationRow, StationReadings, TemperatureSummary};
use crate::db::repository::{ClimateRepository, Reading, RepositoryResult};
use crate::models::time;

/// Lexical maximum of the measurement dates, if the dataset is non-empty.
pub async fn latest_date<R: ClimateRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Option<String>> {
    repo.latest_date().await
}

/// Start of the 12-month reporting window ending at `last_date`.
///
/// Returns `None` when `last_date` is not parseable as an ISO date;
/// callers fall back to an empty result in that case. Feb 29 clamps to
/// Feb 28 (see [`time::year_before`]).
pub fn reporting_window_start(last_date: &str) -> Option<String> {
    time::parse_iso_date(last_date).map(|date| time::format_iso_date(time::year_before(date)))
}

/// Group rows ordered by station code into station -> date -> value maps.
///
/// Station codes must arrive in contiguous runs; each run becomes one
/// inner map. Should a code ever reappear in a later run, that run
/// replaces the earlier map, preserving single-pass grouping semantics
/// rather than merging into a multi-map.
pub fn group_by_station(rows: Vec<ObservationRow>) -> StationReadings {
    let mut grouped = StationReadings::new();
    let mut current: Option<(String, BTreeMap<String, Option<f64>>)> = None;

    for row in rows {
        match current {
            Some((ref station, ref mut dates)) if *station == row.station => {
                dates.insert(row.date, row.value);
            }
            _ => {
                if let Some((station, dates)) = current.take() {
                    grouped.insert(station, dates);
                }
                let mut dates = BTreeMap::new();
                dates.insert(row.date, row.value);
                current = Some((row.station, dates));
            }
        }
    }
    if let Some((station, dates)) = current {
        grouped.insert(station, dates);
    }

    grouped
}

/// Shared body of the two last-year map operations.
async fn readings_last_year<R: ClimateRepository + ?Sized>(
    repo: &R,
    reading: Reading,
) -> RepositoryResult<StationReadings> {
    let Some(last_date) = repo.latest_date().await? else {
        return Ok(StationReadings::new());
    };
    let Some(window_start) = reporting_window_start(&last_date) else {
        log::warn!("measurement max date {last_date:?} is not ISO formatted; returning empty map");
        return Ok(StationReadings::new());
    };

    let rows = repo.observations_since(&window_start, reading).await?;
    Ok(group_by_station(rows))
}

/// Final 12 months of precipitation readings, grouped per station.
pub async fn precipitation_last_year<R: ClimateRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<StationReadings> {
    readings_last_year(repo, Reading::Precipitation).await
}

/// Final 12 months of temperature observations, grouped per station.
pub async fn temperature_last_year<R: ClimateRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<StationReadings> {
    readings_last_year(repo, Reading::Temperature).await
}

/// Distinct station codes in ascending order.
pub async fn list_stations<R: ClimateRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<String>> {
    repo.station_codes().await
}

/// Per-station min/max/avg temperature over `[start, end]`, open-ended
/// when `end` is `None`. Stations without matching measurements are
/// omitted; an empty dataset yields an empty list.
pub async fn temperature_stats<R: ClimateRepository + ?Sized>(
    repo: &R,
    start: &str,
    end: Option<&str>,
) -> RepositoryResult<Vec<TemperatureSummary>> {
    repo.temperature_stats(start, end).await
}

/// Verify the backing store is reachable.
pub async fn health_check<R: ClimateRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}
