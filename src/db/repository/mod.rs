//! Repository trait for read-only access to the climate observation store.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{ObservationRow, TemperatureSummary};

/// Which reading a map query projects from the measurement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// The nullable precipitation column
    Precipitation,
    /// The observed temperature column
    Temperature,
}

/// Repository trait for the climate observation store.
///
/// Every operation is a bounded, synchronous read against a local
/// dataset; implementations never mutate it. Each call acquires its own
/// storage handle (or reads under a shared lock), so concurrent requests
/// need no coordination beyond what the implementation provides.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ClimateRepository: Send + Sync {
    /// Lexical maximum of the measurement date column.
    ///
    /// # Returns
    /// * `Ok(Some(date))` - The newest date present in the dataset
    /// * `Ok(None)` - The dataset holds no measurements
    /// * `Err(RepositoryError)` - If the query fails
    async fn latest_date(&self) -> RepositoryResult<Option<String>>;

    /// All measurements with `date >= start`, projected to the requested
    /// reading, ordered by station code ascending then date.
    ///
    /// The ordering guarantee matters: callers group the rows by
    /// detecting station-code boundaries in the stream.
    async fn observations_since(
        &self,
        start: &str,
        reading: Reading,
    ) -> RepositoryResult<Vec<ObservationRow>>;

    /// Distinct station codes from the station table, ascending.
    async fn station_codes(&self) -> RepositoryResult<Vec<String>>;

    /// Per-station min/max/avg of observed temperature over `[start, end]`
    /// (open-ended when `end` is `None`), ordered by station code.
    ///
    /// Stations with no matching measurements are omitted, matching
    /// group-by semantics.
    async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> RepositoryResult<Vec<TemperatureSummary>>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
