//! SQLite repository implementation using Diesel.
//!
//! This module implements [`ClimateRepository`] against the SQLite
//! climate dataset. The dataset is read-only; the only DDL this module
//! ever runs is the embedded migration, which creates the two tables
//! when they are absent and leaves a pre-populated database untouched.
//!
//! ## Features
//!
//! - Connection pooling with r2d2, so each concurrent request gets its
//!   own SQLite handle
//! - Diesel work bridged into async via `spawn_blocking`
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `CLIMATE_DATABASE_URL`: Path to the SQLite file (required)
//! - `CLIMATE_POOL_MAX`: Maximum pool size (default: 10)
//! - `CLIMATE_POOL_MIN`: Minimum pool size (default: 1)
//! - `CLIMATE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `CLIMATE_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::dsl::{avg, max, min};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::api::{ObservationRow, TemperatureSummary};
use crate::db::repository::{
    ClimateRepository, ErrorContext, Reading, RepositoryError, RepositoryResult,
};

mod models;
mod schema;

use models::MeasurementRow;
use schema::{measurement, station};

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/sqlite/migrations");

/// Configuration for opening the SQLite dataset.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path or URL of the SQLite database file
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `CLIMATE_DATABASE_URL`: SQLite file path (required)
    /// - `CLIMATE_POOL_MAX`: Maximum pool size (default: 10)
    /// - `CLIMATE_POOL_MIN`: Minimum pool size (default: 1)
    /// - `CLIMATE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `CLIMATE_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("CLIMATE_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or CLIMATE_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("CLIMATE_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("CLIMATE_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("CLIMATE_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("CLIMATE_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for the SQLite climate dataset.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open the dataset and run pending migrations.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(SqliteRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run a Diesel closure on a pooled connection inside `spawn_blocking`.
    ///
    /// Every request checks out its own connection; a failure is fatal to
    /// that request, never retried.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(RepositoryError::from)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

#[async_trait]
impl ClimateRepository for SqliteRepository {
    async fn latest_date(&self) -> RepositoryResult<Option<String>> {
        self.with_conn(|conn| {
            let latest = measurement::table
                .select(max(measurement::date))
                .first::<Option<String>>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("latest_date"))?;
            Ok(latest)
        })
        .await
    }

    async fn observations_since(
        &self,
        start: &str,
        reading: Reading,
    ) -> RepositoryResult<Vec<ObservationRow>> {
        let start = start.to_string();
        self.with_conn(move |conn| {
            let rows = measurement::table
                .filter(measurement::date.ge(start))
                .order((measurement::station.asc(), measurement::date.asc()))
                .select(MeasurementRow::as_select())
                .load::<MeasurementRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("observations_since"))?;

            Ok(rows
                .into_iter()
                .map(|row| {
                    let value = match reading {
                        Reading::Precipitation => row.prcp,
                        Reading::Temperature => Some(row.tobs),
                    };
                    ObservationRow {
                        station: row.station,
                        date: row.date,
                        value,
                    }
                })
                .collect())
        })
        .await
    }

    async fn station_codes(&self) -> RepositoryResult<Vec<String>> {
        self.with_conn(|conn| {
            let codes = station::table
                .select(station::station)
                .distinct()
                .order(station::station.asc())
                .load::<String>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("station_codes"))?;
            Ok(codes)
        })
        .await
    }

    async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> RepositoryResult<Vec<TemperatureSummary>> {
        let start = start.to_string();
        let end = end.map(str::to_string);
        self.with_conn(move |conn| {
            let mut query = measurement::table
                .group_by(measurement::station)
                .select((
                    measurement::station,
                    min(measurement::tobs),
                    max(measurement::tobs),
                    avg(measurement::tobs),
                ))
                .order(measurement::station.asc())
                .into_boxed();

            query = query.filter(measurement::date.ge(start));
            if let Some(end) = end {
                query = query.filter(measurement::date.le(end));
            }

            let rows = query
                .load::<(String, Option<f64>, Option<f64>, Option<f64>)>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("temperature_stats"))?;

            // The aggregates are nullable at the type level but never null
            // in practice: group-by only yields non-empty groups and tobs
            // is NOT NULL.
            Ok(rows
                .into_iter()
                .filter_map(|(station, min, max, avg)| match (min, max, avg) {
                    (Some(min), Some(max), Some(avg)) => Some(TemperatureSummary {
                        station,
                        min,
                        max,
                        avg,
                    }),
                    _ => None,
                })
                .collect())
        })
        .await
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))?;
            Ok(true)
        })
        .await
    }
}
