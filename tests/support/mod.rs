//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use climate_api::db::models::{Measurement, Station};
use climate_api::db::repositories::LocalRepository;
use climate_api::db::repository::ClimateRepository;
use climate_api::http::{create_router, AppState};

pub fn measurement(id: i64, station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        id,
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}

pub fn station(id: i64, code: &str, name: &str) -> Station {
    Station {
        id,
        station: code.to_string(),
        name: name.to_string(),
        latitude: 21.27,
        longitude: -157.82,
        elevation: 3.0,
    }
}

/// A small fixture dataset: three stations, measurements spanning two
/// years so the last-year window cuts off older rows. The newest date is
/// 2017-08-23, making the reporting window `[2016-08-23, 2017-08-23]`.
pub fn seeded_repository() -> Arc<LocalRepository> {
    let repo = LocalRepository::new();

    repo.insert_station(station(1, "USC00511918", "Honolulu Observatory"));
    repo.insert_station(station(2, "USC00513117", "Kaneohe"));
    repo.insert_station(station(3, "USC00516128", "Manoa Lyon Arboretum"));

    // Inside the reporting window.
    repo.insert_measurement(measurement(1, "USC00511918", "2016-08-23", Some(0.05), 76.0));
    repo.insert_measurement(measurement(2, "USC00511918", "2017-03-01", None, 70.0));
    repo.insert_measurement(measurement(3, "USC00511918", "2017-08-23", Some(0.00), 81.0));
    repo.insert_measurement(measurement(4, "USC00513117", "2017-01-15", Some(1.20), 68.0));
    repo.insert_measurement(measurement(5, "USC00513117", "2017-08-20", Some(0.32), 79.0));
    // Outside the reporting window.
    repo.insert_measurement(measurement(6, "USC00511918", "2015-12-31", Some(0.40), 72.0));
    repo.insert_measurement(measurement(7, "USC00516128", "2016-08-01", Some(2.10), 74.0));

    Arc::new(repo)
}

/// Build the application router over the given repository.
pub fn router_for(repo: Arc<LocalRepository>) -> Router {
    create_router(AppState::new(repo as Arc<dyn ClimateRepository>))
}

/// Router over the standard fixture dataset.
pub fn seeded_router() -> Router {
    router_for(seeded_repository())
}

/// Issue a GET request and return the status plus raw body bytes.
pub async fn get_raw(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request is handled");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    (status, bytes.to_vec())
}

/// Issue a GET request and parse the body as JSON.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = get_raw(router, uri).await;
    let json = serde_json::from_slice(&bytes).expect("body is valid JSON");
    (status, json)
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes
/// access to process-global env vars to avoid flaky tests when Rust runs
/// tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
