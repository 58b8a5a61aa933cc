//! End-to-end tests driving the axum router over the in-memory repository.

mod support;

use axum::http::StatusCode;
use std::sync::Arc;

use climate_api::db::repositories::LocalRepository;
use support::{get_json, get_raw, measurement, router_for, seeded_router, station};

#[tokio::test]
async fn test_root_lists_all_routes() {
    let router = seeded_router();
    let (status, body) = get_raw(&router, "/").await;
    let text = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("/api/v1.0/precipitation"));
    assert!(text.contains("/api/v1.0/station"));
    assert!(text.contains("/api/v1.0/tobs"));
    assert!(text.contains("/api/v1.0/start"));
    assert!(text.contains("/api/v1.0/start/end"));
    assert!(text.contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_health_reports_connected_database() {
    let router = seeded_router();
    let (status, json) = get_json(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_station_list_is_distinct_and_sorted() {
    let router = seeded_router();
    let (status, json) = get_json(&router, "/api/v1.0/station").await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<String> = serde_json::from_value(json).unwrap();
    assert_eq!(
        codes,
        vec!["USC00511918", "USC00513117", "USC00516128"],
        "ascending code order with no duplicates"
    );
}

#[tokio::test]
async fn test_precipitation_map_stays_inside_reporting_window() {
    let router = seeded_router();
    let (status, json) = get_json(&router, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let map = json.as_object().unwrap();
    // The station whose only measurement predates the window is absent.
    assert!(!map.contains_key("USC00516128"));

    for (_, dates) in map {
        for (date, _) in dates.as_object().unwrap() {
            assert!(
                date.as_str() >= "2016-08-23" && date.as_str() <= "2017-08-23",
                "date {} outside window",
                date
            );
        }
    }
}

#[tokio::test]
async fn test_precipitation_serializes_missing_reading_as_null() {
    let router = seeded_router();
    let (_, json) = get_json(&router, "/api/v1.0/precipitation").await;

    assert!(json["USC00511918"]["2017-03-01"].is_null());
    assert_eq!(json["USC00511918"]["2016-08-23"], 0.05);
}

#[tokio::test]
async fn test_tobs_map_projects_temperature() {
    let router = seeded_router();
    let (status, json) = get_json(&router, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    // Same row whose precipitation was null has a temperature reading.
    assert_eq!(json["USC00511918"]["2017-03-01"], 70.0);
    assert_eq!(json["USC00513117"]["2017-08-20"], 79.0);
}

#[tokio::test]
async fn test_stats_example_min_max_avg() {
    // End-to-end example from the behavior contract: two readings, one
    // station, open-ended range starting at the first date.
    let repo = LocalRepository::new();
    repo.insert_measurement(measurement(1, "USC1", "2017-08-22", None, 78.0));
    repo.insert_measurement(measurement(2, "USC1", "2017-08-23", None, 80.0));
    let router = router_for(Arc::new(repo));

    let (status, json) = get_json(&router, "/api/v1.0/2017-08-22").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!([{"station": "USC1", "min": 78.0, "max": 80.0, "avg": 79.0}])
    );
}

#[tokio::test]
async fn test_stats_range_orders_min_avg_max() {
    let router = seeded_router();
    let (status, json) = get_json(&router, "/api/v1.0/2016-01-01/2017-08-23").await;

    assert_eq!(status, StatusCode::OK);
    let stats = json.as_array().unwrap();
    assert!(!stats.is_empty());
    for entry in stats {
        let min = entry["min"].as_f64().unwrap();
        let max = entry["max"].as_f64().unwrap();
        let avg = entry["avg"].as_f64().unwrap();
        assert!(min <= avg && avg <= max, "min <= avg <= max violated");
    }
}

#[tokio::test]
async fn test_stats_range_omits_stations_without_matching_rows() {
    let router = seeded_router();
    let (_, json) = get_json(&router, "/api/v1.0/2017-08-01/2017-08-31").await;

    let stations: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["station"].as_str().unwrap())
        .collect();
    assert_eq!(stations, vec!["USC00511918", "USC00513117"]);
}

#[tokio::test]
async fn test_stats_open_ended_equals_range_to_max_date() {
    let router = seeded_router();
    let (_, open) = get_json(&router, "/api/v1.0/2016-01-01").await;
    let (_, bounded) = get_json(&router, "/api/v1.0/2016-01-01/2017-08-23").await;

    assert_eq!(open, bounded);
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let router = seeded_router();
    let (_, first) = get_raw(&router, "/api/v1.0/precipitation").await;
    let (_, second) = get_raw(&router, "/api/v1.0/precipitation").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_malformed_date_yields_empty_result_not_error() {
    let router = seeded_router();
    let (status, json) = get_json(&router, "/api/v1.0/not-a-date").await;

    // "not-a-date" compares lexically above every ISO date, so nothing
    // matches; still a 200 with an empty array.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_empty_dataset_shapes() {
    let router = router_for(Arc::new(LocalRepository::new()));

    let (_, precipitation) = get_json(&router, "/api/v1.0/precipitation").await;
    assert_eq!(precipitation, serde_json::json!({}));

    let (_, stations) = get_json(&router, "/api/v1.0/station").await;
    assert_eq!(stations, serde_json::json!([]));

    let (_, tobs) = get_json(&router, "/api/v1.0/tobs").await;
    assert_eq!(tobs, serde_json::json!({}));

    let (_, stats) = get_json(&router, "/api/v1.0/2017-01-01").await;
    assert_eq!(stats, serde_json::json!([]));
}

#[tokio::test]
async fn test_station_route_not_shadowed_by_start_parameter() {
    // Static segments must win over the {start} path parameter.
    let repo = LocalRepository::new();
    repo.insert_station(station(1, "USC1", "Test Station"));
    let router = router_for(Arc::new(repo));

    let (status, json) = get_json(&router, "/api/v1.0/station").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(["USC1"]));
}
