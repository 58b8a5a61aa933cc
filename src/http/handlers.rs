//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one route and delegates to the service
//! layer, then serializes the result as JSON. All routes are GET and
//! read-only.

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::api::{StationReadings, TemperatureSummary};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Static route listing served from the service root.
const ROUTE_LISTING: &str = concat!(
    "Available Routes:<br/>",
    "/api/v1.0/precipitation -- final 12 months of precipitation per station as a JSON map<br/>",
    "/api/v1.0/station -- JSON list of station codes<br/>",
    "/api/v1.0/tobs -- final 12 months of temperature observations per station as a JSON map<br/>",
    "/api/v1.0/start -- min/max/avg temperature for all dates from start onward<br/>",
    "/api/v1.0/start/end -- min/max/avg temperature for all dates from start to end<br/>",
    "Note that start and end are variables to be replaced with dates supplied in YYYY-MM-DD format",
);

// =============================================================================
// Root & Health
// =============================================================================

/// GET /
///
/// List all available API routes. No side effects, cannot fail.
pub async fn list_routes() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1.0".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Climate Queries
// =============================================================================

/// GET /api/v1.0/precipitation
///
/// Final 12 months of precipitation data, keyed by station code then
/// date. Missing readings serialize as JSON null.
pub async fn precipitation(State(state): State<AppState>) -> HandlerResult<StationReadings> {
    let readings = db_services::precipitation_last_year(state.repository.as_ref()).await?;
    Ok(Json(readings))
}

/// GET /api/v1.0/station
///
/// JSON list of distinct station codes, ascending.
pub async fn list_stations(State(state): State<AppState>) -> HandlerResult<Vec<String>> {
    let codes = db_services::list_stations(state.repository.as_ref()).await?;
    Ok(Json(codes))
}

/// GET /api/v1.0/tobs
///
/// Final 12 months of temperature observations, keyed by station code
/// then date.
pub async fn temperature(State(state): State<AppState>) -> HandlerResult<StationReadings> {
    let readings = db_services::temperature_last_year(state.repository.as_ref()).await?;
    Ok(Json(readings))
}

/// GET /api/v1.0/{start}
///
/// Min/max/avg temperature per station for all dates from `start`
/// onward. The date is not validated; malformed text compares lexically.
pub async fn temperature_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> HandlerResult<Vec<TemperatureSummary>> {
    let stats = db_services::temperature_stats(state.repository.as_ref(), &start, None).await?;
    Ok(Json(stats))
}

/// GET /api/v1.0/{start}/{end}
///
/// Min/max/avg temperature per station for dates in `[start, end]`,
/// both ends inclusive.
pub async fn temperature_stats_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> HandlerResult<Vec<TemperatureSummary>> {
    let stats =
        db_services::temperature_stats(state.repository.as_ref(), &start, Some(&end)).await?;
    Ok(Json(stats))
}
