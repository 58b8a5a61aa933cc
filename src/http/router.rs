//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression,
//! tracing), and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// Static segments win over path parameters, so `/precipitation`,
/// `/station` and `/tobs` are matched before the `{start}` routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The versioned prefix is kept verbatim from the public API surface.
    let api_v1 = Router::new()
        .route("/precipitation", get(handlers::precipitation))
        .route("/station", get(handlers::list_stations))
        .route("/tobs", get(handlers::temperature))
        .route("/{start}", get(handlers::temperature_stats_from))
        .route("/{start}/{end}", get(handlers::temperature_stats_range));

    // Combine all routes
    Router::new()
        .route("/", get(handlers::list_routes))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1.0", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
