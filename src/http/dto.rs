//! Data Transfer Objects for the HTTP API.
//!
//! The query result types already derive `Serialize` and are re-exported
//! from the api module; only the health response is HTTP-specific.

use serde::{Deserialize, Serialize};

// Re-export existing result types that are already serializable
pub use crate::api::{StationReadings, TemperatureSummary};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
