//! Application state for the HTTP server.

use crate::db::repository::ClimateRepository;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn ClimateRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn ClimateRepository>) -> Self {
        Self { repository }
    }
}
