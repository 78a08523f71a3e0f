//! Application State
//!
//! Shared state accessible by all API handlers.
//! The dataset is immutable, so handlers share it through an `Arc`
//! without any locking.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::dataset::Dataset;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded record sets
    pub dataset: Arc<Dataset>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: ApiConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
