//! Health Routes
//!
//! Health check endpoints for monitoring and orchestrator health checks.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (dataset loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready once the daily record set holds at least one row. Hourly data
/// is optional; views that need it report no data instead.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.dataset.daily().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let daily_records = state.dataset.daily().len();
    let hourly_records = state.dataset.hourly().len();

    let status = if daily_records > 0 && hourly_records > 0 {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        daily_records,
        hourly_records,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
