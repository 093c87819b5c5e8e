//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (roster loads)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 only if the roster spreadsheet currently loads.
pub async fn readiness(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    Ok(match state.load_roster().await? {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    })
}

/// GET /health
///
/// Full health status with roster details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    let (status, roster, students, error) = match state.load_roster().await? {
        Ok(roster) => ("healthy", "ok", Some(roster.len()), None),
        Err(e) => ("unhealthy", "error", None, Some(e.to_string())),
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        roster: roster.to_string(),
        students,
        error,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
