//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub extractor: HealthCheckResult,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the extraction adapter)
///
/// A degraded extractor still counts as ready: claims can be entered by hand.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let extractor = state.extractor.health_check().await;

    let (code, status) = match extractor.status {
        AdapterHealth::Healthy => (StatusCode::OK, "ready"),
        AdapterHealth::Degraded => (StatusCode::OK, "degraded"),
        AdapterHealth::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extractor,
        }),
    )
}
