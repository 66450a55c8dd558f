//! Liveness endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use crate::services::ServiceHealthStatus;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub services: ServiceHealthStatus,
    pub issues: Vec<String>,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let services = state.services.health_check().await;
    let (code, status) = if services.is_healthy() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: crate::VERSION,
        issues: services.get_issues(),
        services,
    };
    (code, Json(body))
}
