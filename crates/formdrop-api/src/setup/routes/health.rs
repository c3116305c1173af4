//! Health check handler and response type.

use crate::state::{AppState, ServiceMode};
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub mode: ServiceMode,
}

/// Liveness check. Reports which mode accepted submissions are handled in.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthCheckResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        mode: state.mode(),
    })
}
