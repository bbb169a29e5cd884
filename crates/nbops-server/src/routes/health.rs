use axum::extract::State;
use axum::Json;
use nbops_core::models::HealthResponse;

use crate::state::AppState;

/// Liveness probe.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        &state.config.server.app_name,
        &state.config.server.version,
    ))
}
