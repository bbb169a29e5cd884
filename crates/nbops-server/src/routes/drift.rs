use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nbops_core::models::DriftReport;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Acknowledgment of a background drift check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftCheckAccepted {
    pub status: String,
    pub job_id: Uuid,
}

/// Most recent drift result; runs a check only when none exists yet.
pub async fn drift_report(State(state): State<AppState>) -> Result<Json<DriftReport>, ApiError> {
    let latest = state.drift.latest_report().await?;
    if latest.is_measured() {
        state.metrics.set_drift_score(latest.report.drift_score);
    }
    Ok(Json(latest.report))
}

/// Queue a drift check and return 202 with its job id.
pub async fn check_drift(State(state): State<AppState>) -> (StatusCode, Json<DriftCheckAccepted>) {
    let job = state.submit_drift_check();
    tracing::info!(job_id = %job.id, "drift check requested");
    (
        StatusCode::ACCEPTED,
        Json(DriftCheckAccepted {
            status: "drift_check_started".to_string(),
            job_id: job.id,
        }),
    )
}
