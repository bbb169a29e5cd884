use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use nbops_core::models::JobRecord;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_job(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<JobRecord>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.tasks.try_get(&id)?))
}

/// Every known job, newest first.
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<JobRecord>> {
    Json(state.tasks.list())
}
