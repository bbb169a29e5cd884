use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use nbops_core::models::{JobKind, TrainingRequest, TrainingResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Start retraining in the background and acknowledge immediately.
pub async fn retrain(
    State(state): State<AppState>,
    payload: Result<Json<TrainingRequest>, JsonRejection>,
) -> Result<Json<TrainingResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        training_data = %request.training_data_path,
        model_version = %request.model_version,
        "retraining request received"
    );

    let retraining = std::sync::Arc::clone(&state.retraining);
    let job = state.tasks.submit(JobKind::Retrain, async move {
        retraining
            .retrain(
                &request.training_data_path,
                &request.model_version,
                request.hyperparameters,
            )
            .await
    });

    Ok(Json(TrainingResponse::started(job.id)))
}
