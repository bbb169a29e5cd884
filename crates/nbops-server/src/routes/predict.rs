use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use nbops_core::models::{PredictionRequest, PredictionResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Run one prediction batch through the notebook.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload?;
    let started = Instant::now();
    tracing::info!(records = request.data.len(), "prediction request received");
    if let Some(requested) = &request.model_version {
        tracing::info!(
            requested = %requested,
            configured = %state.config.prediction.model_version,
            "request model_version ignored, using configured model"
        );
    }

    let result = state.prediction.predict(&request.data).await;
    state.metrics.observe_latency(started.elapsed());

    match result {
        Ok(response) => {
            state
                .metrics
                .record_predictions(&response.model_version, response.predictions.len());
            Ok(Json(response))
        }
        Err(e) => {
            state.metrics.record_prediction_error();
            Err(ApiError::from(e))
        }
    }
}
