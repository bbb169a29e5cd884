//! HTTP handlers.

pub mod drift;
pub mod health;
pub mod jobs;
pub mod metrics;
pub mod predict;
pub mod retrain;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict::predict))
        .route("/retrain", post(retrain::retrain))
        .route("/drift-report", get(drift::drift_report))
        .route("/check-drift", post(drift::check_drift))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/:id", get(jobs::get_job))
}
