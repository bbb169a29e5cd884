//! Structured log events for key service operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::path::Path;

/// Log the start of a notebook run.
pub fn notebook_started(notebook: &Path, output: &Path, parameters: &serde_json::Value) {
    tracing::info!(
        event = "notebook_started",
        notebook = %notebook.display(),
        output = %output.display(),
        parameters = %parameters,
        "executing notebook"
    );
}

/// Log a successful notebook run.
pub fn notebook_completed(output: &Path, elapsed_ms: u128) {
    tracing::info!(
        event = "notebook_completed",
        output = %output.display(),
        elapsed_ms = elapsed_ms as u64,
        "notebook executed successfully"
    );
}

/// Log a failed notebook run.
pub fn notebook_failed(output: &Path, error: &str) {
    tracing::error!(
        event = "notebook_failed",
        output = %output.display(),
        error = %error,
        "notebook execution failed"
    );
}

/// Log a persisted input batch.
pub fn input_persisted(path: &Path, rows: usize) {
    tracing::info!(
        event = "input_persisted",
        path = %path.display(),
        rows = rows,
        "saved input data"
    );
}

/// Log a notebook output whose length differs from the input batch.
pub fn prediction_length_mismatch(expected: usize, actual: usize) {
    tracing::warn!(
        event = "prediction_length_mismatch",
        expected = expected,
        actual = actual,
        "prediction count does not match input record count"
    );
}

/// Log a retraining run transition.
pub fn retrain_started(model_version: &str, training_data: &str) {
    tracing::info!(
        event = "retrain_started",
        model_version = %model_version,
        training_data = %training_data,
        "starting model retraining"
    );
}

pub fn retrain_completed(model_version: &str) {
    tracing::info!(
        event = "retrain_completed",
        model_version = %model_version,
        "model retraining completed"
    );
}

/// Log the outcome of a drift check.
pub fn drift_checked(drift_score: f64, drift_detected: bool, affected: &[String]) {
    tracing::info!(
        event = "drift_checked",
        drift_score = drift_score,
        drift_detected = drift_detected,
        affected_features = ?affected,
        "drift check completed"
    );
}

/// Log a background job state change.
pub fn job_transition(job_id: &str, kind: &str, state: &str) {
    tracing::info!(
        event = "job_transition",
        job_id = %job_id,
        kind = %kind,
        state = %state,
        "background job state changed"
    );
}

/// Log a background job failure.
pub fn job_failed(job_id: &str, kind: &str, error: &str) {
    tracing::error!(
        event = "job_failed",
        job_id = %job_id,
        kind = %kind,
        error = %error,
        "background job failed"
    );
}
