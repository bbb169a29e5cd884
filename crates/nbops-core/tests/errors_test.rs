//! Error codes and `From` conversions across the error taxonomy.

use std::path::{Path, PathBuf};

use nbops_core::errors::{
    ConfigError, DriftDetectionError, ErrorCode, ModelError, NotebookExecutionError,
    PredictionError, ServiceError, StorageError, TaskError,
};

#[test]
fn test_every_subsystem_has_a_code() {
    let config = ConfigError::FileNotFound {
        path: "nbops.toml".into(),
    };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let timeout = NotebookExecutionError::Timeout {
        notebook: PathBuf::from("pipeline.ipynb"),
        timeout_secs: 300,
    };
    assert_eq!(timeout.error_code(), "NOTEBOOK_TIMEOUT");

    let failed = NotebookExecutionError::EngineFailed {
        notebook: PathBuf::from("pipeline.ipynb"),
        output: PathBuf::from("executed/prediction_x.ipynb"),
        exit_code: Some(1),
        stderr: "PapermillExecutionError".into(),
    };
    assert_eq!(failed.error_code(), "NOTEBOOK_EXECUTION_ERROR");

    let model = ModelError::NotFound {
        version: "v9".into(),
        path: "models/v9".into(),
    };
    assert_eq!(model.error_code(), "MODEL_NOT_FOUND");

    let task = TaskError::NotFound { id: "abc".into() };
    assert_eq!(task.error_code(), "JOB_NOT_FOUND");

    let mismatch = PredictionError::OutputLengthMismatch {
        expected: 2,
        actual: 1,
    };
    assert_eq!(mismatch.error_code(), "OUTPUT_LENGTH_MISMATCH");

    let empty = PredictionError::EmptyFeatures { records: 3 };
    assert_eq!(empty.error_code(), "EMPTY_FEATURES");
    assert_eq!(empty.to_string(), "No feature columns in 3 input records");
}

#[test]
fn test_messages_carry_context() {
    let failed = NotebookExecutionError::EngineFailed {
        notebook: PathBuf::from("pipeline.ipynb"),
        output: PathBuf::from("out.ipynb"),
        exit_code: Some(2),
        stderr: "boom".into(),
    };
    let msg = failed.to_string();
    assert!(msg.starts_with("Failed to execute notebook"));
    assert!(msg.contains("status 2"));
    assert!(msg.contains("boom"));

    let killed = NotebookExecutionError::EngineFailed {
        notebook: PathBuf::from("pipeline.ipynb"),
        output: PathBuf::from("out.ipynb"),
        exit_code: None,
        stderr: String::new(),
    };
    assert!(killed.to_string().contains("signal"));

    let timeout = NotebookExecutionError::Timeout {
        notebook: PathBuf::from("pipeline.ipynb"),
        timeout_secs: 5,
    };
    assert!(timeout.to_string().contains("timed out after 5s"));
}

#[test]
fn test_coded_string_format() {
    let err = StorageError::io(Path::new("data/input/x.csv"), "permission denied");
    assert_eq!(
        err.coded_string(),
        "[STORAGE_ERROR] I/O error on data/input/x.csv: permission denied"
    );
}

#[test]
fn test_from_conversions_preserve_codes() {
    let storage = StorageError::csv(Path::new("ref.csv"), "bad row");
    let prediction: PredictionError = storage.into();
    assert_eq!(prediction.error_code(), "STORAGE_ERROR");

    let drift: DriftDetectionError = StorageError::json(Path::new("r.json"), "eof").into();
    let service: ServiceError = drift.into();
    assert_eq!(service.error_code(), "STORAGE_ERROR");

    let execution = NotebookExecutionError::SpawnFailed {
        program: "papermill".into(),
        message: "not found".into(),
    };
    let service: ServiceError = PredictionError::from(execution).into();
    assert_eq!(service.error_code(), "NOTEBOOK_EXECUTION_ERROR");
    assert!(service.to_string().contains("could not start `papermill`"));

    let service: ServiceError = DriftDetectionError::ReferenceMissing {
        path: PathBuf::from("data/reference_data.csv"),
    }
    .into();
    assert_eq!(service.error_code(), "DRIFT_DETECTION_ERROR");
}
