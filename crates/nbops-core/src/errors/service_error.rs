//! Top-level service error aggregating every subsystem via `From` conversions.

use super::error_code::ErrorCode;
use super::{
    ConfigError, DriftDetectionError, ModelError, NotebookExecutionError, PredictionError,
    StorageError, TaskError,
};

/// Errors surfaced at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Notebook(#[from] NotebookExecutionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Drift(#[from] DriftDetectionError),

    #[error(transparent)]
    Task(#[from] TaskError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Notebook(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Prediction(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Drift(e) => e.error_code(),
            Self::Task(e) => e.error_code(),
        }
    }
}
