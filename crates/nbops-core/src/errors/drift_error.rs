//! Drift detection errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};
use super::StorageError;

/// Errors that can occur while comparing reference and production data.
#[derive(Debug, thiserror::Error)]
pub enum DriftDetectionError {
    #[error("Reference dataset not found: {path}")]
    ReferenceMissing { path: PathBuf },

    #[error("No persisted input batches in {dir}")]
    NoCurrentData { dir: PathBuf },

    #[error("Reference and current data share no columns (reference: {reference:?}, current: {current:?})")]
    NoSharedColumns {
        reference: Vec<String>,
        current: Vec<String>,
    },

    #[error("Drift engine failed: {message}")]
    Engine { message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for DriftDetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            _ => error_code::DRIFT_DETECTION_ERROR,
        }
    }
}
