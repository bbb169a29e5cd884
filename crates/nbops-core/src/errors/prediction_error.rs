//! Prediction workflow errors.

use super::error_code::{self, ErrorCode};
use super::{NotebookExecutionError, StorageError};

/// Errors from the persist → execute → read-back prediction workflow.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Execution(#[from] NotebookExecutionError),

    #[error("Prediction count mismatch: {expected} input records, {actual} predictions")]
    OutputLengthMismatch { expected: usize, actual: usize },

    #[error("No feature columns in {records} input records")]
    EmptyFeatures { records: usize },
}

impl ErrorCode for PredictionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Execution(e) => e.error_code(),
            Self::OutputLengthMismatch { .. } => error_code::OUTPUT_LENGTH_MISMATCH,
            Self::EmptyFeatures { .. } => error_code::EMPTY_FEATURES,
        }
    }
}
