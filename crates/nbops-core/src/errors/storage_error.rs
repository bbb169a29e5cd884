//! File-system errors for persisted batches, predictions and reports.

use std::path::{Path, PathBuf};

use super::error_code::{self, ErrorCode};

/// Errors raised while reading or writing service artifacts.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("CSV error in {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("JSON error in {path}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("Invalid glob pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },
}

impl StorageError {
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn csv(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn json(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
