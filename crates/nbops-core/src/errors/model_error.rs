//! Model artifact errors.

use super::error_code::{self, ErrorCode};

/// Model lookup errors. Reserved: the notebook owns model loading today,
/// so no workflow raises this yet.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model {version} not found at {path}")]
    NotFound { version: String, path: String },
}

impl ErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_NOT_FOUND
    }
}
