//! Background task errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Job {id} not found")]
    NotFound { id: String },
}

impl ErrorCode for TaskError {
    fn error_code(&self) -> &'static str {
        error_code::JOB_NOT_FOUND
    }
}
