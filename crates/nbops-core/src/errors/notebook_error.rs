//! Notebook execution errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Failures of the external notebook engine, with enough context to
/// reproduce the run (template, output artifact, engine diagnostics).
#[derive(Debug, thiserror::Error)]
pub enum NotebookExecutionError {
    #[error("Failed to execute notebook: could not start `{program}`: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Failed to execute notebook: {notebook} timed out after {timeout_secs}s")]
    Timeout { notebook: PathBuf, timeout_secs: u64 },

    #[error(
        "Failed to execute notebook: {notebook} -> {output} exited with {}: {stderr}",
        describe_exit(.exit_code)
    )]
    EngineFailed {
        notebook: PathBuf,
        output: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to execute notebook: lost track of the engine process: {message}")]
    Join { message: String },

    #[error("Failed to execute notebook: invalid parameters: {message}")]
    InvalidParameters { message: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

impl ErrorCode for NotebookExecutionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::NOTEBOOK_TIMEOUT,
            _ => error_code::NOTEBOOK_EXECUTION_ERROR,
        }
    }
}
