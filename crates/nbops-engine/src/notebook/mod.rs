//! Notebook execution: the engine seam and the orchestrator built on it.

pub mod executor;
pub mod papermill;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use nbops_core::errors::NotebookExecutionError;
use serde_json::{Map, Value};

pub use executor::NotebookExecutor;
pub use papermill::PapermillEngine;

/// Parameter mapping injected into the notebook's parameters cell.
pub type Parameters = Map<String, Value>;

/// One notebook run as handed to an engine.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Template notebook.
    pub notebook: PathBuf,
    /// Where the executed copy is written.
    pub output: PathBuf,
    pub parameters: Parameters,
    pub kernel_name: String,
    pub timeout: Duration,
}

/// External notebook runner.
///
/// Implementations produce the executed artifact at `request.output` and
/// whatever side outputs the notebook itself writes, or fail.
#[async_trait]
pub trait NotebookEngine: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> Result<(), NotebookExecutionError>;
}
