use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Notebook engine invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Per-run execution timeout in seconds.
    pub timeout_secs: u64,
    /// Jupyter kernel the engine starts.
    pub kernel_name: String,
    /// Engine executable (resolved through `PATH`).
    pub engine_program: String,
    pub progress_bar: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::DEFAULT_EXECUTION_TIMEOUT_SECS,
            kernel_name: constants::DEFAULT_KERNEL_NAME.to_string(),
            engine_program: constants::DEFAULT_ENGINE_PROGRAM.to_string(),
            progress_bar: constants::DEFAULT_PROGRESS_BAR,
        }
    }
}

impl ExecutionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
