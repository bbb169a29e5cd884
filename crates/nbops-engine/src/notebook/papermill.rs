//! `papermill` CLI driver.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use nbops_core::config::ExecutionConfig;
use nbops_core::errors::NotebookExecutionError;
use tokio::process::Command;

use super::{ExecutionRequest, NotebookEngine};

/// Trailing stderr kept on failures.
const STDERR_TAIL_CHARS: usize = 2_000;

/// Runs notebooks through the `papermill` executable as a child process.
///
/// Parameters travel as YAML through `--parameters_yaml`. The child is killed
/// when the run exceeds its timeout.
#[derive(Debug, Clone)]
pub struct PapermillEngine {
    program: String,
    progress_bar: bool,
}

impl PapermillEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            progress_bar: false,
        }
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self {
            program: config.engine_program.clone(),
            progress_bar: config.progress_bar,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command line for `request`, without spawning it.
    pub fn command(&self, request: &ExecutionRequest) -> Result<Command, NotebookExecutionError> {
        let parameters_yaml = serde_yaml::to_string(&request.parameters).map_err(|e| {
            NotebookExecutionError::InvalidParameters {
                message: e.to_string(),
            }
        })?;

        let mut cmd = Command::new(&self.program);
        cmd.arg(&request.notebook)
            .arg(&request.output)
            .arg("-k")
            .arg(&request.kernel_name)
            .arg("--parameters_yaml")
            .arg(parameters_yaml)
            .arg("--execution-timeout")
            .arg(request.timeout.as_secs().to_string())
            .arg("--request-save-on-cell-execute")
            .arg(if self.progress_bar {
                "--progress-bar"
            } else {
                "--no-progress-bar"
            })
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(cmd)
    }
}

#[async_trait]
impl NotebookEngine for PapermillEngine {
    async fn execute(&self, request: ExecutionRequest) -> Result<(), NotebookExecutionError> {
        let mut cmd = self.command(&request)?;
        let child = cmd.spawn().map_err(|e| NotebookExecutionError::SpawnFailed {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        let output = match tokio::time::timeout(request.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| NotebookExecutionError::Join {
                message: e.to_string(),
            })?,
            // Dropping the future drops the child, which kills it.
            Err(_) => {
                return Err(NotebookExecutionError::Timeout {
                    notebook: request.notebook,
                    timeout_secs: request.timeout.as_secs(),
                })
            }
        };

        if output.status.success() {
            return Ok(());
        }

        Err(NotebookExecutionError::EngineFailed {
            notebook: request.notebook,
            output: request.output,
            exit_code: output.status.code(),
            stderr: stderr_tail(&output.stderr),
        })
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim_end();
    let count = text.chars().count();
    if count <= STDERR_TAIL_CHARS {
        return text.to_string();
    }
    text.chars().skip(count - STDERR_TAIL_CHARS).collect()
}

/// Whether `program` can be found (absolute path or on `PATH`).
pub fn program_available(program: &str) -> bool {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
