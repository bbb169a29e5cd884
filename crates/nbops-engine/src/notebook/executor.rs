//! Notebook Execution Orchestrator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use nbops_core::constants;
use nbops_core::errors::NotebookExecutionError;
use nbops_core::tracing::events;
use nbops_core::{RunIdGenerator, ServiceConfig};
use serde_json::Value;

use super::{ExecutionRequest, NotebookEngine, Parameters};

/// Runs the configured notebook template with a parameter mapping and
/// returns the executed artifact's path.
pub struct NotebookExecutor {
    config: Arc<ServiceConfig>,
    engine: Arc<dyn NotebookEngine>,
    ids: Arc<RunIdGenerator>,
}

impl NotebookExecutor {
    pub fn new(
        config: Arc<ServiceConfig>,
        engine: Arc<dyn NotebookEngine>,
        ids: Arc<RunIdGenerator>,
    ) -> Self {
        Self {
            config,
            engine,
            ids,
        }
    }

    /// Execute the template.
    ///
    /// The artifact lands at `executed_notebooks_dir/<output_name>`; without a
    /// name one is derived as `executed_<run id>.ipynb`. Produced artifacts
    /// are never cleaned up.
    pub async fn execute(
        &self,
        parameters: Parameters,
        output_name: Option<&str>,
    ) -> Result<PathBuf, NotebookExecutionError> {
        let output_name = match output_name {
            Some(name) => name.to_string(),
            None => self.ids.next_id().file_name(
                constants::EXECUTED_NOTEBOOK_PREFIX,
                constants::NOTEBOOK_EXTENSION,
            ),
        };
        let output = self.config.paths.executed_notebooks_dir().join(output_name);
        let notebook = self.config.paths.notebook_path();

        events::notebook_started(&notebook, &output, &Value::Object(parameters.clone()));
        let started = Instant::now();

        let request = ExecutionRequest {
            notebook,
            output: output.clone(),
            parameters,
            kernel_name: self.config.execution.kernel_name.clone(),
            timeout: self.config.execution.timeout(),
        };

        match self.engine.execute(request).await {
            Ok(()) => {
                events::notebook_completed(&output, started.elapsed().as_millis());
                Ok(output)
            }
            Err(e) => {
                events::notebook_failed(&output, &e.to_string());
                Err(e)
            }
        }
    }
}
