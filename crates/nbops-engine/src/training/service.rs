use std::path::PathBuf;
use std::sync::Arc;

use nbops_core::constants;
use nbops_core::errors::NotebookExecutionError;
use nbops_core::tracing::events;
use serde_json::{Map, Value};

use crate::notebook::NotebookExecutor;

/// Runs the notebook in training mode. Callers dispatch this through the
/// task tracker so the triggering request never waits on it.
pub struct RetrainingService {
    executor: Arc<NotebookExecutor>,
}

impl RetrainingService {
    pub fn new(executor: Arc<NotebookExecutor>) -> Self {
        Self { executor }
    }

    /// Execute `training_<model_version>.ipynb` with
    /// `{training_data, model_version, mode: "training"}` and, when given,
    /// `hyperparameters`.
    pub async fn retrain(
        &self,
        training_data_path: &str,
        model_version: &str,
        hyperparameters: Option<Map<String, Value>>,
    ) -> Result<PathBuf, NotebookExecutionError> {
        events::retrain_started(model_version, training_data_path);

        let mut parameters = Map::new();
        parameters.insert(
            "training_data".to_string(),
            Value::String(training_data_path.to_string()),
        );
        parameters.insert(
            "model_version".to_string(),
            Value::String(model_version.to_string()),
        );
        parameters.insert("mode".to_string(), Value::String("training".to_string()));
        if let Some(hyperparameters) = hyperparameters {
            parameters.insert("hyperparameters".to_string(), Value::Object(hyperparameters));
        }

        let output_name = format!(
            "{}{}.{}",
            constants::TRAINING_NOTEBOOK_PREFIX,
            sanitize_version(model_version),
            constants::NOTEBOOK_EXTENSION
        );
        let artifact = self.executor.execute(parameters, Some(&output_name)).await?;

        events::retrain_completed(model_version);
        Ok(artifact)
    }
}

/// Restrict a model version to `[A-Za-z0-9._-]` so it is safe in a file name.
pub fn sanitize_version(version: &str) -> String {
    let cleaned: String = version
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    // Leading dots would allow `..`.
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "unversioned".to_string()
    } else {
        cleaned.to_string()
    }
}
