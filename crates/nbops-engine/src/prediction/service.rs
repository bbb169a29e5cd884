use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use nbops_core::constants;
use nbops_core::errors::{PredictionError, StorageError};
use nbops_core::models::{PredictionResponse, Record};
use nbops_core::tracing::events;
use nbops_core::{RunId, RunIdGenerator, ServiceConfig};
use serde_json::{Map, Value};

use crate::notebook::NotebookExecutor;
use crate::tabular::Frame;

/// Turns a batch of records into predictions through one notebook run.
///
/// Each call writes `input_<run id>.csv`, asks the notebook to write
/// `predictions_<run id>.json`, and reads that list back. The configured
/// model version is always used.
pub struct PredictionService {
    config: Arc<ServiceConfig>,
    executor: Arc<NotebookExecutor>,
    ids: Arc<RunIdGenerator>,
}

/// Paths derived from one run id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionPaths {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub notebook_name: String,
}

impl PredictionService {
    pub fn new(
        config: Arc<ServiceConfig>,
        executor: Arc<NotebookExecutor>,
        ids: Arc<RunIdGenerator>,
    ) -> Self {
        Self {
            config,
            executor,
            ids,
        }
    }

    pub fn paths_for(&self, run_id: &RunId) -> PredictionPaths {
        PredictionPaths {
            input_file: self
                .config
                .paths
                .input_dir()
                .join(run_id.file_name(constants::INPUT_FILE_PREFIX, "csv")),
            output_file: self
                .config
                .paths
                .output_dir()
                .join(run_id.file_name(constants::OUTPUT_FILE_PREFIX, "json")),
            notebook_name: run_id.file_name(
                constants::PREDICTION_NOTEBOOK_PREFIX,
                constants::NOTEBOOK_EXTENSION,
            ),
        }
    }

    pub async fn predict(&self, records: &[Record]) -> Result<PredictionResponse, PredictionError> {
        let started = Instant::now();
        let run_id = self.ids.next_id();
        let paths = self.paths_for(&run_id);
        let model_version = self.config.prediction.model_version.clone();

        let frame = Frame::from_records(records);
        // A header-less CSV would reach the notebook as zero rows.
        if frame.columns().is_empty() && !records.is_empty() {
            return Err(PredictionError::EmptyFeatures {
                records: records.len(),
            });
        }
        let bytes = frame.to_csv_bytes(&paths.input_file)?;
        tokio::fs::write(&paths.input_file, bytes)
            .await
            .map_err(|e| StorageError::io(&paths.input_file, e))?;
        events::input_persisted(&paths.input_file, frame.n_rows());

        let mut parameters = Map::new();
        parameters.insert(
            "input_file".to_string(),
            Value::String(paths.input_file.display().to_string()),
        );
        parameters.insert(
            "output_file".to_string(),
            Value::String(paths.output_file.display().to_string()),
        );
        parameters.insert("model_version".to_string(), Value::String(model_version.clone()));

        let notebook_path = self
            .executor
            .execute(parameters, Some(&paths.notebook_name))
            .await?;

        let predictions = read_predictions(&paths.output_file).await?;
        if predictions.len() != records.len() {
            if self.config.prediction.validate_output_length {
                return Err(PredictionError::OutputLengthMismatch {
                    expected: records.len(),
                    actual: predictions.len(),
                });
            }
            events::prediction_length_mismatch(records.len(), predictions.len());
        }

        let execution_time = started.elapsed().as_secs_f64();
        tracing::info!(
            run_id = %run_id,
            predictions = predictions.len(),
            execution_time,
            "prediction completed"
        );

        Ok(PredictionResponse {
            predictions,
            model_version,
            execution_time,
            notebook_path: notebook_path.display().to_string(),
            timestamp: Utc::now(),
        })
    }
}

async fn read_predictions(path: &Path) -> Result<Vec<f64>, StorageError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StorageError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| StorageError::json(path, e))
}
