//! Stand-ins for the external notebook and drift engines.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nbops_core::errors::{DriftDetectionError, NotebookExecutionError};
use nbops_engine::drift::{DriftAnalysis, DriftEngine};
use nbops_engine::notebook::{ExecutionRequest, NotebookEngine};
use nbops_engine::tabular::Frame;

#[derive(Debug, Clone)]
enum Outcome {
    /// Write this prediction list to `output_file`.
    Predictions(Vec<f64>),
    /// Write one copy of the value per data row of `input_file`.
    PerRow(f64),
    Fail { exit_code: i32, stderr: String },
}

/// Notebook engine that behaves like the pipeline notebook without a kernel.
///
/// On success it writes a minimal executed notebook to the request's output
/// path and, when the parameters name an `output_file`, a JSON list of
/// predictions there. Every request is recorded.
#[derive(Debug)]
pub struct FakeNotebookEngine {
    outcome: Outcome,
    delay: Option<Duration>,
    calls: Mutex<Vec<ExecutionRequest>>,
}

impl FakeNotebookEngine {
    /// Always emit `predictions`, whatever the input length.
    pub fn returning(predictions: Vec<f64>) -> Self {
        Self::with_outcome(Outcome::Predictions(predictions))
    }

    /// Emit `value` once per input row.
    pub fn per_row(value: f64) -> Self {
        Self::with_outcome(Outcome::PerRow(value))
    }

    /// Fail like a notebook raising in a cell.
    pub fn failing(stderr: &str) -> Self {
        Self::with_outcome(Outcome::Fail {
            exit_code: 1,
            stderr: stderr.to_string(),
        })
    }

    /// Sleep for `delay` before acting.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ExecutionRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl NotebookEngine for FakeNotebookEngine {
    async fn execute(&self, request: ExecutionRequest) -> Result<(), NotebookExecutionError> {
        self.calls.lock().expect("calls lock").push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let predictions = match &self.outcome {
            Outcome::Fail { exit_code, stderr } => {
                return Err(NotebookExecutionError::EngineFailed {
                    notebook: request.notebook,
                    output: request.output,
                    exit_code: Some(*exit_code),
                    stderr: stderr.clone(),
                });
            }
            Outcome::Predictions(values) => values.clone(),
            Outcome::PerRow(value) => {
                let rows = match request.parameters.get("input_file").and_then(|v| v.as_str()) {
                    Some(input) => Frame::read_csv(Path::new(input))
                        .map(|f| f.n_rows())
                        .unwrap_or(0),
                    None => 0,
                };
                vec![*value; rows]
            }
        };

        write(&request.output, br#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 5}"#)?;
        if let Some(output_file) = request.parameters.get("output_file").and_then(|v| v.as_str()) {
            let json = serde_json::to_vec(&predictions).expect("serialize predictions");
            write(Path::new(output_file), &json)?;
        }
        Ok(())
    }
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), NotebookExecutionError> {
    std::fs::write(path, bytes).map_err(|e| NotebookExecutionError::Join {
        message: format!("fake engine could not write {}: {e}", path.display()),
    })
}

/// Wraps a drift engine and counts comparisons.
pub struct CountingDriftEngine<E> {
    inner: E,
    calls: AtomicUsize,
}

impl<E: DriftEngine> CountingDriftEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: DriftEngine> DriftEngine for CountingDriftEngine<E> {
    fn compare(&self, reference: &Frame, current: &Frame) -> Result<DriftAnalysis, DriftDetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compare(reference, current)
    }
}
