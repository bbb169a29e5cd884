// Single source of truth for all default values and file-naming conventions.

// --- Server ---
pub const DEFAULT_APP_NAME: &str = "Churn Prediction API - v1";
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DEBUG: bool = false;
pub const API_PREFIX: &str = "/api/v1";

// --- Logging ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE_OUTPUT: bool = true;
pub const LOG_FILENAME: &str = "app.log";
pub const LOG_FILTER_ENV: &str = "NBOPS_LOG";

// --- Paths (relative to the base directory) ---
pub const DEFAULT_BASE_DIR: &str = ".";
pub const DEFAULT_NOTEBOOK_PATH: &str = "notebooks/pipeline.ipynb";
pub const DEFAULT_EXECUTED_NOTEBOOKS_DIR: &str = "notebooks/executed";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_INPUT_SUBDIR: &str = "input";
pub const DEFAULT_OUTPUT_SUBDIR: &str = "output";
pub const DEFAULT_MONITORING_DIR: &str = "monitoring";
pub const DEFAULT_REFERENCE_FILENAME: &str = "reference_data.csv";

// --- Notebook execution ---
pub const DEFAULT_EXECUTION_TIMEOUT_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_KERNEL_NAME: &str = "python3";
pub const DEFAULT_ENGINE_PROGRAM: &str = "papermill";
pub const DEFAULT_PROGRESS_BAR: bool = false;

// --- Prediction ---
pub const DEFAULT_MODEL_VERSION: &str = "v1.0";
pub const DEFAULT_VALIDATE_OUTPUT_LENGTH: bool = false;

// --- Drift monitoring ---
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_DRIFT_WINDOW_BATCHES: usize = 10;
pub const DEFAULT_DRIFT_MONITORING_INTERVAL_SECS: u64 = 86_400; // 1 day
pub const DEFAULT_STATTEST_THRESHOLD: f64 = 0.05;
pub const DEFAULT_CATEGORICAL_UNIQUE_LIMIT: usize = 5;

// --- Artifact naming ---
pub const INPUT_FILE_PREFIX: &str = "input_";
pub const OUTPUT_FILE_PREFIX: &str = "predictions_";
pub const EXECUTED_NOTEBOOK_PREFIX: &str = "executed_";
pub const PREDICTION_NOTEBOOK_PREFIX: &str = "prediction_";
pub const TRAINING_NOTEBOOK_PREFIX: &str = "training_";
pub const DRIFT_REPORT_PREFIX: &str = "drift_report_";
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

// --- Config resolution ---
pub const CONFIG_FILENAME: &str = "nbops.toml";
pub const ENV_PREFIX: &str = "NBOPS_";
