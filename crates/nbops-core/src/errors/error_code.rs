//! ErrorCode trait for the HTTP boundary and structured logs.

/// Every error enum implements this to provide a stable, machine-readable
/// code string alongside its human-readable message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "NOTEBOOK_EXECUTION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NOTEBOOK_EXECUTION_ERROR: &str = "NOTEBOOK_EXECUTION_ERROR";
pub const NOTEBOOK_TIMEOUT: &str = "NOTEBOOK_TIMEOUT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const OUTPUT_LENGTH_MISMATCH: &str = "OUTPUT_LENGTH_MISMATCH";
pub const EMPTY_FEATURES: &str = "EMPTY_FEATURES";
pub const MODEL_NOT_FOUND: &str = "MODEL_NOT_FOUND";
pub const DRIFT_DETECTION_ERROR: &str = "DRIFT_DETECTION_ERROR";
pub const JOB_NOT_FOUND: &str = "JOB_NOT_FOUND";
