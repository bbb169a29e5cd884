//! Error handling for nbops.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod drift_error;
pub mod error_code;
pub mod model_error;
pub mod notebook_error;
pub mod prediction_error;
pub mod service_error;
pub mod storage_error;
pub mod task_error;

pub use config_error::ConfigError;
pub use drift_error::DriftDetectionError;
pub use error_code::ErrorCode;
pub use model_error::ModelError;
pub use notebook_error::NotebookExecutionError;
pub use prediction_error::PredictionError;
pub use service_error::{ServiceError, ServiceResult};
pub use storage_error::StorageError;
pub use task_error::TaskError;
