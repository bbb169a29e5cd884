//! Configuration system for nbops.
//! TOML-based, 3-layer resolution: env > project file > compiled defaults.

pub mod drift_config;
pub mod execution_config;
pub mod logging_config;
pub mod paths_config;
pub mod prediction_config;
pub mod server_config;
pub mod service_config;

pub use drift_config::DriftConfig;
pub use execution_config::ExecutionConfig;
pub use logging_config::LoggingConfig;
pub use paths_config::PathsConfig;
pub use prediction_config::PredictionConfig;
pub use server_config::ServerConfig;
pub use service_config::ServiceConfig;
