//! Top-level service configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    DriftConfig, ExecutionConfig, LoggingConfig, PathsConfig, PredictionConfig, ServerConfig,
};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Built once at process start and shared read-only (`Arc<ServiceConfig>`)
/// with every orchestrator.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`NBOPS_*`)
/// 2. Project config (`nbops.toml` in the root directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
    pub execution: ExecutionConfig,
    pub prediction: PredictionConfig,
    pub drift: DriftConfig,
}

impl ServiceConfig {
    /// Load configuration rooted at `root`.
    ///
    /// `root` becomes the base directory unless the project file or
    /// `NBOPS_BASE_DIR` says otherwise.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(root, |key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(root: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_config_path = root.join(constants::CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        if config.paths.base_dir.is_none() {
            config.paths.base_dir = Some(root.to_path_buf());
        }

        Self::apply_env_overrides(&mut config, env)?;
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `NBOPS_*` overrides. Values that fail to parse are rejected.
    fn apply_env_overrides<F>(config: &mut ServiceConfig, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| env(&format!("{}{}", constants::ENV_PREFIX, name));

        if let Some(val) = var("HOST") {
            config.server.host = val;
        }
        if let Some(val) = var("PORT") {
            config.server.port = parse_env("PORT", &val)?;
        }
        if let Some(val) = var("DEBUG") {
            config.server.debug = parse_env("DEBUG", &val)?;
        }
        if let Some(val) = var("LOG_LEVEL") {
            config.logging.level = val.to_lowercase();
        }
        if let Some(val) = var("BASE_DIR") {
            config.paths.base_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = var("NOTEBOOK_PATH") {
            config.paths.notebook_path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("DATA_DIR") {
            config.paths.data_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = var("EXECUTION_TIMEOUT_SECS") {
            config.execution.timeout_secs = parse_env("EXECUTION_TIMEOUT_SECS", &val)?;
        }
        if let Some(val) = var("KERNEL_NAME") {
            config.execution.kernel_name = val;
        }
        if let Some(val) = var("ENGINE_PROGRAM") {
            config.execution.engine_program = val;
        }
        if let Some(val) = var("MODEL_VERSION") {
            config.prediction.model_version = val;
        }
        if let Some(val) = var("DRIFT_THRESHOLD") {
            config.drift.threshold = parse_env("DRIFT_THRESHOLD", &val)?;
        }
        if let Some(val) = var("DRIFT_WINDOW_BATCHES") {
            config.drift.window_batches = parse_env("DRIFT_WINDOW_BATCHES", &val)?;
        }
        if let Some(val) = var("DRIFT_MONITORING_INTERVAL_SECS") {
            config.drift.monitoring_interval_secs =
                parse_env("DRIFT_MONITORING_INTERVAL_SECS", &val)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(config: &ServiceConfig) -> Result<(), ConfigError> {
        if config.server.app_name.trim().is_empty() {
            return Err(invalid("server.app_name", "must not be empty"));
        }
        if config.server.port == 0 {
            return Err(invalid("server.port", "must be greater than 0"));
        }
        if config.execution.timeout_secs == 0 {
            return Err(invalid("execution.timeout_secs", "must be greater than 0"));
        }
        if config.execution.engine_program.trim().is_empty() {
            return Err(invalid("execution.engine_program", "must not be empty"));
        }
        if config.prediction.model_version.trim().is_empty() {
            return Err(invalid("prediction.model_version", "must not be empty"));
        }
        if !(0.0..=1.0).contains(&config.drift.threshold) {
            return Err(invalid("drift.threshold", "must be between 0.0 and 1.0"));
        }
        if !(config.drift.stattest_threshold > 0.0 && config.drift.stattest_threshold < 1.0) {
            return Err(invalid(
                "drift.stattest_threshold",
                "must be strictly between 0.0 and 1.0",
            ));
        }
        if config.drift.window_batches == 0 {
            return Err(invalid("drift.window_batches", "must be greater than 0"));
        }
        Ok(())
    }

    /// Create every directory the service writes into.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        let mut dirs = vec![
            self.paths.executed_notebooks_dir(),
            self.paths.input_dir(),
            self.paths.output_dir(),
            self.paths.monitoring_dir(),
        ];
        if self.logging.file_output {
            dirs.push(self.log_dir());
        }
        for dir in dirs {
            std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirectoryCreation {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Log directory resolved against the base directory.
    pub fn log_dir(&self) -> PathBuf {
        self.paths.absolutize(Path::new(&self.logging.log_dir))
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        field: format!("{}{}", constants::ENV_PREFIX, name),
        message: format!("{value:?}: {e}"),
    })
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
