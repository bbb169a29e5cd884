use serde::{Deserialize, Serialize};

use crate::constants;

/// Logging configuration. `NBOPS_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Directory for the JSON log file, relative to the base directory.
    pub log_dir: String,
    /// Append JSON lines to `<log_dir>/app.log` in addition to stdout.
    pub file_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: constants::DEFAULT_LOG_LEVEL.to_string(),
            log_dir: constants::DEFAULT_LOG_DIR.to_string(),
            file_output: constants::DEFAULT_LOG_FILE_OUTPUT,
        }
    }
}
