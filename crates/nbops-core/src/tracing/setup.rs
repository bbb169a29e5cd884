//! Tracing initialization and configuration.

use std::fs::OpenOptions;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ServiceConfig;
use crate::constants;
use crate::errors::ConfigError;

static INIT: Once = Once::new();

/// Initialize the nbops tracing/logging system.
///
/// Reads the `NBOPS_LOG` environment variable for per-target log levels.
/// Format: `NBOPS_LOG=nbops_engine=debug,tower_http=info`
///
/// Falls back to `logging.level` (or `debug` when `server.debug` is set).
/// When `logging.file_output` is enabled, JSON lines are also appended to
/// `<log_dir>/app.log`.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing(config: &ServiceConfig) -> Result<(), ConfigError> {
    let log_file = if config.logging.file_output {
        let dir = config.log_dir();
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirectoryCreation {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = dir.join(constants::LOG_FILENAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging.log_dir".to_string(),
                message: format!("cannot open {}: {e}", path.display()),
            })?;
        Some(file)
    } else {
        None
    };
    let fallback = default_filter(config);

    INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_env(constants::LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        let json_layer = log_file.map(|file| {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
        });

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(json_layer)
            .try_init();
    });
    Ok(())
}

/// Filter directive used when `NBOPS_LOG` is not set.
pub fn default_filter(config: &ServiceConfig) -> String {
    if config.server.debug {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    }
}
