//! `nbops` binary: load configuration, initialise logging, serve.

use std::process::ExitCode;
use std::sync::Arc;

use nbops_core::tracing::init_tracing;
use nbops_core::ServiceConfig;
use nbops_engine::notebook::papermill::program_available;
use nbops_server::scheduler::spawn_drift_schedule;
use nbops_server::{serve, AppState, ServerError};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "nbops exited with an error");
            eprintln!("nbops: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let root = std::env::current_dir().map_err(|e| ServerError::Serve {
        message: format!("cannot determine working directory: {e}"),
    })?;

    let config = ServiceConfig::load(&root)?;
    config.ensure_directories()?;
    init_tracing(&config)?;

    tracing::info!(
        base_dir = %config.paths.base_dir().display(),
        notebook = %config.paths.notebook_path().display(),
        model_version = %config.prediction.model_version,
        "configuration loaded"
    );
    if !config.paths.notebook_path().is_file() {
        tracing::warn!(
            notebook = %config.paths.notebook_path().display(),
            "notebook template not found, predictions will fail until it exists"
        );
    }
    if !program_available(&config.execution.engine_program) {
        tracing::warn!(
            program = %config.execution.engine_program,
            "notebook engine not found on PATH"
        );
    }

    let state = AppState::production(Arc::new(config));
    let _schedule = spawn_drift_schedule(state.clone());

    serve(state).await
}
