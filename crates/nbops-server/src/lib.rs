//! # nbops-server
//!
//! axum HTTP surface over the nbops orchestrators: prediction, retraining,
//! drift reports and checks, job status, health and Prometheus metrics.

pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod scheduler;
pub mod state;

use std::net::SocketAddr;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use nbops_core::constants;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ServerError};
pub use metrics::ServiceMetrics;
pub use state::AppState;

/// Full router: API routes under `/api/v1`, `/health` and `/metrics` at the root.
/// Every matched request is counted and timed per route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::render))
        .nest(constants::API_PREFIX, routes::api_routes())
        .layer(from_fn_with_state(state.clone(), middleware::track_http_metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState) -> Result<(), ServerError> {
    let bind = state.config.server.bind_address();
    let addr: SocketAddr = bind.parse().map_err(|e| ServerError::Address {
        address: bind.clone(),
        message: format!("{e}"),
    })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind {
            address: bind.clone(),
            message: e.to_string(),
        })?;

    tracing::info!(
        address = %addr,
        app = %state.config.server.app_name,
        version = %state.config.server.version,
        "starting server"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve {
            message: e.to_string(),
        })
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
