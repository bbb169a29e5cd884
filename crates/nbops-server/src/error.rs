//! Error types at the HTTP boundary.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nbops_core::errors::{
    ConfigError, DriftDetectionError, ErrorCode, PredictionError, ServiceError, TaskError,
};
use serde_json::json;

/// Error returned by a handler: a status code and a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let code = err.error_code();
        match err {
            ServiceError::Task(e) => {
                tracing::warn!(code, error = %e, "request for unknown job");
                ApiError::not_found(e.to_string())
            }
            other => {
                tracing::error!(code, error = %other, "request failed");
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        ServiceError::from(err).into()
    }
}

impl From<DriftDetectionError> for ApiError {
    fn from(err: DriftDetectionError) -> Self {
        ServiceError::from(err).into()
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        ServiceError::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

fn rejected(status: StatusCode, detail: String) -> ApiError {
    tracing::warn!(status = status.as_u16(), detail = %detail, "request rejected");
    ApiError { status, detail }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Startup and serving failures of the binary.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid bind address {address}: {message}")]
    Address { address: String, message: String },

    #[error("Failed to bind {address}: {message}")]
    Bind { address: String, message: String },

    #[error("Server error: {message}")]
    Serve { message: String },
}
