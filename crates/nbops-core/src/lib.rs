//! # nbops-core
//!
//! Foundation crate for the notebook operations service.
//! Defines config, errors, request/response models, run identifiers,
//! tracing setup and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod ids;
pub mod models;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::ServiceConfig;
pub use errors::{ErrorCode, ServiceError, ServiceResult};
pub use ids::{RunId, RunIdGenerator};
