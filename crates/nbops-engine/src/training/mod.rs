//! Retraining Orchestrator.

pub mod service;

pub use service::{sanitize_version, RetrainingService};
