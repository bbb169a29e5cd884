//! Prediction Orchestrator: persist input, run the notebook, read predictions back.

pub mod service;

pub use service::PredictionService;
