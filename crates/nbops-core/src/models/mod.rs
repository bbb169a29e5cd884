//! Request/response and state models shared by the engine and the HTTP layer.

pub mod drift_report;
pub mod health;
pub mod job;
pub mod prediction;
pub mod training;

pub use drift_report::DriftReport;
pub use health::HealthResponse;
pub use job::{JobKind, JobRecord, JobState};
pub use prediction::{PredictionRequest, PredictionResponse, Record};
pub use training::{TrainingRequest, TrainingResponse};
