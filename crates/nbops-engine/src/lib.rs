//! # nbops-engine
//!
//! Orchestration workflows of the notebook operations service:
//! notebook execution, prediction, retraining, drift monitoring and the
//! background task tracker. External computation sits behind the
//! [`notebook::NotebookEngine`] and [`drift::DriftEngine`] traits.

pub mod drift;
pub mod notebook;
pub mod prediction;
pub mod tabular;
pub mod tasks;
pub mod training;

pub use drift::{DriftEngine, DriftMonitor, StatisticalDriftEngine};
pub use notebook::{NotebookEngine, NotebookExecutor, PapermillEngine};
pub use prediction::PredictionService;
pub use tabular::{Cell, Frame};
pub use tasks::{JobHandle, TaskTracker};
pub use training::RetrainingService;
