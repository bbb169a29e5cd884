//! Background task tracker: fire-and-forget work with an observable record.

pub mod tracker;

pub use tracker::{JobHandle, TaskTracker};
