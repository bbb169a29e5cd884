//! In-memory tables exchanged with the notebook and the drift engine.
//!
//! Persisted batches are plain CSV: a header row, then one row per record.
//! Empty fields are missing values.

pub mod cell;
pub mod frame;

pub use cell::Cell;
pub use frame::Frame;
