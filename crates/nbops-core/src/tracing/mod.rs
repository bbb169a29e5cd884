//! Observability for nbops.
//! `tracing` crate with `EnvFilter`, a human-readable stdout layer and an
//! optional JSON file layer.

pub mod events;
pub mod setup;

pub use setup::{default_filter, init_tracing};
