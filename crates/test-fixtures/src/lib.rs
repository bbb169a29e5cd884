//! Test fixtures for nbops integration tests.
//!
//! - data fixtures under `<workspace>/test-fixtures/data`
//! - [`TestWorkspace`]: a temp-dir service layout with its own config
//! - [`FakeNotebookEngine`] and [`CountingDriftEngine`] standing in for the
//!   external engines

pub mod engines;
pub mod workspace;

use std::path::PathBuf;

use nbops_core::models::Record;
use serde::de::DeserializeOwned;

pub use engines::{CountingDriftEngine, FakeNotebookEngine};
pub use workspace::TestWorkspace;

/// Root directory of the data fixtures.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up until test-fixtures/data exists.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("data").is_dir() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/data from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("data")
}

/// Absolute path to a data fixture.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Build a record from a JSON object literal.
///
/// # Panics
/// Panics if `value` is not an object.
pub fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("record fixture must be an object, got {other}"),
    }
}
