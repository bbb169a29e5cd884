//! Tracing initialization.

use nbops_core::tracing::{default_filter, events, init_tracing};
use nbops_core::ServiceConfig;

fn config_in(dir: &std::path::Path) -> ServiceConfig {
    ServiceConfig::load_with_env(dir, |_| None).unwrap()
}

#[test]
fn test_init_is_idempotent_and_opens_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    init_tracing(&config).unwrap();
    init_tracing(&config).unwrap();
    assert!(dir.path().join("logs").join("app.log").is_file());

    // Emitting after init must not panic.
    events::job_transition("00000000-0000-0000-0000-000000000000", "retrain", "queued");
}

#[test]
fn test_file_output_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.logging.file_output = false;

    init_tracing(&config).unwrap();
    assert!(!dir.path().join("logs").exists());
}

#[test]
fn test_debug_flag_raises_default_filter() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    assert_eq!(default_filter(&config), "info");

    config.server.debug = true;
    assert_eq!(default_filter(&config), "debug");
}
