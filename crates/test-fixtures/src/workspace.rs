//! Temp-dir service layout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nbops_core::ServiceConfig;
use tempfile::TempDir;

use crate::fixture_path;

/// An isolated base directory with every service directory created.
/// Deleted on drop.
pub struct TestWorkspace {
    dir: TempDir,
    pub config: Arc<ServiceConfig>,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Default config rooted at a fresh temp dir, adjusted by `tweak`.
    /// File logging is off.
    pub fn with_config(tweak: impl FnOnce(&mut ServiceConfig)) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let mut config =
            ServiceConfig::load_with_env(dir.path(), |_| None).expect("default config loads");
        config.logging.file_output = false;
        tweak(&mut config);
        config.ensure_directories().expect("create service directories");
        Self {
            dir,
            config: Arc::new(config),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.config.paths.input_dir()
    }

    pub fn monitoring_dir(&self) -> PathBuf {
        self.config.paths.monitoring_dir()
    }

    /// Copy a data fixture into place as the reference dataset.
    pub fn install_reference(&self, fixture: &str) {
        let target = self.config.paths.reference_data_path();
        std::fs::create_dir_all(target.parent().expect("reference has a parent"))
            .expect("create data dir");
        std::fs::copy(fixture_path(fixture), &target).expect("copy reference fixture");
    }

    /// Copy a data fixture into the input directory as `input_<token>.csv`.
    pub fn install_batch(&self, token: &str, fixture: &str) -> PathBuf {
        let target = self.input_dir().join(format!("input_{token}.csv"));
        std::fs::copy(fixture_path(fixture), &target).expect("copy batch fixture");
        target
    }

    /// Write raw CSV into the input directory as `input_<token>.csv`.
    pub fn write_batch(&self, token: &str, csv: &str) -> PathBuf {
        let target = self.input_dir().join(format!("input_{token}.csv"));
        std::fs::write(&target, csv).expect("write batch");
        target
    }

    /// File names in `dir`, sorted.
    pub fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("read dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
