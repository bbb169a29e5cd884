//! Filesystem layout of the service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Directory layout. Unset entries are derived from `base_dir` (and
/// `data_dir` for the input/output/reference locations); relative entries
/// are resolved against `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathsConfig {
    pub base_dir: Option<PathBuf>,
    /// Notebook template executed for predictions and training.
    pub notebook_path: Option<PathBuf>,
    pub executed_notebooks_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Drift report artifacts.
    pub monitoring_dir: Option<PathBuf>,
    /// Baseline dataset for drift comparison.
    pub reference_data_path: Option<PathBuf>,
}

impl PathsConfig {
    /// Root every relative path is resolved against. Default: `.`.
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_BASE_DIR))
    }

    pub fn notebook_path(&self) -> PathBuf {
        self.resolve(&self.notebook_path, constants::DEFAULT_NOTEBOOK_PATH)
    }

    pub fn executed_notebooks_dir(&self) -> PathBuf {
        self.resolve(
            &self.executed_notebooks_dir,
            constants::DEFAULT_EXECUTED_NOTEBOOKS_DIR,
        )
    }

    pub fn data_dir(&self) -> PathBuf {
        self.resolve(&self.data_dir, constants::DEFAULT_DATA_DIR)
    }

    pub fn input_dir(&self) -> PathBuf {
        match &self.input_dir {
            Some(dir) => self.absolutize(dir),
            None => self.data_dir().join(constants::DEFAULT_INPUT_SUBDIR),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => self.absolutize(dir),
            None => self.data_dir().join(constants::DEFAULT_OUTPUT_SUBDIR),
        }
    }

    pub fn monitoring_dir(&self) -> PathBuf {
        self.resolve(&self.monitoring_dir, constants::DEFAULT_MONITORING_DIR)
    }

    pub fn reference_data_path(&self) -> PathBuf {
        match &self.reference_data_path {
            Some(path) => self.absolutize(path),
            None => self.data_dir().join(constants::DEFAULT_REFERENCE_FILENAME),
        }
    }

    /// Resolve a path against the base directory (absolute paths pass through).
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    fn resolve(&self, value: &Option<PathBuf>, default: &str) -> PathBuf {
        match value {
            Some(path) => self.absolutize(path),
            None => self.base_dir().join(default),
        }
    }
}
