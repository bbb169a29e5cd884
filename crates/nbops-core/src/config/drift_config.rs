use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Drift monitoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Share of drifted columns above which drift is reported. Range [0.0, 1.0].
    pub threshold: f64,
    /// Number of most recent input batches compared against the reference.
    pub window_batches: usize,
    /// Interval between scheduled drift checks in seconds. 0 disables the schedule.
    pub monitoring_interval_secs: u64,
    /// Per-column p-value below which a column counts as drifted.
    pub stattest_threshold: f64,
    /// Numeric columns with at most this many distinct reference values are
    /// compared as categorical.
    pub categorical_unique_limit: usize,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold: constants::DEFAULT_DRIFT_THRESHOLD,
            window_batches: constants::DEFAULT_DRIFT_WINDOW_BATCHES,
            monitoring_interval_secs: constants::DEFAULT_DRIFT_MONITORING_INTERVAL_SECS,
            stattest_threshold: constants::DEFAULT_STATTEST_THRESHOLD,
            categorical_unique_limit: constants::DEFAULT_CATEGORICAL_UNIQUE_LIMIT,
        }
    }
}

impl DriftConfig {
    /// Schedule interval, `None` when scheduling is disabled.
    pub fn monitoring_interval(&self) -> Option<Duration> {
        (self.monitoring_interval_secs > 0).then(|| Duration::from_secs(self.monitoring_interval_secs))
    }
}
