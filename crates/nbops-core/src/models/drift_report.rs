//! Drift report summary returned by the API and persisted next to each HTML report.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one reference-vs-current comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub drift_detected: bool,
    /// Share of compared columns flagged as drifted, in [0.0, 1.0].
    pub drift_score: f64,
    /// Human-readable report artifact.
    pub report_path: String,
    pub timestamp: DateTime<Utc>,
    /// Drifted column names, sorted and de-duplicated.
    #[serde(default)]
    pub affected_features: Vec<String>,
}

impl DriftReport {
    /// Stand-in for a report artifact whose values were never recorded.
    pub fn placeholder(report_path: &Path) -> Self {
        Self {
            drift_detected: false,
            drift_score: 0.0,
            report_path: report_path.display().to_string(),
            timestamp: Utc::now(),
            affected_features: Vec::new(),
        }
    }
}
