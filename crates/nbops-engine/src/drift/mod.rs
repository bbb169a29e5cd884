//! Drift monitoring: compare a reference dataset with recent input batches.
//!
//! The comparison itself sits behind [`DriftEngine`]. [`DriftMonitor`] owns
//! the file layout (reference file, rolling input window, report artifacts).

pub mod monitor;
pub mod report;
pub mod statistical;

use nbops_core::errors::DriftDetectionError;
use serde::{Deserialize, Serialize};

use crate::tabular::Frame;

pub use monitor::{DriftMonitor, LatestReport, ReportSource};
pub use statistical::StatisticalDriftEngine;

/// How a column was compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numerical,
    Categorical,
}

/// Per-column comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDrift {
    pub column: String,
    pub kind: ColumnKind,
    /// Name of the statistical test applied.
    pub stattest: String,
    pub p_value: f64,
    pub drifted: bool,
}

/// Aggregate comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAnalysis {
    /// Compared columns, in reference column order.
    pub columns: Vec<ColumnDrift>,
    /// Shared columns that had no values to compare.
    pub skipped_columns: Vec<String>,
    pub reference_rows: usize,
    pub current_rows: usize,
}

impl DriftAnalysis {
    pub fn number_of_drifted_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.drifted).count()
    }

    /// Share of compared columns flagged as drifted, in [0.0, 1.0].
    pub fn share_of_drifted_columns(&self) -> f64 {
        if self.columns.is_empty() {
            return 0.0;
        }
        self.number_of_drifted_columns() as f64 / self.columns.len() as f64
    }

    /// Drifted column names, sorted and de-duplicated.
    pub fn drifted_columns(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.drifted)
            .map(|c| c.column.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Drift-statistics engine.
///
/// Must be deterministic: the same inputs give the same analysis.
pub trait DriftEngine: Send + Sync {
    fn compare(&self, reference: &Frame, current: &Frame) -> Result<DriftAnalysis, DriftDetectionError>;
}
