//! Drift Monitor: reference file + rolling window of input batches in,
//! report artifacts and a [`DriftReport`] out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use nbops_core::constants;
use nbops_core::errors::{DriftDetectionError, StorageError};
use nbops_core::models::DriftReport;
use nbops_core::tracing::events;
use nbops_core::{RunIdGenerator, ServiceConfig};

use super::report::{self, ReportSummary};
use super::{DriftAnalysis, DriftEngine};
use crate::tabular::Frame;

pub struct DriftMonitor {
    config: Arc<ServiceConfig>,
    engine: Arc<dyn DriftEngine>,
    ids: Arc<RunIdGenerator>,
}

impl DriftMonitor {
    pub fn new(
        config: Arc<ServiceConfig>,
        engine: Arc<dyn DriftEngine>,
        ids: Arc<RunIdGenerator>,
    ) -> Self {
        Self {
            config,
            engine,
            ids,
        }
    }

    /// The last `drift.window_batches` persisted input batches, oldest first.
    pub fn recent_batches(&self) -> Result<Vec<PathBuf>, DriftDetectionError> {
        let mut batches = list_artifacts(
            &self.config.paths.input_dir(),
            constants::INPUT_FILE_PREFIX,
            "csv",
        )?;
        let window = self.config.drift.window_batches;
        if batches.len() > window {
            batches.drain(..batches.len() - window);
        }
        Ok(batches)
    }

    /// Compare the reference dataset with the recent batches and persist a
    /// report. Every call writes new artifacts.
    pub async fn check_drift(&self) -> Result<DriftReport, DriftDetectionError> {
        let reference_path = self.config.paths.reference_data_path();
        if !reference_path.is_file() {
            return Err(DriftDetectionError::ReferenceMissing {
                path: reference_path,
            });
        }
        let batches = self.recent_batches()?;
        if batches.is_empty() {
            return Err(DriftDetectionError::NoCurrentData {
                dir: self.config.paths.input_dir(),
            });
        }
        tracing::debug!(
            reference = %reference_path.display(),
            batches = batches.len(),
            "running drift comparison"
        );

        let engine = Arc::clone(&self.engine);
        let analysis = tokio::task::spawn_blocking(move || -> Result<DriftAnalysis, DriftDetectionError> {
            let reference = Frame::read_csv(&reference_path)?;
            let current = batches
                .iter()
                .map(|path| Frame::read_csv(path))
                .collect::<Result<Vec<_>, _>>()?;
            engine.compare(&reference, &Frame::concat(current))
        })
        .await
        .map_err(|e| DriftDetectionError::Engine {
            message: e.to_string(),
        })??;

        let run_id = self.ids.next_id();
        let html_path = self
            .config
            .paths
            .monitoring_dir()
            .join(run_id.file_name(constants::DRIFT_REPORT_PREFIX, "html"));

        let drift_score = analysis.share_of_drifted_columns();
        let drift_report = DriftReport {
            drift_detected: drift_score > self.config.drift.threshold,
            drift_score,
            report_path: html_path.display().to_string(),
            timestamp: Utc::now(),
            affected_features: analysis.drifted_columns(),
        };

        let summary = ReportSummary {
            report: drift_report.clone(),
            analysis,
        };
        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            report::write_html(&html_path, &summary.report, &summary.analysis)?;
            report::write_summary(&report::summary_path(&html_path), &summary)
        })
        .await
        .map_err(|e| DriftDetectionError::Engine {
            message: e.to_string(),
        })??;

        events::drift_checked(
            drift_report.drift_score,
            drift_report.drift_detected,
            &drift_report.affected_features,
        );
        Ok(drift_report)
    }

    /// Most recent known drift result.
    ///
    /// With no report on disk this runs one check. Otherwise it reads the
    /// newest report's summary and never re-runs the engine; a report with
    /// no summary yields a placeholder pointing at it.
    pub async fn get_latest_report(&self) -> Result<DriftReport, DriftDetectionError> {
        self.latest_report().await.map(|latest| latest.report)
    }

    /// [`DriftMonitor::get_latest_report`] together with where the report came from.
    pub async fn latest_report(&self) -> Result<LatestReport, DriftDetectionError> {
        let reports = list_artifacts(
            &self.config.paths.monitoring_dir(),
            constants::DRIFT_REPORT_PREFIX,
            "html",
        )?;
        let Some(latest) = reports.last() else {
            tracing::info!("no drift report on disk, running a drift check");
            return Ok(LatestReport {
                report: self.check_drift().await?,
                source: ReportSource::FreshCheck,
            });
        };

        let summary = report::summary_path(latest);
        if summary.is_file() {
            Ok(LatestReport {
                report: report::read_summary(&summary)?,
                source: ReportSource::Summary,
            })
        } else {
            tracing::warn!(report = %latest.display(), "drift report has no summary, returning placeholder");
            Ok(LatestReport {
                report: DriftReport::placeholder(latest),
                source: ReportSource::Placeholder,
            })
        }
    }
}

/// Where [`DriftMonitor::latest_report`] got its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    FreshCheck,
    Summary,
    /// Values are defaults, not a measurement.
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct LatestReport {
    pub report: DriftReport,
    pub source: ReportSource,
}

impl LatestReport {
    /// Whether the score was actually computed by a drift check.
    pub fn is_measured(&self) -> bool {
        self.source != ReportSource::Placeholder
    }
}

/// `<dir>/<prefix>*.<extension>` sorted by file name. A missing directory
/// lists as empty.
fn list_artifacts(dir: &Path, prefix: &str, extension: &str) -> Result<Vec<PathBuf>, StorageError> {
    let dir_str = dir.to_str().ok_or_else(|| StorageError::Pattern {
        pattern: dir.display().to_string(),
        message: "directory is not valid UTF-8".to_string(),
    })?;
    let pattern = format!("{}/{prefix}*.{extension}", glob::Pattern::escape(dir_str));

    let entries = glob::glob(&pattern).map_err(|e| StorageError::Pattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StorageError::io(e.path(), e.error()))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
