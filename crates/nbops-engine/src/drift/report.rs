//! Report artifacts: a standalone HTML page plus a JSON summary sidecar
//! sharing the same stem (`drift_report_<run id>.{html,json}`).

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use nbops_core::errors::StorageError;
use nbops_core::models::DriftReport;
use serde::{Deserialize, Serialize};

use super::{ColumnKind, DriftAnalysis};

/// Contents of the JSON sidecar. Deserializes as a plain [`DriftReport`]
/// too, since unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(flatten)]
    pub report: DriftReport,
    pub analysis: DriftAnalysis,
}

/// JSON sidecar path for an HTML report.
pub fn summary_path(html_path: &Path) -> PathBuf {
    html_path.with_extension("json")
}

pub fn write_summary(path: &Path, summary: &ReportSummary) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(summary).map_err(|e| StorageError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| StorageError::io(path, e))
}

pub fn read_summary(path: &Path) -> Result<DriftReport, StorageError> {
    let bytes = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| StorageError::json(path, e))
}

pub fn write_html(path: &Path, report: &DriftReport, analysis: &DriftAnalysis) -> Result<(), StorageError> {
    std::fs::write(path, render_html(report, analysis)).map_err(|e| StorageError::io(path, e))
}

pub fn render_html(report: &DriftReport, analysis: &DriftAnalysis) -> String {
    let mut html = String::with_capacity(4096);
    let verdict = if report.drift_detected {
        "Dataset drift detected"
    } else {
        "No dataset drift detected"
    };

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Data Drift Report</title>\n<style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 4px 10px; text-align: left; }}\n\
         .drift {{ color: #b00020; font-weight: bold; }}\n\
         </style>\n</head>\n<body>\n<h1>Data Drift Report</h1>\n"
    );
    let _ = writeln!(html, "<p>Generated at {}</p>", report.timestamp.to_rfc3339());
    let _ = writeln!(
        html,
        "<h2 class=\"{}\">{verdict}</h2>",
        if report.drift_detected { "drift" } else { "ok" }
    );
    let _ = writeln!(
        html,
        "<p>{} of {} columns drifted (share {:.3}). Reference rows: {}. Current rows: {}.</p>",
        analysis.number_of_drifted_columns(),
        analysis.columns.len(),
        report.drift_score,
        analysis.reference_rows,
        analysis.current_rows
    );

    html.push_str(
        "<table>\n<thead><tr><th>Column</th><th>Type</th><th>Test</th><th>p-value</th><th>Drift</th></tr></thead>\n<tbody>\n",
    );
    for column in &analysis.columns {
        let kind = match column.kind {
            ColumnKind::Numerical => "num",
            ColumnKind::Categorical => "cat",
        };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{kind}</td><td>{}</td><td>{:.6}</td><td{}>{}</td></tr>",
            escape(&column.column),
            escape(&column.stattest),
            column.p_value,
            if column.drifted { " class=\"drift\"" } else { "" },
            if column.drifted { "Detected" } else { "Not detected" }
        );
    }
    html.push_str("</tbody>\n</table>\n");

    if !analysis.skipped_columns.is_empty() {
        let skipped: Vec<String> = analysis.skipped_columns.iter().map(|c| escape(c)).collect();
        let _ = writeln!(html, "<p>Skipped (no values): {}</p>", skipped.join(", "));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::ColumnDrift;
    use chrono::Utc;

    fn analysis() -> DriftAnalysis {
        DriftAnalysis {
            columns: vec![
                ColumnDrift {
                    column: "age".into(),
                    kind: ColumnKind::Numerical,
                    stattest: "ks".into(),
                    p_value: 0.001,
                    drifted: true,
                },
                ColumnDrift {
                    column: "<plan>".into(),
                    kind: ColumnKind::Categorical,
                    stattest: "chisquare".into(),
                    p_value: 0.8,
                    drifted: false,
                },
            ],
            skipped_columns: vec![],
            reference_rows: 100,
            current_rows: 20,
        }
    }

    fn report() -> DriftReport {
        DriftReport {
            drift_detected: true,
            drift_score: 0.5,
            report_path: "monitoring/drift_report_x.html".into(),
            timestamp: Utc::now(),
            affected_features: vec!["age".into()],
        }
    }

    #[test]
    fn html_lists_columns_and_escapes_names() {
        let html = render_html(&report(), &analysis());
        assert!(html.contains("Dataset drift detected"));
        assert!(html.contains("<td>age</td>"));
        assert!(html.contains("&lt;plan&gt;"));
        assert!(html.contains("1 of 2 columns drifted"));
    }

    #[test]
    fn summary_reads_back_as_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drift_report_x.json");
        let summary = ReportSummary {
            report: report(),
            analysis: analysis(),
        };
        write_summary(&path, &summary).unwrap();

        let back = read_summary(&path).unwrap();
        assert_eq!(back, summary.report);
    }

    #[test]
    fn summary_path_swaps_extension() {
        assert_eq!(
            summary_path(Path::new("monitoring/drift_report_1.html")),
            PathBuf::from("monitoring/drift_report_1.json")
        );
    }
}
