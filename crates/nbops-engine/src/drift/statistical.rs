//! Default drift engine: per-column hypothesis tests.
//!
//! Numerical columns: two-sample Kolmogorov-Smirnov.
//! Categorical columns: chi-square goodness of fit of the current category
//! counts against the reference proportions (`statrs`).
//! A column drifts when its p-value falls below the stattest threshold.

use std::collections::{BTreeMap, BTreeSet};

use nbops_core::config::DriftConfig;
use nbops_core::errors::DriftDetectionError;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::{ColumnDrift, ColumnKind, DriftAnalysis, DriftEngine};
use crate::tabular::{Cell, Frame};

const KS_TEST: &str = "ks";
const CHI_SQUARE_TEST: &str = "chisquare";

#[derive(Debug, Clone)]
pub struct StatisticalDriftEngine {
    stattest_threshold: f64,
    categorical_unique_limit: usize,
}

impl StatisticalDriftEngine {
    pub fn new(stattest_threshold: f64, categorical_unique_limit: usize) -> Self {
        Self {
            stattest_threshold,
            categorical_unique_limit,
        }
    }

    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(config.stattest_threshold, config.categorical_unique_limit)
    }

    fn classify(&self, reference: &[&Cell], current: &[&Cell]) -> ColumnKind {
        let all_numeric = reference
            .iter()
            .chain(current.iter())
            .all(|c| c.as_f64().is_some());
        if !all_numeric {
            return ColumnKind::Categorical;
        }
        let distinct: BTreeSet<u64> = reference
            .iter()
            .filter_map(|c| c.as_f64())
            .map(f64::to_bits)
            .collect();
        if distinct.len() <= self.categorical_unique_limit {
            ColumnKind::Categorical
        } else {
            ColumnKind::Numerical
        }
    }
}

impl DriftEngine for StatisticalDriftEngine {
    fn compare(
        &self,
        reference: &Frame,
        current: &Frame,
    ) -> Result<DriftAnalysis, DriftDetectionError> {
        let shared: Vec<&String> = reference
            .columns()
            .iter()
            .filter(|c| current.column_index(c).is_some())
            .collect();
        if shared.is_empty() {
            return Err(DriftDetectionError::NoSharedColumns {
                reference: reference.columns().to_vec(),
                current: current.columns().to_vec(),
            });
        }

        let mut columns = Vec::with_capacity(shared.len());
        let mut skipped_columns = Vec::new();
        for name in shared {
            let ref_values = non_null(reference.column(name));
            let cur_values = non_null(current.column(name));
            if ref_values.is_empty() || cur_values.is_empty() {
                skipped_columns.push(name.clone());
                continue;
            }

            let kind = self.classify(&ref_values, &cur_values);
            let (stattest, p_value) = match kind {
                ColumnKind::Numerical => {
                    let a: Vec<f64> = ref_values.iter().filter_map(|c| c.as_f64()).collect();
                    let b: Vec<f64> = cur_values.iter().filter_map(|c| c.as_f64()).collect();
                    (KS_TEST, ks_two_sample(&a, &b).1)
                }
                ColumnKind::Categorical => {
                    (CHI_SQUARE_TEST, chi_square_p_value(&ref_values, &cur_values)?)
                }
            };

            columns.push(ColumnDrift {
                column: name.clone(),
                kind,
                stattest: stattest.to_string(),
                p_value,
                drifted: p_value < self.stattest_threshold,
            });
        }

        Ok(DriftAnalysis {
            columns,
            skipped_columns,
            reference_rows: reference.n_rows(),
            current_rows: current.n_rows(),
        })
    }
}

fn non_null(cells: Option<Vec<&Cell>>) -> Vec<&Cell> {
    cells
        .unwrap_or_default()
        .into_iter()
        .filter(|c| !c.is_null())
        .collect()
}

/// Two-sample Kolmogorov-Smirnov test. Returns `(D, p-value)`.
///
/// The p-value uses the asymptotic Kolmogorov distribution with the
/// small-sample correction `(sqrt(n) + 0.12 + 0.11 / sqrt(n)) * D`, where
/// `n` is the effective sample size.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> (f64, f64) {
    if a.is_empty() || b.is_empty() {
        return (0.0, 1.0);
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let (n1, n2) = (a.len(), b.len());
    let (mut i, mut j) = (0usize, 0usize);
    let mut d: f64 = 0.0;
    while i < n1 && j < n2 {
        let x = a[i].min(b[j]);
        while i < n1 && a[i] <= x {
            i += 1;
        }
        while j < n2 && b[j] <= x {
            j += 1;
        }
        let diff = (i as f64 / n1 as f64 - j as f64 / n2 as f64).abs();
        d = d.max(diff);
    }

    let en = ((n1 * n2) as f64 / (n1 + n2) as f64).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * d;
    (d, kolmogorov_survival(lambda))
}

/// `Q_KS(lambda) = 2 * sum_{j>=1} (-1)^(j-1) exp(-2 j^2 lambda^2)`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda < 1e-3 {
        return 1.0;
    }
    let a2 = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0;
    for j in 1..=100 {
        let jf = j as f64;
        let term = sign * (a2 * jf * jf).exp();
        sum += term;
        if term.abs() <= 1e-3 * previous || term.abs() <= 1e-8 * sum {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        previous = term.abs();
    }
    // Series failed to converge: only happens for tiny lambda.
    1.0
}

/// Chi-square goodness of fit of `current` against the category
/// proportions of `reference`. A category never seen in the reference is
/// certain drift (p = 0).
fn chi_square_p_value(reference: &[&Cell], current: &[&Cell]) -> Result<f64, DriftDetectionError> {
    let ref_counts = category_counts(reference);
    let cur_counts = category_counts(current);

    if cur_counts.keys().any(|k| !ref_counts.contains_key(k)) {
        return Ok(0.0);
    }
    if ref_counts.len() < 2 {
        return Ok(1.0);
    }

    let n_ref = reference.len() as f64;
    let n_cur = current.len() as f64;
    let statistic: f64 = ref_counts
        .iter()
        .map(|(category, &count)| {
            let expected = count as f64 / n_ref * n_cur;
            let observed = cur_counts.get(category).copied().unwrap_or(0) as f64;
            (observed - expected).powi(2) / expected
        })
        .sum();

    let dof = (ref_counts.len() - 1) as f64;
    let dist = ChiSquared::new(dof).map_err(|e| DriftDetectionError::Engine {
        message: format!("chi-square with {dof} degrees of freedom: {e}"),
    })?;
    Ok(dist.sf(statistic).clamp(0.0, 1.0))
}

fn category_counts(cells: &[&Cell]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for cell in cells {
        *counts.entry(cell.to_field()).or_insert(0) += 1;
    }
    counts
}
