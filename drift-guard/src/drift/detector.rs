//! Per-column drift scoring over two datasets.

use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use super::ks::ks_test;
use super::psi::population_stability_index;
use super::types::{ColumnDrift, ColumnStatistics, DriftReport};
use super::DriftConfig;
use crate::dataset::Dataset;
use crate::prelude::*;

/// Compares a baseline dataset against a current dataset column by column.
///
/// Each column is scored with PSI (bucket edges from the baseline) and a
/// two-sample KS test, and flagged when either crosses its threshold.
///
/// # Examples
///
/// ```rust
/// use drift_guard::dataset::Dataset;
/// use drift_guard::drift::{DriftConfig, DriftDetector};
///
/// let baseline = Dataset::builder()
///     .numeric("x", (0..100).map(f64::from))
///     .build()
///     .unwrap();
/// let current = Dataset::builder()
///     .numeric("x", (0..100).map(|i| f64::from(i) + 50.0))
///     .build()
///     .unwrap();
///
/// let detector = DriftDetector::new(DriftConfig::default()).unwrap();
/// let report = detector.check_drift(&baseline, &current).unwrap();
/// assert_eq!(report.alerts(), ["x"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DriftDetector {
    config: DriftConfig,
}

impl DriftDetector {
    /// Creates a detector after validating `config`.
    pub fn new(config: DriftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Scores every numeric column of `baseline`.
    pub fn check_drift(&self, baseline: &Dataset, current: &Dataset) -> Result<DriftReport> {
        let features = baseline.numeric_columns();
        self.evaluate(baseline, current, &features)
    }

    /// Scores the named columns, in order.
    ///
    /// An empty selection falls back to every numeric column of `baseline`.
    /// A name listed twice is scored once. A name missing from either dataset
    /// fails with [`DriftError::ColumnNotFound`].
    pub fn check_features<S: AsRef<str>>(
        &self,
        baseline: &Dataset,
        current: &Dataset,
        features: &[S],
    ) -> Result<DriftReport> {
        if features.is_empty() {
            return self.check_drift(baseline, current);
        }
        self.evaluate(baseline, current, features)
    }

    #[instrument(skip_all, fields(
        baseline = %baseline.name(),
        current = %current.name(),
        features = features.len()
    ))]
    fn evaluate<S: AsRef<str>>(
        &self,
        baseline: &Dataset,
        current: &Dataset,
        features: &[S],
    ) -> Result<DriftReport> {
        let mut report = DriftReport::new(self.config.clone());
        let mut seen = HashSet::new();

        for feature in features {
            let column = feature.as_ref();
            if !seen.insert(column) {
                continue;
            }

            let expected = baseline.numeric_values(column)?;
            let actual = current.numeric_values(column)?;
            let drift = self.score_column(&expected, &actual)?;

            match &drift {
                ColumnDrift::Scored(stats) => debug!(
                    column = %column,
                    psi = ?stats.psi,
                    ks_stat = stats.ks_statistic,
                    ks_pvalue = stats.ks_pvalue,
                    drifted = stats.drifted,
                    "Scored column"
                ),
                ColumnDrift::Skipped { reason } => debug!(
                    column = %column,
                    baseline.count = expected.len(),
                    current.count = actual.len(),
                    reason = %reason,
                    "Skipped column"
                ),
            }

            report.record(column.to_string(), drift);
        }

        if report.has_drift() {
            warn!(alerts = ?report.alerts(), "Drift detected");
        }
        info!(
            columns = report.len(),
            skipped = report.skipped_count(),
            drifted = report.alerts().len(),
            "Drift check complete"
        );
        Ok(report)
    }

    /// Scores one pair of cleaned samples.
    pub fn score_column(&self, expected: &[f64], actual: &[f64]) -> Result<ColumnDrift> {
        let min = self.config.min_samples;
        if expected.len() < min || actual.len() < min {
            return Ok(ColumnDrift::not_enough_data());
        }

        let psi = population_stability_index(expected, actual, self.config.buckets);
        let ks = ks_test(expected, actual)?;
        let drifted = psi.is_some_and(|psi| psi > self.config.psi_threshold)
            || ks.p_value < self.config.ks_pvalue_threshold;

        Ok(ColumnDrift::Scored(ColumnStatistics {
            psi,
            ks_statistic: ks.statistic,
            ks_pvalue: ks.p_value,
            drifted,
        }))
    }
}

/// One-shot drift check with explicit thresholds.
///
/// `feature_names` of `None` scores every numeric column of `baseline`.
pub fn check_drift(
    baseline: &Dataset,
    current: &Dataset,
    feature_names: Option<&[String]>,
    psi_threshold: f64,
    ks_pvalue_threshold: f64,
) -> Result<DriftReport> {
    let detector = DriftDetector::new(
        DriftConfig::default()
            .with_psi_threshold(psi_threshold)
            .with_ks_pvalue_threshold(ks_pvalue_threshold),
    )?;
    match feature_names {
        Some(features) => detector.check_features(baseline, current, features),
        None => detector.check_drift(baseline, current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    fn single(name: &str, values: Vec<f64>) -> Dataset {
        Dataset::builder().numeric(name, values).build().unwrap()
    }

    #[test]
    fn test_identical_datasets_do_not_drift() {
        let data = single("x", ramp(40));
        let report = DriftDetector::default().check_drift(&data, &data).unwrap();
        let stats = report.get("x").unwrap().statistics().copied().unwrap();
        assert!(stats.psi.unwrap().abs() < 1e-12);
        assert_eq!(stats.ks_statistic, 0.0);
        assert_eq!(stats.ks_pvalue, 1.0);
        assert!(!report.has_drift());
    }

    #[test]
    fn test_sample_gate_boundary() {
        let detector = DriftDetector::default();
        let nine = ramp(9);
        let ten = ramp(10);
        assert_eq!(
            detector.score_column(&nine, &ten).unwrap(),
            ColumnDrift::not_enough_data()
        );
        assert_eq!(
            detector.score_column(&ten, &nine).unwrap(),
            ColumnDrift::not_enough_data()
        );
        assert!(detector.score_column(&ten, &ten).unwrap().statistics().is_some());
    }

    #[test]
    fn test_nulls_count_against_sample_gate() {
        let mut values: Vec<Option<f64>> = (0..9).map(|i| Some(i as f64)).collect();
        values.extend([None, None, None]);
        let sparse = Dataset::builder().numeric("x", values).build().unwrap();
        let dense = single("x", ramp(12));
        let report = DriftDetector::default().check_drift(&sparse, &dense).unwrap();
        assert_eq!(report.get("x"), Some(&ColumnDrift::not_enough_data()));
        assert!(report.alerts().is_empty());
    }

    #[test]
    fn test_psi_threshold_is_strict() {
        let expected = ramp(100);
        let actual: Vec<f64> = expected.iter().map(|v| v + 4.0).collect();
        let psi = population_stability_index(&expected, &actual, 10).unwrap();
        assert!(psi > 0.0);

        // p-value threshold of 0 can never trigger, isolating the PSI rule.
        let at = DriftDetector::new(
            DriftConfig::default()
                .with_psi_threshold(psi)
                .with_ks_pvalue_threshold(0.0),
        )
        .unwrap();
        assert!(!at.score_column(&expected, &actual).unwrap().is_drifted());

        let below = DriftDetector::new(
            DriftConfig::default()
                .with_psi_threshold(psi * (1.0 - 1e-9))
                .with_ks_pvalue_threshold(0.0),
        )
        .unwrap();
        assert!(below.score_column(&expected, &actual).unwrap().is_drifted());
    }

    #[test]
    fn test_ks_alone_can_flag_drift() {
        let expected = ramp(100);
        let actual: Vec<f64> = expected.iter().map(|v| v + 60.0).collect();
        let detector =
            DriftDetector::new(DriftConfig::default().with_psi_threshold(f64::MAX)).unwrap();
        assert!(detector.score_column(&expected, &actual).unwrap().is_drifted());
    }

    #[test]
    fn test_missing_feature_is_fatal() {
        let baseline = single("x", ramp(20));
        let current = single("y", ramp(20));
        let err = DriftDetector::default()
            .check_features(&baseline, &current, &["x"])
            .unwrap_err();
        assert!(matches!(
            err,
            DriftError::ColumnNotFound { ref dataset, .. } if dataset == "dataset"
        ));
    }

    #[test]
    fn test_duplicate_features_scored_once() {
        let baseline = single("x", ramp(50));
        let current = single("x", ramp(50).into_iter().map(|v| v + 100.0).collect());
        let report = DriftDetector::default()
            .check_features(&baseline, &current, &["x", "x"])
            .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.alerts(), ["x"]);
    }

    #[test]
    fn test_free_function_uses_thresholds() {
        let baseline = single("x", ramp(50));
        let current = single("x", ramp(50).into_iter().map(|v| v + 2.0).collect());
        let strict = check_drift(&baseline, &current, None, 0.0, 0.0).unwrap();
        let lax = check_drift(&baseline, &current, None, 1e6, 0.0).unwrap();
        assert!(strict.has_drift());
        assert!(!lax.has_drift());
        assert_eq!(strict.thresholds().psi_threshold, 0.0);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let data = single("x", ramp(20));
        assert!(check_drift(&data, &data, None, f64::NAN, 0.05).is_err());
        assert!(check_drift(&data, &data, None, f64::INFINITY, 0.05).is_err());
    }

    #[test]
    fn test_negative_psi_threshold_flags_every_defined_psi() {
        let data = single("x", ramp(20));
        let report = check_drift(&data, &data, None, -1.0, 0.0).unwrap();
        assert_eq!(report.alerts(), ["x"]);

        let constant = single("x", vec![5.0; 20]);
        let report = check_drift(&constant, &constant, None, -1.0, 0.0).unwrap();
        assert!(report.alerts().is_empty());
    }
}
