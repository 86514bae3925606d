//! Thresholds and binning parameters for drift detection.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::prelude::*;

/// PSI above this value flags a column ("moderate shift").
pub const DEFAULT_PSI_THRESHOLD: f64 = 0.1;
/// KS p-values below this value flag a column.
pub const DEFAULT_KS_PVALUE_THRESHOLD: f64 = 0.05;
/// Number of quantile buckets used for PSI.
pub const DEFAULT_BUCKETS: usize = 10;
/// Columns with fewer cleaned values than this in either dataset are not scored.
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Configuration for a [`DriftDetector`](super::DriftDetector).
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it overrides:
///
/// ```rust
/// use drift_guard::drift::DriftConfig;
///
/// let config = DriftConfig::from_json_str(r#"{ "psi_threshold": 0.25 }"#).unwrap();
/// assert_eq!(config.psi_threshold, 0.25);
/// assert_eq!(config.buckets, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftConfig {
    /// PSI strictly above this value flags drift.
    pub psi_threshold: f64,
    /// KS p-value strictly below this value flags drift.
    pub ks_pvalue_threshold: f64,
    /// Number of quantile buckets for PSI.
    pub buckets: usize,
    /// Minimum non-missing values required in both datasets.
    pub min_samples: usize,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            psi_threshold: DEFAULT_PSI_THRESHOLD,
            ks_pvalue_threshold: DEFAULT_KS_PVALUE_THRESHOLD,
            buckets: DEFAULT_BUCKETS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl DriftConfig {
    /// Sets the PSI threshold.
    pub fn with_psi_threshold(mut self, threshold: f64) -> Self {
        self.psi_threshold = threshold;
        self
    }

    /// Sets the KS p-value threshold.
    pub fn with_ks_pvalue_threshold(mut self, threshold: f64) -> Self {
        self.ks_pvalue_threshold = threshold;
        self
    }

    /// Sets the number of PSI buckets.
    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// Sets the minimum sample size.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Checks that the configuration can be used for scoring.
    pub fn validate(&self) -> Result<()> {
        if !self.psi_threshold.is_finite() {
            return Err(DriftError::Configuration(format!(
                "psi_threshold must be a finite number, got {}",
                self.psi_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.ks_pvalue_threshold) {
            return Err(DriftError::Configuration(format!(
                "ks_pvalue_threshold must be within [0, 1], got {}",
                self.ks_pvalue_threshold
            )));
        }
        if self.buckets == 0 {
            return Err(DriftError::Configuration(
                "buckets must be at least 1".to_string(),
            ));
        }
        if self.min_samples == 0 {
            return Err(DriftError::Configuration(
                "min_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DriftError::Configuration(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }
}
