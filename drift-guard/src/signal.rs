//! Dataset-level drift signal for pipeline gating.
//!
//! The signal averages the KS statistic over the numeric columns the two
//! datasets share and trips when the average reaches a threshold. It is the
//! coarse yes/no gate a scheduled pipeline acts on; the per-column
//! [`DriftReport`](crate::drift::DriftReport) explains it.

use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::dataset::Dataset;
use crate::drift::ks_statistic;
use crate::prelude::*;

/// File holding the average KS statistic.
pub const AVG_KS_FILE: &str = "avg_ks.txt";
/// Marker file whose presence means drift was signalled.
pub const DRIFT_MARKER_FILE: &str = "DRIFT";

/// Averaged KS statistic and the verdict against a threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftSignal {
    /// Mean KS statistic over `columns`; 0 when no column qualified.
    pub avg_ks: f64,
    /// Signal trips when `avg_ks >= threshold`.
    pub threshold: f64,
    /// Columns that contributed to the average, with their statistics.
    pub columns: Vec<(String, f64)>,
}

impl DriftSignal {
    /// Computes the signal for every numeric baseline column that is also
    /// numeric in `current` and non-empty in both.
    #[instrument(skip_all, fields(threshold = threshold))]
    pub fn compute(baseline: &Dataset, current: &Dataset, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(DriftError::Configuration(format!(
                "drift threshold must be finite, got {threshold}"
            )));
        }

        let mut columns = Vec::new();
        for name in baseline.numeric_columns() {
            if !current.is_numeric(&name) {
                debug!(column = %name, "Column not numeric in current dataset, skipping");
                continue;
            }
            let expected = baseline.numeric_values(&name)?;
            let actual = current.numeric_values(&name)?;
            if expected.is_empty() || actual.is_empty() {
                debug!(column = %name, "Column has no values, skipping");
                continue;
            }
            columns.push((name, ks_statistic(&expected, &actual)?));
        }

        let avg_ks = if columns.is_empty() {
            0.0
        } else {
            columns.iter().map(|(_, d)| d).sum::<f64>() / columns.len() as f64
        };

        info!(avg_ks, columns = columns.len(), "Computed drift signal");
        Ok(Self {
            avg_ks,
            threshold,
            columns,
        })
    }

    pub fn is_drift(&self) -> bool {
        self.avg_ks >= self.threshold
    }

    /// Writes `avg_ks.txt` into `dir`, and the `DRIFT` marker when drift is
    /// signalled. A marker left by an earlier run is removed otherwise.
    pub fn write_outputs(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        fs::write(dir.join(AVG_KS_FILE), format!("{:?}", self.avg_ks))?;

        let marker = dir.join(DRIFT_MARKER_FILE);
        if self.is_drift() {
            fs::write(&marker, "drift")?;
        } else if marker.exists() {
            fs::remove_file(&marker)?;
        }
        Ok(())
    }
}
