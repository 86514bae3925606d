//! Report types produced by drift detection.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::DriftConfig;

/// Reason recorded for columns that were too sparse to score.
pub const NOT_ENOUGH_DATA: &str = "not enough data";

/// Statistics for a column that had enough data to score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Population stability index; `None` when quantile binning degenerates.
    pub psi: Option<f64>,
    /// KS statistic in `[0, 1]`.
    #[serde(rename = "ks_stat")]
    pub ks_statistic: f64,
    /// KS p-value in `[0, 1]`.
    pub ks_pvalue: f64,
    /// Verdict for this column.
    #[serde(rename = "drift")]
    pub drifted: bool,
}

/// Per-column entry of a [`DriftReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDrift {
    /// Both samples were large enough to score.
    Scored(ColumnStatistics),
    /// The column was skipped; it never counts as drifted.
    Skipped {
        /// Why the column was skipped.
        reason: String,
    },
}

impl ColumnDrift {
    /// The placeholder for columns below the minimum sample size.
    pub fn not_enough_data() -> Self {
        Self::Skipped {
            reason: NOT_ENOUGH_DATA.to_string(),
        }
    }

    pub fn is_drifted(&self) -> bool {
        matches!(self, Self::Scored(stats) if stats.drifted)
    }

    pub fn statistics(&self) -> Option<&ColumnStatistics> {
        match self {
            Self::Scored(stats) => Some(stats),
            Self::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Self::Scored(_) => None,
            Self::Skipped { reason } => Some(reason),
        }
    }
}

/// Result of comparing a baseline dataset with a current one.
///
/// Columns are kept in evaluation order. `alerts` lists the drifted column
/// names in that same order.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    generated_at: DateTime<Utc>,
    thresholds: DriftConfig,
    #[serde(serialize_with = "serialize_columns")]
    columns: Vec<(String, ColumnDrift)>,
    alerts: Vec<String>,
}

fn serialize_columns<S>(columns: &[(String, ColumnDrift)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for (name, drift) in columns {
        map.serialize_entry(name, drift)?;
    }
    map.end()
}

impl DriftReport {
    pub(crate) fn new(thresholds: DriftConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            thresholds,
            columns: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, column: String, drift: ColumnDrift) {
        if drift.is_drifted() {
            self.alerts.push(column.clone());
        }
        self.columns.push((column, drift));
    }

    /// When the report was built.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// The configuration the columns were scored with.
    pub fn thresholds(&self) -> &DriftConfig {
        &self.thresholds
    }

    /// Looks up the entry for `column`.
    pub fn get(&self, column: &str) -> Option<&ColumnDrift> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, drift)| drift)
    }

    /// Entries in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnDrift)> {
        self.columns.iter().map(|(name, drift)| (name.as_str(), drift))
    }

    /// Names of drifted columns, in evaluation order.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn has_drift(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of columns skipped for lack of data.
    pub fn skipped_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|(_, drift)| drift.skip_reason().is_some())
            .count()
    }
}
