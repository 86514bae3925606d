//! Feature drift detection.
//!
//! Two statistics are computed per numeric column:
//!
//! - **PSI** (population stability index) over quantile buckets taken from
//!   the baseline sample.
//! - **Two-sample Kolmogorov-Smirnov** statistic and asymptotic p-value.
//!
//! A column is flagged when `psi > psi_threshold` or
//! `ks_pvalue < ks_pvalue_threshold`. Columns with fewer than
//! `min_samples` non-missing values in either dataset are reported as
//! `not enough data` and never flagged.

mod config;
mod detector;
mod ks;
mod psi;
mod types;

pub use config::{
    DriftConfig, DEFAULT_BUCKETS, DEFAULT_KS_PVALUE_THRESHOLD, DEFAULT_MIN_SAMPLES,
    DEFAULT_PSI_THRESHOLD,
};
pub use detector::{check_drift, DriftDetector};
pub use ks::{kolmogorov_survival, ks_statistic, ks_test, KsResult};
pub use psi::{bin_counts, percentile, population_stability_index, quantile_edges, EPSILON};
pub use types::{ColumnDrift, ColumnStatistics, DriftReport, NOT_ENOUGH_DATA};
