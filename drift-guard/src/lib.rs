//! # drift-guard - Feature Drift Detection for Rust
//!
//! drift-guard compares a baseline (reference) dataset against a current
//! (candidate) dataset and reports, column by column, whether the
//! distribution has shifted. It is the drift gate of an MLOps pipeline:
//! load two CSV extracts, score every numeric feature, and decide whether to
//! alert or retrain.
//!
//! ## Quick Start
//!
//! ```rust
//! use drift_guard::prelude::*;
//!
//! # fn example() -> drift_guard::prelude::Result<()> {
//! let baseline = Dataset::builder()
//!     .numeric("age", (0..200).map(|i| f64::from(i % 50)))
//!     .build()?
//!     .with_name("baseline");
//! let current = Dataset::builder()
//!     .numeric("age", (0..200).map(|i| f64::from(i % 50) + 30.0))
//!     .build()?
//!     .with_name("current");
//!
//! let detector = DriftDetector::new(DriftConfig::default())?;
//! let report = detector.check_drift(&baseline, &current)?;
//!
//! for column in report.alerts() {
//!     println!("drift in {column}");
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Statistics
//!
//! - **PSI**: bucket edges are the 0th, 10th, ..., 100th percentiles of the
//!   baseline column; both columns are histogrammed on those edges and
//!   `sum((e - a) * ln((e + eps) / (a + eps)))` is reported. A constant
//!   baseline column has no usable edges and reports an undefined PSI.
//! - **KS**: the two-sample Kolmogorov-Smirnov statistic with its asymptotic
//!   p-value.
//!
//! A column drifts when `psi > psi_threshold` (default 0.1) or
//! `ks_pvalue < ks_pvalue_threshold` (default 0.05). Columns with fewer than
//! 10 non-missing values in either dataset are reported as
//! `not enough data` and never alert.
//!
//! ## Architecture
//!
//! - **`dataset`**: Arrow-backed in-memory tables
//! - **`sources`**: CSV loading through DataFusion (files, folders, globs)
//! - **`drift`**: PSI, KS and the per-column detector
//! - **`signal`**: the dataset-level average-KS gate and its marker files
//! - **`formatters`**: JSON and human-readable report output
//! - **`logging`**: `tracing-subscriber` setup for binaries
//!
//! The `drift-check` binary wires these together for pipeline use.

pub mod dataset;
pub mod drift;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod signal;
pub mod sources;
