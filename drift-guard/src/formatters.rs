//! Report formatting for drift results.
//!
//! [`JsonFormatter`] emits the report for machines (and for archiving next to
//! pipeline outputs); [`HumanFormatter`] emits a console summary.
//!
//! # Examples
//!
//! ```rust
//! use drift_guard::dataset::Dataset;
//! use drift_guard::drift::DriftDetector;
//! use drift_guard::formatters::{FormatterConfig, HumanFormatter, ReportFormatter};
//!
//! let data = Dataset::builder()
//!     .numeric("x", (0..20).map(f64::from))
//!     .build()
//!     .unwrap();
//! let report = DriftDetector::default().check_drift(&data, &data).unwrap();
//!
//! let formatter = HumanFormatter::with_config(FormatterConfig::plain());
//! let output = formatter.format(&report).unwrap();
//! assert!(output.contains("No drift detected"));
//! ```

use std::fmt::Write;

use crate::drift::{ColumnDrift, DriftReport};
use crate::prelude::*;

/// Configuration options for formatting drift reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether to use ANSI colors (human formatter)
    pub use_colors: bool,
    /// Whether to list columns skipped for lack of data
    pub include_skipped: bool,
    /// Whether to include the report timestamp
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            include_skipped: true,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// No colors and no timestamps; stable output for logs and tests.
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            include_skipped: true,
            include_timestamps: false,
        }
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether skipped columns are listed.
    pub fn with_skipped(mut self, include: bool) -> Self {
        self.include_skipped = include;
        self
    }
}

/// Renders a [`DriftReport`] as text.
pub trait ReportFormatter {
    /// Formats a report.
    fn format(&self, report: &DriftReport) -> Result<String>;
}

/// Formats reports as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a pretty-printing JSON formatter.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &DriftReport) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        output.map_err(|e| DriftError::Serialization(format!("Failed to serialize report: {e}")))
    }
}

/// Formats reports for terminals.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.config.use_colors {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn format_psi(psi: Option<f64>) -> String {
    match psi {
        Some(psi) => format!("{psi:.4}"),
        None => "undefined".to_string(),
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &DriftReport) -> Result<String> {
        let mut output = String::new();
        let thresholds = report.thresholds();

        // fmt::Write into a String cannot fail.
        let _ = writeln!(output, "Drift report");
        if self.config.include_timestamps {
            let _ = writeln!(output, "Generated: {}", report.generated_at().to_rfc3339());
        }
        let _ = writeln!(
            output,
            "Thresholds: psi > {}, ks p-value < {}",
            thresholds.psi_threshold, thresholds.ks_pvalue_threshold
        );
        let _ = writeln!(output);

        for (name, drift) in report.iter() {
            match drift {
                ColumnDrift::Scored(stats) => {
                    let verdict = if stats.drifted {
                        self.paint("DRIFT", "31")
                    } else {
                        self.paint("ok", "32")
                    };
                    let _ = writeln!(
                        output,
                        "  {name}: psi={} ks_stat={:.4} ks_pvalue={:.4e} [{verdict}]",
                        format_psi(stats.psi),
                        stats.ks_statistic,
                        stats.ks_pvalue
                    );
                }
                ColumnDrift::Skipped { reason } => {
                    if self.config.include_skipped {
                        let _ = writeln!(output, "  {name}: skipped ({reason})");
                    }
                }
            }
        }

        let _ = writeln!(output);
        if report.has_drift() {
            let alerts = report.alerts().join(", ");
            let _ = writeln!(output, "{}: {alerts}", self.paint("DRIFT ALERT", "31"));
        } else {
            let _ = writeln!(output, "{}", self.paint("No drift detected", "32"));
        }
        Ok(output)
    }
}
