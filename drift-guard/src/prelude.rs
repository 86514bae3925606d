//! Prelude for commonly used types and traits in drift-guard.

pub use crate::dataset::Dataset;
pub use crate::drift::{ColumnDrift, DriftConfig, DriftDetector, DriftReport};
pub use crate::error::{DriftError, Result};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::logging::LoggingConfig;
pub use crate::signal::DriftSignal;
