//! Error types for the drift-guard library.
//!
//! Statistical degeneracies (too few samples, constant columns) are not
//! errors: they are recorded in the [`DriftReport`](crate::drift::DriftReport).
//! The variants here cover structural misuse and I/O, which callers are
//! expected to treat as fatal.

use thiserror::Error;

/// The main error type for the drift-guard library.
#[derive(Error, Debug)]
pub enum DriftError {
    /// A requested column is not present in one of the datasets.
    #[error("Column '{column}' not found in {dataset} dataset")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
        /// Which dataset was searched ("baseline", "current", ...)
        dataset: String,
    },

    /// A column exists but cannot be scored as numeric data.
    #[error("Type mismatch for column '{column}': expected numeric, found {found}")]
    TypeMismatch {
        /// Name of the offending column
        column: String,
        /// The Arrow data type actually found
        found: String,
    },

    /// A statistical routine received an empty sample.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "csv")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, DriftError>`.
pub type Result<T> = std::result::Result<T, DriftError>;

impl DriftError {
    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            dataset: dataset.into(),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns true for errors caused by asking for data that is not there
    /// (missing or non-numeric columns).
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. } | Self::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
