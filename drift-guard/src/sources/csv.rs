//! CSV file source implementation.

use datafusion::prelude::*;
use std::path::Path;
use tracing::{debug, info, instrument};

use super::resolve_paths;
use crate::dataset::Dataset;
use crate::prelude::*;

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Escape character (default: None)
    pub escape: Option<u8>,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
    /// Extension matched when the source path is a directory
    pub file_extension: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            escape: None,
            comment: None,
            schema_infer_max_records: 1000,
            file_extension: "csv".to_string(),
        }
    }
}

/// A CSV data source that loads into a [`Dataset`].
///
/// # Examples
///
/// ```rust,no_run
/// use drift_guard::sources::CsvSource;
///
/// # async fn example() -> drift_guard::prelude::Result<()> {
/// // Single file
/// let baseline = CsvSource::new("data/baseline.csv")?.load().await?;
///
/// // Every CSV under a partitioned folder, concatenated in path order
/// let latest = CsvSource::new("data/latest/")?.load().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    paths: Vec<String>,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a source from a file, directory or glob pattern.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a source with custom options.
    pub fn with_options(path: impl AsRef<str>, options: CsvOptions) -> Result<Self> {
        let paths = resolve_paths(path.as_ref(), &options.file_extension)?;
        Ok(Self { paths, options })
    }

    /// Resolved file paths, sorted.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns a human-readable description of this data source.
    pub fn description(&self) -> String {
        if self.paths.len() == 1 {
            let path = &self.paths[0];
            format!("CSV file: {path}")
        } else {
            let count = self.paths.len();
            format!("CSV files: {count} files")
        }
    }

    /// Extension DataFusion should accept, taken from the first path.
    fn extension(&self) -> String {
        self.paths
            .first()
            .and_then(|p| Path::new(p).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }

    /// Loads all files into one dataset using a fresh session.
    pub async fn load(&self) -> Result<Dataset> {
        let ctx = SessionContext::new();
        self.load_with_context(&ctx).await
    }

    /// Loads all files into one dataset using `ctx`.
    #[instrument(skip(self, ctx), fields(
        source.type = "csv",
        source.files = self.paths.len(),
        csv.delimiter = %self.options.delimiter as char,
        csv.has_header = self.options.has_header
    ))]
    pub async fn load_with_context(&self, ctx: &SessionContext) -> Result<Dataset> {
        info!(
            source.type = "csv",
            source.paths = ?self.paths,
            "Loading CSV data source"
        );

        let extension = self.extension();
        let mut read_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .schema_infer_max_records(self.options.schema_infer_max_records)
            .file_extension(&extension);

        if let Some(escape) = self.options.escape {
            read_options = read_options.escape(escape);
        }
        if let Some(comment) = self.options.comment {
            read_options = read_options.comment(comment);
        }

        let df = ctx
            .read_csv(self.paths.clone(), read_options)
            .await
            .map_err(|e| {
                DriftError::data_source_with_source(
                    "csv",
                    format!("failed to read {}", self.description()),
                    Box::new(e),
                )
            })?;
        let df_schema = df.schema().inner().clone();
        let batches = df.collect().await?;
        let schema = batches.first().map(|b| b.schema()).unwrap_or(df_schema);
        let dataset = Dataset::from_batches(schema, &batches)?;

        debug!(
            source.type = "csv",
            source.files = self.paths.len(),
            rows = dataset.num_rows(),
            columns = dataset.column_names().len(),
            "CSV data source loaded"
        );

        Ok(dataset)
    }
}
