//! In-memory tabular datasets backed by Arrow record batches.
//!
//! A [`Dataset`] is the unit the drift detector compares: a named table whose
//! columns can be looked up by name and extracted as clean `f64` samples.

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::{cast, concat_batches};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::prelude::*;

/// An immutable table of named columns.
///
/// # Examples
///
/// ```rust
/// use drift_guard::dataset::Dataset;
///
/// let dataset = Dataset::builder()
///     .numeric("price", vec![Some(1.0), None, Some(3.5)])
///     .text("label", vec!["a", "b", "c"])
///     .build()
///     .unwrap();
///
/// assert_eq!(dataset.num_rows(), 3);
/// assert_eq!(dataset.numeric_columns(), vec!["price".to_string()]);
/// assert_eq!(dataset.numeric_values("price").unwrap(), vec![1.0, 3.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    batch: RecordBatch,
}

impl Dataset {
    /// Wraps a single record batch.
    pub fn new(batch: RecordBatch) -> Self {
        Self {
            name: "dataset".to_string(),
            batch,
        }
    }

    /// Concatenates `batches` (which must all match `schema`) into one dataset.
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let batch = concat_batches(&schema, batches)?;
        Ok(Self::new(batch))
    }

    /// Starts building a dataset column by column.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Sets the label used in error messages (e.g. "baseline").
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The label used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema().index_of(name).is_ok()
    }

    /// Returns true if `name` exists and can be scored as numeric data.
    pub fn is_numeric(&self, name: &str) -> bool {
        self.batch
            .schema()
            .field_with_name(name)
            .map(|f| is_numeric_type(f.data_type()))
            .unwrap_or(false)
    }

    /// Names of all numeric columns, in schema order.
    ///
    /// Booleans and strings are excluded. Columns with no values at all
    /// (Arrow `Null`, as CSV inference yields for an always-empty column)
    /// are included.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .filter(|f| is_numeric_type(f.data_type()))
            .map(|f| f.name().clone())
            .collect()
    }

    /// Raw Arrow column.
    pub fn column(&self, name: &str) -> Result<&ArrayRef> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| DriftError::column_not_found(name, &self.name))
    }

    /// Extracts a numeric column as `f64`, dropping nulls and NaN.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.column(name)?;
        if column.data_type() == &DataType::Null {
            return Ok(Vec::new());
        }
        if !column.data_type().is_numeric() {
            return Err(DriftError::TypeMismatch {
                column: name.to_string(),
                found: column.data_type().to_string(),
            });
        }

        let as_float = cast(column, &DataType::Float64)?;
        let values = as_float
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| DriftError::Internal(format!("cast of '{name}' to Float64 failed")))?;

        Ok(values.iter().flatten().filter(|v| !v.is_nan()).collect())
    }
}

fn is_numeric_type(data_type: &DataType) -> bool {
    data_type.is_numeric() || data_type == &DataType::Null
}

/// Builder for small in-memory datasets.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
}

impl DatasetBuilder {
    /// Adds a nullable Float64 column. Accepts `f64` or `Option<f64>` items.
    pub fn numeric<I, T>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<f64>>,
    {
        let array: Float64Array = values.into_iter().map(Into::into).collect();
        self.fields.push(Field::new(name, DataType::Float64, true));
        self.columns.push(Arc::new(array));
        self
    }

    /// Adds a nullable Int64 column. Accepts `i64` or `Option<i64>` items.
    pub fn integer<I, T>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<i64>>,
    {
        let array: Int64Array = values.into_iter().map(Into::into).collect();
        self.fields.push(Field::new(name, DataType::Int64, true));
        self.columns.push(Arc::new(array));
        self
    }

    /// Adds a non-numeric Utf8 column.
    pub fn text<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let array: StringArray = values.into_iter().map(|s| Some(s.into())).collect();
        self.fields.push(Field::new(name, DataType::Utf8, true));
        self.columns.push(Arc::new(array));
        self
    }

    /// Builds the dataset. Fails if the columns have different lengths.
    pub fn build(self) -> Result<Dataset> {
        let schema = Arc::new(Schema::new(self.fields));
        let batch = RecordBatch::try_new(schema, self.columns)?;
        Ok(Dataset::new(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::NullArray;

    fn sample() -> Dataset {
        Dataset::builder()
            .numeric("x", vec![Some(1.0), None, Some(f64::NAN), Some(4.0)])
            .integer("n", vec![Some(1), Some(2), None, Some(4)])
            .text("label", vec!["a", "b", "c", "d"])
            .build()
            .unwrap()
            .with_name("baseline")
    }

    #[test]
    fn test_numeric_columns_in_schema_order() {
        let ds = sample();
        assert_eq!(ds.numeric_columns(), vec!["x", "n"]);
        assert_eq!(ds.column_names(), vec!["x", "n", "label"]);
        assert!(ds.is_numeric("n"));
        assert!(!ds.is_numeric("label"));
        assert!(!ds.is_numeric("missing"));
    }

    #[test]
    fn test_numeric_values_drop_nulls_and_nan() {
        let ds = sample();
        assert_eq!(ds.numeric_values("x").unwrap(), vec![1.0, 4.0]);
        assert_eq!(ds.numeric_values("n").unwrap(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_missing_column_names_dataset() {
        let err = sample().numeric_values("nope").unwrap_err();
        assert!(matches!(
            err,
            DriftError::ColumnNotFound { ref column, ref dataset }
                if column == "nope" && dataset == "baseline"
        ));
    }

    #[test]
    fn test_all_null_column_is_numeric_without_values() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::Float64, true),
            Field::new("empty", DataType::Null, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
                Arc::new(NullArray::new(3)),
            ],
        )
        .unwrap();
        let ds = Dataset::new(batch);

        assert!(ds.is_numeric("empty"));
        assert_eq!(ds.numeric_columns(), vec!["x", "empty"]);
        assert!(ds.numeric_values("empty").unwrap().is_empty());
    }

    #[test]
    fn test_text_column_is_type_mismatch() {
        let err = sample().numeric_values("label").unwrap_err();
        assert!(matches!(err, DriftError::TypeMismatch { .. }));
    }

    #[test]
    fn test_builder_rejects_ragged_columns() {
        let result = Dataset::builder()
            .numeric("a", vec![1.0, 2.0])
            .numeric("b", vec![1.0])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_from_batches_concatenates() {
        let ds = sample();
        let batch = ds.batch.clone();
        let merged = Dataset::from_batches(ds.schema(), &[batch.clone(), batch]).unwrap();
        assert_eq!(merged.num_rows(), 8);
        assert_eq!(merged.numeric_values("x").unwrap().len(), 4);
    }
}
