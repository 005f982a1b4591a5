//! The in-memory dataset held by the session

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;

/// Coarse classification used by column selectors and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer or floating point values
    Numeric,
    /// Everything else (strings, booleans)
    Categorical,
}

impl ColumnKind {
    pub fn of(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => ColumnKind::Numeric,
            _ => ColumnKind::Categorical,
        }
    }
}

/// Short type label shown next to column names
pub fn dtype_label(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Int8 => "int8",
        DataType::Int16 => "int16",
        DataType::Int32 => "int32",
        DataType::Int64 => "int64",
        DataType::UInt8 => "uint8",
        DataType::UInt16 => "uint16",
        DataType::UInt32 => "uint32",
        DataType::UInt64 => "uint64",
        DataType::Float32 => "float32",
        DataType::Float64 => "float64",
        DataType::Boolean => "bool",
        _ => "object",
    }
}

/// A named table of typed columns over a shared row index
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Name of the file the data came from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch.schema().fields().iter().map(|f| f.name().clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Column kind by name, `None` when the column does not exist
    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.batch.schema()
            .field_with_name(name)
            .ok()
            .map(|f| ColumnKind::of(f.data_type()))
    }

    /// Names of numeric columns in schema order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Numeric)
    }

    /// Names of non-numeric columns in schema order
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Categorical)
    }

    fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.batch.schema()
            .fields()
            .iter()
            .filter(|f| ColumnKind::of(f.data_type()) == kind)
            .map(|f| f.name().clone())
            .collect()
    }

    /// Column names paired with their type labels
    pub fn dtypes(&self) -> Vec<(String, &'static str)> {
        self.batch.schema()
            .fields()
            .iter()
            .map(|f| (f.name().clone(), dtype_label(f.data_type())))
            .collect()
    }

    /// First `n` rows (fewer when the dataset is shorter)
    pub fn head(&self, n: usize) -> RecordBatch {
        self.batch.slice(0, n.min(self.num_rows()))
    }

    /// Total number of null cells
    pub fn null_count(&self) -> usize {
        self.batch.columns().iter().map(|c| c.null_count()).sum()
    }

    /// Swap in new contents while keeping the dataset identity
    pub fn replace_batch(&mut self, batch: RecordBatch) {
        self.batch = batch;
    }
}
