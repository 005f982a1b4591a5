//! Data loading, statistics and transformations for the dashboard

pub mod charts;
pub mod column;
pub mod config;
pub mod missing;
pub mod report;
pub mod schema;
pub mod sources;
pub mod stats;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use charts::{ChartData, ChartKind, ChartSpec};
pub use config::{LoadOptions, NullConfig};
pub use report::ReportArtifact;
pub use sources::{read_csv, read_csv_file, source_name};
pub use stats::{describe, NumericSummary, StatCell, StatsTable};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column is not numeric: {0}")]
    NotNumeric(String),

    #[error("Column has no values: {0}")]
    EmptyColumn(String),

    #[error("No numeric columns available")]
    NoNumericColumns,

    #[error("Report encoding error: {0}")]
    Report(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
