use std::path::Path;
use std::sync::Arc;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use tracing::{debug, info};

use dash_core::Dataset;
use crate::DataError;
use crate::config::LoadOptions;
use crate::schema::{detect_column_type, normalize_headers, parse_bool};

/// Parse an uploaded delimited file into a dataset.
///
/// Short rows are padded with nulls; a row with more fields than the header
/// is rejected.
pub fn read_csv(name: &str, bytes: &[u8], options: &LoadOptions) -> Result<Dataset, DataError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();

    let first = match records.next() {
        Some(record) => record?,
        None => return Err(DataError::NoColumns),
    };

    let headers = normalize_headers(first.iter());
    let width = headers.len();

    // Cells per column, `None` for nulls
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    let mut push_record = |record: &csv::StringRecord| -> Result<(), DataError> {
        if record.len() > width {
            return Err(DataError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }

        for (col_idx, column) in cells.iter_mut().enumerate() {
            let value = record.get(col_idx)
                .filter(|v| !options.null_config.is_null(v))
                .map(|v| v.to_string());
            column.push(value);
        }

        Ok(())
    };

    for result in records {
        let record = result?;
        push_record(&record)?;
    }

    let mut fields = Vec::with_capacity(width);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(width);

    for (name, values) in headers.iter().zip(cells.iter()) {
        let data_type = detect_column_type(values.iter().flatten().map(|s| s.as_str()));
        columns.push(build_array(&data_type, values));
        fields.push(Field::new(name, data_type, true));
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    info!("Parsed {}: {} rows, {} columns", name, batch.num_rows(), batch.num_columns());
    debug!("Schema: {:?}", batch.schema());

    Ok(Dataset::new(name, batch))
}

/// Read and parse a file from disk
pub fn read_csv_file(path: &Path, options: &LoadOptions) -> Result<Dataset, DataError> {
    let bytes = std::fs::read(path)?;
    read_csv(&source_name(path), &bytes, options)
}

/// Name a file-backed dataset is known by: the file name without its directory
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown.csv".to_string())
}

/// Build an arrow array of the detected type from text cells
fn build_array(data_type: &DataType, values: &[Option<String>]) -> ArrayRef {
    match data_type {
        DataType::Int64 => {
            let mut builder = Int64Builder::with_capacity(values.len());
            for value in values {
                builder.append_option(value.as_deref().and_then(|v| v.parse::<i64>().ok()));
            }
            Arc::new(builder.finish())
        }
        DataType::Float64 => {
            let mut builder = Float64Builder::with_capacity(values.len());
            for value in values {
                builder.append_option(value.as_deref().and_then(|v| v.parse::<f64>().ok()));
            }
            Arc::new(builder.finish())
        }
        DataType::Boolean => {
            let mut builder = BooleanBuilder::with_capacity(values.len());
            for value in values {
                builder.append_option(value.as_deref().and_then(parse_bool));
            }
            Arc::new(builder.finish())
        }
        _ => {
            let mut builder = StringBuilder::new();
            for value in values {
                builder.append_option(value.as_deref());
            }
            Arc::new(builder.finish())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Dataset, DataError> {
        read_csv("test.csv", text.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn test_shape_and_types() {
        let ds = load("id,score,city,active\n1,2.5,Oslo,True\n2,3,Rome,False\n3,,Lima,true\n").unwrap();
        assert_eq!(ds.shape(), (3, 4));
        let labels: Vec<&str> = ds.dtypes().into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["int64", "float64", "object", "bool"]);
        assert_eq!(ds.column("score").unwrap().null_count(), 1);
    }

    #[test]
    fn test_null_tokens() {
        let ds = load("a,b\n1,NA\nnan,x\n3,None\n").unwrap();
        let a = ds.column("a").unwrap();
        assert_eq!(a.data_type(), &DataType::Int64);
        assert_eq!(a.null_count(), 1);
        let b = ds.column("b").unwrap();
        assert_eq!(b.data_type(), &DataType::Utf8);
        assert_eq!(b.null_count(), 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let ds = load("a,b,c\n1,2,3\n4\n").unwrap();
        assert_eq!(ds.shape(), (2, 3));
        assert_eq!(ds.column("c").unwrap().null_count(), 1);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = load("a,b\n1,2\n3,4,5\n").unwrap_err();
        match err {
            DataError::RaggedRow { line, expected, found } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(load(""), Err(DataError::NoColumns)));
    }

    #[test]
    fn test_header_only_file() {
        let ds = load("x,y\n").unwrap();
        assert_eq!(ds.shape(), (0, 2));
        assert_eq!(ds.categorical_columns(), vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let ds = load("a,,a\n1,2,3\n").unwrap();
        assert_eq!(ds.column_names(), vec!["a", "Unnamed: 1", "a.1"]);
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let bytes = b"a,b\n1,\xff\xfe\n";
        let result = read_csv("bad.csv", bytes, &LoadOptions::default());
        assert!(matches!(result, Err(DataError::Csv(_))));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = LoadOptions { delimiter: b';', ..LoadOptions::default() };
        let ds = read_csv("semi.csv", b"a;b\n1;2\n", &options).unwrap();
        assert_eq!(ds.numeric_columns(), vec!["a", "b"]);
    }
}
