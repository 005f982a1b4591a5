//! Helpers for reading values out of arrow columns

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;

use dash_core::{ColumnKind, Dataset};
use crate::DataError;

/// Column values as `f64`, keeping nulls in place
pub fn numeric_values(array: &ArrayRef) -> Result<Vec<Option<f64>>, DataError> {
    let casted = cast(array, &DataType::Float64)?;
    let floats = casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataError::Csv("cast to Float64 produced an unexpected array".to_string()))?;

    Ok(floats.iter().collect())
}

/// Non-null values of a named numeric column
pub fn numeric_column(dataset: &Dataset, name: &str) -> Result<Vec<f64>, DataError> {
    let array = dataset.column(name)
        .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;

    if ColumnKind::of(array.data_type()) != ColumnKind::Numeric {
        return Err(DataError::NotNumeric(name.to_string()));
    }

    Ok(numeric_values(array)?.into_iter().flatten().collect())
}

/// Text shown for a single cell; nulls render as `NaN` or `None`
pub fn display_value(array: &ArrayRef, row: usize) -> String {
    if array.is_null(row) {
        return match ColumnKind::of(array.data_type()) {
            ColumnKind::Numeric => "NaN".to_string(),
            ColumnKind::Categorical => "None".to_string(),
        };
    }

    match array.data_type() {
        DataType::Boolean => match array_value_to_string(array, row).as_deref() {
            Ok("true") => "True".to_string(),
            Ok("false") => "False".to_string(),
            Ok(other) => other.to_string(),
            Err(_) => String::new(),
        },
        _ => array_value_to_string(array, row).unwrap_or_default(),
    }
}

/// Non-null cells of any column as display strings
pub fn text_values(array: &ArrayRef) -> Vec<String> {
    (0..array.len())
        .filter(|&i| array.is_valid(i))
        .map(|i| display_value(array, i))
        .collect()
}

/// Format a statistic for on-screen tables
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let text = format!("{:.6}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{BooleanArray, Int64Array, StringArray};

    #[test]
    fn test_numeric_values_keep_nulls() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None, Some(3)]));
        assert_eq!(numeric_values(&array).unwrap(), vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_display_value() {
        let ints: ArrayRef = Arc::new(Int64Array::from(vec![Some(4), None]));
        let text: ArrayRef = Arc::new(StringArray::from(vec![None, Some("x")]));
        let flags: ArrayRef = Arc::new(BooleanArray::from(vec![true, false]));

        assert_eq!(display_value(&ints, 0), "4");
        assert_eq!(display_value(&ints, 1), "NaN");
        assert_eq!(display_value(&text, 0), "None");
        assert_eq!(display_value(&text, 1), "x");
        assert_eq!(display_value(&flags, 0), "True");
        assert_eq!(text_values(&text), vec!["x"]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(27.5), "27.5");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(-0.0000001), "0");
    }
}
