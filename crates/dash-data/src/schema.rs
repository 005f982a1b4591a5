//! Column naming and type detection for parsed text cells

use ahash::AHashSet;
use arrow::datatypes::DataType;

/// Normalize raw header cells into unique column names.
///
/// Blank names become `Unnamed: <index>`; repeated names get a `.N` suffix.
pub fn normalize_headers<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut names = Vec::new();

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Positional names used when the file has no header record
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Pick the narrowest type every non-null cell of a column parses as
pub fn detect_column_type<'a>(values: impl IntoIterator<Item = &'a str>) -> DataType {
    let mut seen_any = false;
    let mut is_bool = true;
    let mut is_int = true;
    let mut is_float = true;

    for value in values {
        seen_any = true;

        if is_bool && parse_bool(value).is_none() {
            is_bool = false;
        }
        if is_int && value.parse::<i64>().is_err() {
            is_int = false;
        }
        if is_float && value.parse::<f64>().is_err() {
            is_float = false;
        }

        if !is_bool && !is_float {
            break;
        }
    }

    if !seen_any {
        DataType::Utf8
    } else if is_bool {
        DataType::Boolean
    } else if is_int {
        DataType::Int64
    } else if is_float {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers() {
        let names = normalize_headers(["a", "", "a", "b", "a"]);
        assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", "b", "a.2"]);
    }

    #[test]
    fn test_normalize_avoids_existing_suffix() {
        let names = normalize_headers(["a.1", "a", "a"]);
        assert_eq!(names, vec!["a.1", "a", "a.2"]);
    }

    #[test]
    fn test_detect_column_type() {
        assert_eq!(detect_column_type(["1", "2", "-3"]), DataType::Int64);
        assert_eq!(detect_column_type(["1", "2.5"]), DataType::Float64);
        assert_eq!(detect_column_type(["1e3", "inf"]), DataType::Float64);
        assert_eq!(detect_column_type(["True", "false"]), DataType::Boolean);
        assert_eq!(detect_column_type(["true", "1"]), DataType::Utf8);
        assert_eq!(detect_column_type(["x", "1"]), DataType::Utf8);
        assert_eq!(detect_column_type(std::iter::empty::<&str>()), DataType::Utf8);
    }
}
