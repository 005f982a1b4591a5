//! Descriptive statistics
//!
//! `describe` builds the table shown by the summary view and serialized by
//! the report. Numeric columns get moments and quantiles; other columns get
//! frequency statistics.

use ahash::AHashMap;
use arrow::array::Array;

use dash_core::{ColumnKind, Dataset};
use crate::DataError;
use crate::column::{format_number, numeric_values, text_values};

/// One cell of the describe table
#[derive(Debug, Clone, PartialEq)]
pub enum StatCell {
    Empty,
    Number(f64),
    Count(usize),
    Text(String),
}

impl StatCell {
    /// Text shown in on-screen tables
    pub fn display(&self) -> String {
        match self {
            StatCell::Empty => "NaN".to_string(),
            StatCell::Number(v) => format_number(*v),
            StatCell::Count(n) => n.to_string(),
            StatCell::Text(s) => s.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatCell::Number(v) => Some(*v),
            StatCell::Count(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl From<Option<f64>> for StatCell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(StatCell::Empty, StatCell::Number)
    }
}

/// A labelled row of statistics, one cell per dataset column
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub label: &'static str,
    pub cells: Vec<StatCell>,
}

/// Statistics laid out with one row per statistic and one column per
/// dataset column
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    pub columns: Vec<String>,
    pub rows: Vec<StatRow>,
}

impl StatsTable {
    pub fn row(&self, label: &str) -> Option<&StatRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Cell lookup by statistic label and column name
    pub fn cell(&self, label: &str, column: &str) -> Option<&StatCell> {
        let col_idx = self.columns.iter().position(|c| c == column)?;
        self.row(label)?.cells.get(col_idx)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.rows.iter().map(|r| r.label).collect()
    }
}

const CATEGORICAL_ROWS: [&str; 3] = ["unique", "top", "freq"];
const NUMERIC_ROWS: [&str; 7] = ["mean", "std", "min", "25%", "50%", "75%", "max"];

/// Per-column numeric moments and quantiles
#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl NumericStats {
    /// `None` for an empty slice
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let (q1, median, q3) = calculate_quartiles(&sorted);

        Some(Self {
            count: values.len(),
            mean: mean(values)?,
            std_dev: sample_std(values),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Frequency statistics for a non-numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyStats {
    pub count: usize,
    pub unique: usize,
    pub top: String,
    pub freq: usize,
}

impl FrequencyStats {
    /// `None` when there are no values; ties for `top` go to the value seen first
    pub fn from_values(values: &[String]) -> Option<Self> {
        let counts = value_counts(values);
        let (top, freq) = counts.first()?.clone();

        Some(Self {
            count: values.len(),
            unique: counts.len(),
            top,
            freq,
        })
    }
}

/// Distinct values with their counts, most frequent first, ties in
/// first-seen order
pub fn value_counts(values: &[String]) -> Vec<(String, usize)> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(value.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter()
        .map(|v| (v - m).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(quantile_sorted(&sorted, 0.5))
}

/// Calculate quartiles of sorted values using linear interpolation
pub fn calculate_quartiles(sorted: &[f64]) -> (f64, f64, f64) {
    if sorted.is_empty() {
        return (f64::NAN, f64::NAN, f64::NAN);
    }

    (
        quantile_sorted(sorted, 0.25),
        quantile_sorted(sorted, 0.5),
        quantile_sorted(sorted, 0.75),
    )
}

/// Quantile of non-empty sorted values, interpolating between neighbours
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let idx = (sorted.len() - 1) as f64 * q;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Descriptive statistics over all columns.
///
/// Rows are `count, unique, top, freq, mean, std, min, 25%, 50%, 75%, max`;
/// the frequency rows appear only when a non-numeric column exists and the
/// numeric rows only when a numeric column exists.
pub fn describe(dataset: &Dataset) -> Result<StatsTable, DataError> {
    let schema = dataset.schema();
    let columns = dataset.column_names();

    let mut has_numeric = false;
    let mut has_categorical = false;
    let mut per_column: Vec<AHashMap<&'static str, StatCell>> = Vec::with_capacity(columns.len());

    for (idx, field) in schema.fields().iter().enumerate() {
        let array = dataset.batch().column(idx);
        let mut cells = AHashMap::new();

        match ColumnKind::of(field.data_type()) {
            ColumnKind::Numeric => {
                has_numeric = true;
                let values: Vec<f64> = numeric_values(array)?.into_iter().flatten().collect();
                cells.insert("count", StatCell::Number(values.len() as f64));

                if let Some(stats) = NumericStats::from_values(&values) {
                    cells.insert("mean", StatCell::Number(stats.mean));
                    cells.insert("std", stats.std_dev.into());
                    cells.insert("min", StatCell::Number(stats.min));
                    cells.insert("25%", StatCell::Number(stats.q1));
                    cells.insert("50%", StatCell::Number(stats.median));
                    cells.insert("75%", StatCell::Number(stats.q3));
                    cells.insert("max", StatCell::Number(stats.max));
                }
            }
            ColumnKind::Categorical => {
                has_categorical = true;
                let values = text_values(array);
                cells.insert("count", StatCell::Count(array.len() - array.null_count()));

                if let Some(stats) = FrequencyStats::from_values(&values) {
                    cells.insert("unique", StatCell::Count(stats.unique));
                    cells.insert("top", StatCell::Text(stats.top));
                    cells.insert("freq", StatCell::Count(stats.freq));
                }
            }
        }

        per_column.push(cells);
    }

    let mut labels = vec!["count"];
    if has_categorical {
        labels.extend(CATEGORICAL_ROWS);
    }
    if has_numeric {
        labels.extend(NUMERIC_ROWS);
    }

    let rows = labels.into_iter()
        .map(|label| StatRow {
            label,
            cells: per_column.iter()
                .map(|cells| cells.get(label).cloned().unwrap_or(StatCell::Empty))
                .collect(),
        })
        .collect();

    Ok(StatsTable { columns, rows })
}

/// Mean, median and standard deviation of one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummaryRow {
    pub column: String,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Numeric-only companion table to `describe`
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub rows: Vec<NumericSummaryRow>,
}

/// `Ok(None)` when the dataset has no numeric columns
pub fn numeric_summary(dataset: &Dataset) -> Result<Option<NumericSummary>, DataError> {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return Ok(None);
    }

    let mut rows = Vec::with_capacity(numeric.len());
    for name in numeric {
        let values = crate::column::numeric_column(dataset, &name)?;
        rows.push(NumericSummaryRow {
            mean: mean(&values),
            median: median(&values),
            std_dev: sample_std(&values),
            column: name,
        });
    }

    Ok(Some(NumericSummary { rows }))
}
