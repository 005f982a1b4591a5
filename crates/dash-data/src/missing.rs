//! Missing value inspection and the two remediation strategies

use std::sync::Arc;
use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array};
use arrow::compute::filter_record_batch;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use tracing::{debug, info};

use dash_core::{ColumnKind, Dataset};
use crate::DataError;
use crate::column::numeric_values;
use crate::stats::mean;

/// Remediation offered by the missing-data view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAction {
    #[default]
    None,
    DropRows,
    FillMean,
}

impl MissingAction {
    pub const ALL: [MissingAction; 3] = [
        MissingAction::None,
        MissingAction::DropRows,
        MissingAction::FillMean,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MissingAction::None => "None",
            MissingAction::DropRows => "Drop missing rows",
            MissingAction::FillMean => "Fill missing with mean",
        }
    }

    /// Confirmation shown after the action ran
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            MissingAction::None => None,
            MissingAction::DropRows => Some("Missing rows dropped."),
            MissingAction::FillMean => Some("Missing values filled with column means."),
        }
    }
}

/// What an action changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    pub rows_removed: usize,
    pub columns_filled: Vec<String>,
}

/// Null count for every column, in schema order
pub fn null_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    dataset.schema()
        .fields()
        .iter()
        .zip(dataset.batch().columns())
        .map(|(field, column)| (field.name().clone(), column.null_count()))
        .collect()
}

/// Only the columns that have at least one null
pub fn columns_with_nulls(dataset: &Dataset) -> Vec<(String, usize)> {
    null_counts(dataset)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Mask that is `true` for rows without any null
fn complete_rows(batch: &RecordBatch) -> BooleanArray {
    (0..batch.num_rows())
        .map(|row| Some(batch.columns().iter().all(|c| c.is_valid(row))))
        .collect()
}

/// Number of rows with at least one null
pub fn rows_with_nulls(dataset: &Dataset) -> usize {
    let mask = complete_rows(dataset.batch());
    mask.len() - mask.true_count()
}

/// Remove every row that contains a null. Returns the number removed.
pub fn drop_null_rows(dataset: &mut Dataset) -> Result<usize, DataError> {
    let before = dataset.num_rows();
    let mask = complete_rows(dataset.batch());
    let filtered = filter_record_batch(dataset.batch(), &mask)?;
    let removed = before - filtered.num_rows();

    dataset.replace_batch(filtered);
    info!("Dropped {} of {} rows containing nulls", removed, before);

    Ok(removed)
}

/// Replace nulls in numeric columns with the column mean.
///
/// Non-numeric columns keep their nulls. Filled integer columns become
/// floating point. A numeric column with no values at all is left alone.
/// Returns the names of the columns that were filled.
pub fn fill_numeric_with_mean(dataset: &mut Dataset) -> Result<Vec<String>, DataError> {
    let schema = dataset.schema();
    let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    let mut filled = Vec::new();

    for (field, column) in schema.fields().iter().zip(dataset.batch().columns()) {
        let fillable = ColumnKind::of(field.data_type()) == ColumnKind::Numeric
            && column.null_count() > 0;

        if !fillable {
            fields.push(field.as_ref().clone());
            columns.push(column.clone());
            continue;
        }

        let values = numeric_values(column)?;
        let present: Vec<f64> = values.iter().flatten().copied().collect();

        match mean(&present) {
            Some(fill) => {
                debug!("Filling {} nulls in {} with {}", column.null_count(), field.name(), fill);
                let replaced: Float64Array = values.iter()
                    .map(|v| Some(v.unwrap_or(fill)))
                    .collect();
                fields.push(Field::new(field.name(), DataType::Float64, true));
                columns.push(Arc::new(replaced));
                filled.push(field.name().clone());
            }
            None => {
                fields.push(field.as_ref().clone());
                columns.push(column.clone());
            }
        }
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    dataset.replace_batch(batch);
    info!("Filled nulls with column means in {:?}", filled);

    Ok(filled)
}

/// Apply a remediation to the dataset
pub fn apply_action(dataset: &mut Dataset, action: MissingAction) -> Result<ActionOutcome, DataError> {
    match action {
        MissingAction::None => Ok(ActionOutcome::default()),
        MissingAction::DropRows => Ok(ActionOutcome {
            rows_removed: drop_null_rows(dataset)?,
            columns_filled: Vec::new(),
        }),
        MissingAction::FillMean => Ok(ActionOutcome {
            rows_removed: 0,
            columns_filled: fill_numeric_with_mean(dataset)?,
        }),
    }
}

/// Null locations aggregated into row bands for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct NullMask {
    pub columns: Vec<String>,
    pub total_rows: usize,
    /// Rows covered by each band
    pub rows_per_band: usize,
    /// `bands[band][column]` is the fraction of null cells in that band
    pub bands: Vec<Vec<f32>>,
}

impl NullMask {
    /// Build a mask with at most `max_bands` bands. With fewer rows than
    /// bands every band is a single row and the values are 0 or 1.
    pub fn from_dataset(dataset: &Dataset, max_bands: usize) -> Self {
        let rows = dataset.num_rows();
        let max_bands = max_bands.max(1);
        let rows_per_band = if rows == 0 { 1 } else { rows.div_ceil(max_bands) };
        let band_count = rows.div_ceil(rows_per_band);

        let mut bands = vec![vec![0.0f32; dataset.num_columns()]; band_count];

        for (col_idx, column) in dataset.batch().columns().iter().enumerate() {
            if column.null_count() == 0 {
                continue;
            }
            for (band_idx, band) in bands.iter_mut().enumerate() {
                let start = band_idx * rows_per_band;
                let end = (start + rows_per_band).min(rows);
                let nulls = (start..end).filter(|&r| column.is_null(r)).count();
                band[col_idx] = nulls as f32 / (end - start) as f32;
            }
        }

        Self {
            columns: dataset.column_names(),
            total_rows: rows,
            rows_per_band,
            bands,
        }
    }

    pub fn has_nulls(&self) -> bool {
        self.bands.iter().flatten().any(|&f| f > 0.0)
    }
}
