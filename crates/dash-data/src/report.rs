//! CSV serialization of the descriptive statistics table

use csv::WriterBuilder;
use tracing::info;

use dash_core::Dataset;
use crate::DataError;
use crate::stats::{describe, StatCell, StatsTable};

pub const REPORT_MIME: &str = "text/csv";
pub const DEFAULT_REPORT_NAME: &str = "summary_report.csv";

/// A downloadable file held in memory until the user picks a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Float text as it appears in the report: shortest round-trip form, with
/// integral values keeping a trailing `.0`.
pub fn format_report_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn cell_text(cell: &StatCell) -> String {
    match cell {
        StatCell::Empty => String::new(),
        StatCell::Number(v) => format_report_float(*v),
        StatCell::Count(n) => n.to_string(),
        StatCell::Text(s) => s.clone(),
    }
}

/// Encode a stats table with the statistic labels as the first column
pub fn stats_table_to_csv(table: &StatsTable) -> Result<Vec<u8>, DataError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    let header = std::iter::once(String::new()).chain(table.columns.iter().cloned());
    writer.write_record(header)?;

    for row in &table.rows {
        let record = std::iter::once(row.label.to_string())
            .chain(row.cells.iter().map(cell_text));
        writer.write_record(record)?;
    }

    writer.into_inner().map_err(|e| DataError::Report(e.to_string()))
}

/// Build the summary report for a dataset
pub fn build_report(dataset: &Dataset, file_name: &str) -> Result<ReportArtifact, DataError> {
    let table = describe(dataset)?;
    let bytes = stats_table_to_csv(&table)?;

    info!("Built report {} for {} ({} bytes)", file_name, dataset.name(), bytes.len());

    Ok(ReportArtifact {
        file_name: file_name.to_string(),
        mime: REPORT_MIME,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::sources::read_csv;

    fn report_text(csv: &str) -> String {
        let ds = read_csv("r.csv", csv.as_bytes(), &LoadOptions::default()).unwrap();
        let artifact = build_report(&ds, DEFAULT_REPORT_NAME).unwrap();
        assert_eq!(artifact.mime, "text/csv");
        assert_eq!(artifact.file_name, "summary_report.csv");
        String::from_utf8(artifact.bytes).unwrap()
    }

    #[test]
    fn test_format_report_float() {
        assert_eq!(format_report_float(3.0), "3.0");
        assert_eq!(format_report_float(27.5), "27.5");
        assert_eq!(format_report_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_report_float(f64::NAN), "");
    }

    #[test]
    fn test_numeric_report_layout() {
        let text = report_text("a\n1\n2\n3\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            ",a",
            "count,3.0",
            "mean,2.0",
            "std,1.0",
            "min,1.0",
            "25%,1.5",
            "50%,2.0",
            "75%,2.5",
            "max,3.0",
        ]);
    }

    #[test]
    fn test_mixed_report_has_empty_cells() {
        let text = report_text("n,city\n1,A\n3,A\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ",n,city");
        assert_eq!(lines[1], "count,2.0,2");
        assert_eq!(lines[2], "unique,,1");
        assert_eq!(lines[3], "top,,A");
        assert_eq!(lines[4], "freq,,2");
        assert_eq!(lines[5], "mean,2.0,");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_text_is_quoted_when_needed() {
        let text = report_text("label\n\"x, y\"\n");
        assert!(text.contains("top,\"x, y\""));
    }
}
