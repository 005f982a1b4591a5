//! Summary view: `describe` over all columns plus numeric mean/median/std

use egui::Ui;
use tracing::error;

use dash_core::notice::{NO_DATASET, NO_NUMERIC_COLUMNS};
use dash_core::{AppState, Dataset, Notice};
use dash_data::stats::{numeric_summary, NumericSummary};
use dash_data::{describe, DataError, StatsTable};
use dash_ui::{section_heading, show_notice, WidgetId};

use crate::require_dataset;
use crate::tables::{show_table, TextTable};

/// Everything the summary view shows
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryContent {
    pub describe: StatsTable,
    /// Warning in place of the table when there are no numeric columns
    pub numeric: Result<NumericSummary, Notice>,
}

pub fn summary_content(dataset: &Dataset) -> Result<SummaryContent, DataError> {
    let describe = describe(dataset)?;
    let numeric = numeric_summary(dataset)?.ok_or_else(|| Notice::warning(NO_NUMERIC_COLUMNS));

    Ok(SummaryContent { describe, numeric })
}

pub fn ui(ui: &mut Ui, state: &AppState) {
    let dataset = match require_dataset(state, NO_DATASET) {
        Ok(dataset) => dataset,
        Err(notice) => {
            show_notice(ui, &notice);
            return;
        }
    };

    let content = match summary_content(dataset) {
        Ok(content) => content,
        Err(e) => {
            error!("Summary failed for {}: {}", dataset.name(), e);
            show_notice(ui, &Notice::error(e.to_string()));
            return;
        }
    };

    section_heading(ui, "Descriptive Statistics");
    show_table(ui, WidgetId::new("summary").with("describe"), &TextTable::from_stats(&content.describe));

    section_heading(ui, "Numeric Analysis");
    match &content.numeric {
        Ok(summary) => show_table(
            ui,
            WidgetId::new("summary").with("numeric"),
            &TextTable::from_numeric_summary(summary),
        ),
        Err(notice) => show_notice(ui, notice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_data::{read_csv, LoadOptions};

    #[test]
    fn test_text_only_dataset_warns() {
        let ds = read_csv("t.csv", b"name\nAnn\nBob\n", &LoadOptions::default()).unwrap();
        let content = summary_content(&ds).unwrap();
        assert_eq!(content.numeric, Err(Notice::warning("No numeric columns available.")));
        assert_eq!(content.describe.labels(), vec!["count", "unique", "top", "freq"]);
    }

    #[test]
    fn test_numeric_rows_follow_numeric_columns() {
        let ds = read_csv("n.csv", b"a,label,b\n1,x,4\n3,y,\n", &LoadOptions::default()).unwrap();
        let summary = summary_content(&ds).unwrap().numeric.unwrap();
        let names: Vec<&str> = summary.rows.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(summary.rows[0].median, Some(2.0));
        assert_eq!(summary.rows[1].std_dev, None);
    }
}
