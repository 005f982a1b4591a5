//! Striped tables for previews, statistics and per-column listings

use arrow::record_batch::RecordBatch;
use egui::{Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use dash_data::column::{display_value, format_number};
use dash_data::stats::NumericSummary;
use dash_data::StatsTable;
use dash_ui::{ScrollAreaExt, WidgetId};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

/// Rows of text under a header, the shape every table here reduces to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Preview of a batch with a leading row-index column
    pub fn from_batch(batch: &RecordBatch) -> Self {
        let schema = batch.schema();
        let headers = std::iter::once(String::new())
            .chain(schema.fields().iter().map(|f| f.name().clone()))
            .collect();

        let rows = (0..batch.num_rows())
            .map(|row| {
                std::iter::once(row.to_string())
                    .chain(batch.columns().iter().map(|c| display_value(c, row)))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Statistic labels down the side, dataset columns across
    pub fn from_stats(table: &StatsTable) -> Self {
        let headers = std::iter::once(String::new())
            .chain(table.columns.iter().cloned())
            .collect();

        let rows = table.rows.iter()
            .map(|row| {
                std::iter::once(row.label.to_string())
                    .chain(row.cells.iter().map(|c| c.display()))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn from_numeric_summary(summary: &NumericSummary) -> Self {
        let fmt = |v: Option<f64>| v.map(format_number).unwrap_or_else(|| "NaN".to_string());

        Self {
            headers: vec![String::new(), "Mean".into(), "Median".into(), "Std Dev".into()],
            rows: summary.rows.iter()
                .map(|r| vec![r.column.clone(), fmt(r.mean), fmt(r.median), fmt(r.std_dev)])
                .collect(),
        }
    }

    /// Two-column listing such as column types or null counts
    pub fn from_pairs<V: ToString>(value_header: &str, pairs: &[(String, V)]) -> Self {
        Self {
            headers: vec![String::new(), value_header.to_string()],
            rows: pairs.iter()
                .map(|(k, v)| vec![k.clone(), v.to_string()])
                .collect(),
        }
    }
}

/// Draw a table inside its own id scope and horizontal scroll area
pub fn show_table(ui: &mut Ui, id: WidgetId, table: &TextTable) {
    let scroll_id = id.clone().with("scroll");

    ui.push_id(id.id(), |ui| {
        ScrollArea::horizontal()
            .id_builder(scroll_id)
            .show(ui, |ui| {
                let mut builder = TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .vscroll(false)
                    .cell_layout(Layout::left_to_right(Align::Center));

                for _ in &table.headers {
                    builder = builder.column(Column::auto().at_least(60.0));
                }

                builder
                    .header(HEADER_HEIGHT, |mut header| {
                        for title in &table.headers {
                            header.col(|ui| {
                                ui.strong(title.as_str());
                            });
                        }
                    })
                    .body(|mut body| {
                        for cells in &table.rows {
                            body.row(ROW_HEIGHT, |mut row| {
                                for cell in cells {
                                    row.col(|ui| {
                                        ui.label(cell.as_str());
                                    });
                                }
                            });
                        }
                    });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_data::{describe, read_csv, LoadOptions};

    #[test]
    fn test_batch_preview_rows() {
        let ds = read_csv("p.csv", b"a,b\n1,x\n,y\n", &LoadOptions::default()).unwrap();
        let table = TextTable::from_batch(&ds.head(5));
        assert_eq!(table.headers, vec!["", "a", "b"]);
        assert_eq!(table.rows, vec![
            vec!["0".to_string(), "1".to_string(), "x".to_string()],
            vec!["1".to_string(), "NaN".to_string(), "y".to_string()],
        ]);
    }

    #[test]
    fn test_stats_table_text() {
        let ds = read_csv("s.csv", b"v\n1\n3\n", &LoadOptions::default()).unwrap();
        let table = TextTable::from_stats(&describe(&ds).unwrap());
        assert_eq!(table.rows[0], vec!["count".to_string(), "2".to_string()]);
        assert_eq!(table.rows[1], vec!["mean".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_table_renders_headless() {
        let ctx = egui::Context::default();
        let table = TextTable::from_pairs("dtype", &[("a".to_string(), "int64")]);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                show_table(ui, WidgetId::new("test_table"), &table);
            });
        });
    }
}
