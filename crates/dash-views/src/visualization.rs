//! Visualization view: chart type in the sidebar, column pickers in the page

use egui::{ComboBox, Ui};
use tracing::debug;

use dash_core::notice::{NO_CATEGORICAL_COLUMNS, NO_DATASET, NO_NUMERIC_COLUMNS};
use dash_core::{AppState, ColumnKind, Dataset, Notice};
use dash_data::{ChartKind, ChartSpec};
use dash_ui::{section_heading, show_notice};

use crate::{charts, require_dataset};

/// Keep `current` if it is still an option, otherwise fall back to the first
fn resolve(current: &mut Option<String>, options: &[String]) -> Option<String> {
    let valid = current.as_ref().is_some_and(|c| options.contains(c));
    if !valid {
        *current = options.first().cloned();
    }
    current.clone()
}

fn column_picker(ui: &mut Ui, label: &str, selected: &mut Option<String>, options: &[String]) {
    let shown = selected.clone().unwrap_or_default();
    ComboBox::from_label(label)
        .selected_text(shown)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(selected, Some(option.clone()), option.as_str());
            }
        });
}

#[derive(Debug, Clone, Default)]
pub struct VisualizationView {
    pub chart: ChartKind,
    pub column: Option<String>,
    pub category: Option<String>,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
}

impl VisualizationView {
    /// Chart type selector shown in the sidebar
    pub fn sidebar_ui(&mut self, ui: &mut Ui) {
        section_heading(ui, "Visualization Options");
        ComboBox::from_label("Select Plot Type")
            .selected_text(self.chart.label())
            .show_ui(ui, |ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut self.chart, kind, kind.label());
                }
            });
    }

    /// Turn the current selections into a chart request, or the warning to
    /// show when the chart has no usable columns
    pub fn build_spec(&mut self, dataset: &Dataset, max_pair_columns: usize) -> Result<ChartSpec, Notice> {
        let numeric = dataset.numeric_columns();
        let categorical = dataset.categorical_columns();
        let no_numeric = || Notice::warning(NO_NUMERIC_COLUMNS);

        let spec = match self.chart {
            ChartKind::Histogram => ChartSpec::Histogram {
                column: resolve(&mut self.column, &numeric).ok_or_else(no_numeric)?,
            },
            ChartKind::Box => ChartSpec::Box {
                column: resolve(&mut self.column, &numeric).ok_or_else(no_numeric)?,
            },
            ChartKind::Bar => ChartSpec::Bar {
                column: resolve(&mut self.category, &categorical)
                    .ok_or_else(|| Notice::warning(NO_CATEGORICAL_COLUMNS))?,
            },
            ChartKind::Scatter => ChartSpec::Scatter {
                x: resolve(&mut self.x_column, &numeric).ok_or_else(no_numeric)?,
                y: resolve(&mut self.y_column, &numeric).ok_or_else(no_numeric)?,
            },
            ChartKind::Heatmap | ChartKind::PairGrid if numeric.is_empty() => return Err(no_numeric()),
            ChartKind::Heatmap => ChartSpec::Heatmap,
            ChartKind::PairGrid => ChartSpec::PairGrid { max_columns: max_pair_columns },
        };

        Ok(spec)
    }

    fn selectors(&mut self, ui: &mut Ui, dataset: &Dataset) {
        let options = match self.chart.selector_kind() {
            Some(ColumnKind::Numeric) => dataset.numeric_columns(),
            Some(ColumnKind::Categorical) => dataset.categorical_columns(),
            None => return,
        };
        if options.is_empty() {
            return;
        }

        match self.chart {
            ChartKind::Histogram | ChartKind::Box => {
                column_picker(ui, "Select numeric column", &mut self.column, &options);
            }
            ChartKind::Bar => {
                column_picker(ui, "Select categorical column", &mut self.category, &options);
            }
            ChartKind::Scatter => {
                column_picker(ui, "X-axis", &mut self.x_column, &options);
                column_picker(ui, "Y-axis", &mut self.y_column, &options);
            }
            ChartKind::Heatmap | ChartKind::PairGrid => {}
        }
        ui.add_space(8.0);
    }

    pub fn ui(&mut self, ui: &mut Ui, state: &AppState) {
        let dataset = match require_dataset(state, NO_DATASET) {
            Ok(dataset) => dataset,
            Err(notice) => {
                show_notice(ui, &notice);
                return;
            }
        };

        // Resolve first so the pickers start on a valid column
        if let Err(notice) = self.build_spec(dataset, state.settings.max_pair_columns) {
            show_notice(ui, &notice);
            return;
        }
        self.selectors(ui, dataset);

        match self.build_spec(dataset, state.settings.max_pair_columns) {
            Ok(spec) => {
                debug!("Rendering {:?}", spec);
                charts::render(ui, &spec, dataset);
            }
            Err(notice) => show_notice(ui, &notice),
        }
    }
}
