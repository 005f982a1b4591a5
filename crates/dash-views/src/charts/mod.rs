//! Chart rendering with `egui_plot` and the painter
//!
//! [`render`] prepares the numbers through `dash_data::charts` and draws the
//! result. Preparation errors stay inside the chart area as an error notice.

mod bar;
mod box_plot;
mod heatmap;
mod histogram;
mod pair_grid;
mod scatter;

pub use heatmap::{correlation_heatmap, null_heatmap};

use egui::Ui;
use tracing::warn;

use dash_core::{Dataset, Notice};
use dash_data::charts::{prepare, ChartData, ChartSpec};

/// Default height of a single chart
pub(crate) const PLOT_HEIGHT: f32 = 320.0;

/// Draw one chart for the dataset
pub fn render(ui: &mut Ui, spec: &ChartSpec, dataset: &Dataset) {
    match prepare(spec, dataset) {
        Ok(data) => render_data(ui, &data),
        Err(e) => {
            warn!("Could not prepare {}: {}", spec.kind().label(), e);
            dash_ui::show_notice(ui, &Notice::error(e.to_string()));
        }
    }
}

/// Draw already prepared chart data
pub fn render_data(ui: &mut Ui, data: &ChartData) {
    match data {
        ChartData::Histogram(hist) => histogram::show(ui, hist),
        ChartData::ValueCounts(counts) => bar::show(ui, counts),
        ChartData::Box(stats) => box_plot::show(ui, stats),
        ChartData::Correlation(matrix) => correlation_heatmap(ui, matrix),
        ChartData::Scatter(points) => scatter::show(ui, points),
        ChartData::PairGrid(grid) => pair_grid::show(ui, grid),
    }
}
