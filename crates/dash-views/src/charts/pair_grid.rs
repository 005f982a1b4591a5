use egui::{Grid, Ui};
use egui_plot::Plot;

use dash_data::charts::PairGridData;
use dash_ui::WidgetId;

use super::{histogram, scatter};

const CELL_SIZE: f32 = 150.0;

/// Histograms on the diagonal, scatter plots elsewhere
pub fn show(ui: &mut Ui, grid: &PairGridData) {
    if grid.is_truncated() {
        ui.weak(format!(
            "Showing the first {} of {} numeric columns",
            grid.columns.len(),
            grid.total_numeric,
        ));
    }

    let n = grid.columns.len();

    egui::ScrollArea::both()
        .id_source("pairplot_scroll")
        .show(ui, |ui| {
            Grid::new("pairplot_grid")
                .spacing([4.0, 4.0])
                .show(ui, |ui| {
                    // Column captions
                    ui.label("");
                    for name in &grid.columns {
                        ui.strong(name.as_str());
                    }
                    ui.end_row();

                    for row in 0..n {
                        ui.strong(grid.columns[row].as_str());
                        for col in 0..n {
                            let id = WidgetId::new("pairplot").cell(row, col).build();
                            ui.allocate_ui(egui::vec2(CELL_SIZE, CELL_SIZE), |ui| {
                                cell(ui, grid, row, col, &id);
                            });
                        }
                        ui.end_row();
                    }
                });
        });
}

fn cell(ui: &mut Ui, grid: &PairGridData, row: usize, col: usize, id: &str) {
    if row == col {
        match &grid.histograms[row] {
            Some(hist) => histogram::plot(ui, hist, id, CELL_SIZE, false),
            None => {
                ui.weak("no values");
            }
        }
        return;
    }

    let points = grid.points(col, row);
    Plot::new(id)
        .width(CELL_SIZE)
        .height(CELL_SIZE)
        .show(ui, |plot_ui| {
            plot_ui.points(scatter::points(&points, 1.5));
        });
}
