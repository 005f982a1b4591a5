use egui::Ui;
use egui_plot::{MarkerShape, Plot, Points};

use dash_data::charts::ScatterData;
use dash_ui::plot_id;
use dash_ui::theme::categorical_color;

use super::PLOT_HEIGHT;

pub fn show(ui: &mut Ui, data: &ScatterData) {
    let id = plot_id("scatter", &[data.x_column.as_str(), data.y_column.as_str()]);

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(data.x_column.as_str())
        .y_axis_label(data.y_column.as_str())
        .show(ui, |plot_ui| {
            plot_ui.points(points(&data.points, 3.0));
        });

    ui.weak(format!("{} points", data.points.len()));
}

pub(crate) fn points(values: &[[f64; 2]], radius: f32) -> Points {
    Points::new(values.to_vec())
        .shape(MarkerShape::Circle)
        .filled(true)
        .radius(radius)
        .color(categorical_color(0))
}
