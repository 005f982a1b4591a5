use egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use dash_data::charts::ValueCountsData;
use dash_ui::plot_id;
use dash_ui::theme::categorical_color;

use super::PLOT_HEIGHT;

/// Value counts as bars at integer positions, most frequent first
pub fn show(ui: &mut Ui, data: &ValueCountsData) {
    let color = categorical_color(0);

    Plot::new(plot_id("bar", &[data.column.as_str()]))
        .height(PLOT_HEIGHT)
        .x_axis_label(data.column.as_str())
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            let bars = data.counts.iter()
                .enumerate()
                .map(|(i, (value, count))| {
                    Bar::new(i as f64, *count as f64)
                        .width(0.5)
                        .name(value)
                })
                .collect();

            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });

    // Category names for the bar positions
    ui.horizontal_wrapped(|ui| {
        for (i, (value, count)) in data.counts.iter().enumerate() {
            ui.weak(format!("{}: {} ({})", i, value, count));
        }
    });
}
