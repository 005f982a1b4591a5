use egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use dash_data::charts::HistogramData;
use dash_ui::plot_id;
use dash_ui::theme::categorical_color;

use super::PLOT_HEIGHT;

pub fn show(ui: &mut Ui, data: &HistogramData) {
    plot(ui, data, &plot_id("histogram", &[data.column.as_str()]), PLOT_HEIGHT, true);
}

/// Bars plus KDE line; also used for the pairwise grid diagonal
pub(crate) fn plot(ui: &mut Ui, data: &HistogramData, id: &str, height: f32, labelled: bool) {
    let color = categorical_color(0);

    let mut plot = Plot::new(id).height(height);
    if labelled {
        plot = plot
            .legend(Legend::default())
            .x_axis_label(data.column.as_str())
            .y_axis_label("Count");
    }

    plot.show(ui, |plot_ui| {
        let bars = data.bins.iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .fill(color.linear_multiply(0.6))
            })
            .collect();

        plot_ui.bar_chart(BarChart::new(bars).color(color).name("Count"));

        if !data.kde.is_empty() {
            plot_ui.line(
                Line::new(PlotPoints::new(data.kde.clone()))
                    .color(Color32::from_rgb(30, 60, 120))
                    .width(2.0)
                    .name("KDE"),
            );
        }
    });
}
