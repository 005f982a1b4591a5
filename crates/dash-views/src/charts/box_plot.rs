use egui::{Color32, Ui};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, MarkerShape, Plot, Points};

use dash_data::charts::BoxStats;
use dash_ui::plot_id;
use dash_ui::theme::categorical_color;

use super::PLOT_HEIGHT;

/// Horizontal box with whiskers at 1.5 IQR and outliers as points
pub fn show(ui: &mut Ui, stats: &BoxStats) {
    let color = categorical_color(0);

    Plot::new(plot_id("box", &[stats.column.as_str()]))
        .height(PLOT_HEIGHT * 0.6)
        .x_axis_label(stats.column.as_str())
        .show(ui, |plot_ui| {
            let spread = BoxSpread::new(
                stats.lower_whisker,
                stats.q1,
                stats.median,
                stats.q3,
                stats.upper_whisker,
            );

            let elem = BoxElem::new(0.0, spread)
                .name(&stats.column)
                .box_width(0.5)
                .whisker_width(0.25)
                .fill(color.linear_multiply(0.5));

            plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal().color(color));

            if !stats.outliers.is_empty() {
                let points: Vec<[f64; 2]> = stats.outliers.iter().map(|&v| [v, 0.0]).collect();
                plot_ui.points(
                    Points::new(points)
                        .shape(MarkerShape::Diamond)
                        .radius(4.0)
                        .color(Color32::from_gray(90))
                        .name("Outliers"),
                );
            }
        });

    ui.horizontal(|ui| {
        ui.label(format!("Q1: {:.2}", stats.q1));
        ui.separator();
        ui.label(format!("Median: {:.2}", stats.median));
        ui.separator();
        ui.label(format!("Q3: {:.2}", stats.q3));
        ui.separator();
        ui.label(format!("Mean: {:.2}", stats.mean));
    });
}
