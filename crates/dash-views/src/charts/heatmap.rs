//! Painter-drawn matrices: the correlation heatmap and the null-location map

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use dash_data::charts::CorrelationMatrix;
use dash_data::missing::NullMask;
use dash_ui::theme::{diverging_color, error_color};

const LABEL_MARGIN: f32 = 100.0;
const MAX_CELL: f32 = 60.0;

/// Annotated correlation matrix on a diverging blue-red scale
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.columns.len();
    let available = ui.available_width() - LABEL_MARGIN - 60.0;
    let cell_size = (available / n as f32).clamp(12.0, MAX_CELL);
    let side = cell_size * n as f32;

    let (response, painter) = ui.allocate_painter(
        Vec2::new(LABEL_MARGIN + side + 60.0, LABEL_MARGIN + side),
        Sense::hover(),
    );
    let grid = Rect::from_min_size(
        response.rect.min + Vec2::new(LABEL_MARGIN, LABEL_MARGIN * 0.3),
        Vec2::splat(side),
    );

    for i in 0..n {
        for j in 0..n {
            let cell = Rect::from_min_size(
                grid.min + Vec2::new(j as f32 * cell_size, i as f32 * cell_size),
                Vec2::splat(cell_size),
            );

            match matrix.get(i, j) {
                Some(r) => {
                    painter.rect_filled(cell, 0.0, diverging_color(r));
                    if cell_size > 24.0 {
                        let text_color = if r.abs() > 0.5 { Color32::WHITE } else { Color32::BLACK };
                        painter.text(
                            cell.center(),
                            Align2::CENTER_CENTER,
                            format!("{:.2}", r),
                            FontId::proportional(10.0),
                            text_color,
                        );
                    }
                }
                None => {
                    painter.rect_stroke(cell.shrink(1.0), 0.0, Stroke::new(1.0, Color32::from_gray(80)));
                }
            }
        }
    }

    for (i, name) in matrix.columns.iter().enumerate() {
        painter.text(
            Pos2::new(grid.min.x - 5.0, grid.min.y + (i as f32 + 0.5) * cell_size),
            Align2::RIGHT_CENTER,
            name,
            FontId::proportional(10.0),
            Color32::GRAY,
        );
        painter.text(
            Pos2::new(grid.min.x + (i as f32 + 0.5) * cell_size, grid.max.y + 4.0),
            Align2::CENTER_TOP,
            name,
            FontId::proportional(10.0),
            Color32::GRAY,
        );
    }

    // Color scale
    let legend = Rect::from_min_size(Pos2::new(grid.max.x + 15.0, grid.min.y), Vec2::new(14.0, side));
    for step in 0..100 {
        let t = step as f32 / 99.0;
        let y = legend.min.y + t * legend.height();
        painter.line_segment(
            [Pos2::new(legend.min.x, y), Pos2::new(legend.max.x, y)],
            Stroke::new(2.0, diverging_color(1.0 - 2.0 * t as f64)),
        );
    }
    for (label, y, align) in [
        ("1.0", legend.min.y, Align2::LEFT_TOP),
        ("0.0", legend.center().y, Align2::LEFT_CENTER),
        ("-1.0", legend.max.y, Align2::LEFT_BOTTOM),
    ] {
        let pos = Pos2::new(legend.max.x + 4.0, y);
        painter.text(pos, align, label, FontId::proportional(10.0), Color32::GRAY);
    }
}

/// Null locations with rows running down and columns across
pub fn null_heatmap(ui: &mut Ui, mask: &NullMask) {
    let n_cols = mask.columns.len().max(1);
    let n_bands = mask.bands.len().max(1);

    let width = (ui.available_width() - LABEL_MARGIN).max(100.0);
    let col_width = width / n_cols as f32;
    let height = 300.0f32;
    let band_height = height / n_bands as f32;

    let (response, painter) = ui.allocate_painter(
        Vec2::new(LABEL_MARGIN + width, height + 40.0),
        Sense::hover(),
    );
    let area = Rect::from_min_size(
        response.rect.min + Vec2::new(LABEL_MARGIN, 0.0),
        Vec2::new(width, height),
    );

    painter.rect_filled(area, 0.0, Color32::from_gray(30));

    for (band_idx, band) in mask.bands.iter().enumerate() {
        for (col_idx, &fraction) in band.iter().enumerate() {
            if fraction <= 0.0 {
                continue;
            }
            let cell = Rect::from_min_size(
                area.min + Vec2::new(col_idx as f32 * col_width, band_idx as f32 * band_height),
                Vec2::new(col_width, band_height.max(1.0)),
            );
            painter.rect_filled(cell, 0.0, error_color().linear_multiply(fraction.clamp(0.15, 1.0)));
        }
    }

    for (i, name) in mask.columns.iter().enumerate() {
        painter.text(
            Pos2::new(area.min.x + (i as f32 + 0.5) * col_width, area.max.y + 4.0),
            Align2::CENTER_TOP,
            name,
            FontId::proportional(10.0),
            Color32::GRAY,
        );
    }

    painter.text(
        Pos2::new(area.min.x - 5.0, area.min.y),
        Align2::RIGHT_TOP,
        "0",
        FontId::proportional(10.0),
        Color32::GRAY,
    );
    painter.text(
        Pos2::new(area.min.x - 5.0, area.max.y),
        Align2::RIGHT_BOTTOM,
        mask.total_rows.saturating_sub(1).to_string(),
        FontId::proportional(10.0),
        Color32::GRAY,
    );

    if response.hovered() && mask.rows_per_band > 1 {
        response.on_hover_text(format!("Each band covers {} rows", mask.rows_per_band));
    }
}
