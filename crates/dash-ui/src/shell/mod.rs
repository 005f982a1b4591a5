//! Page furniture shared by every view: headings and notice banners

use egui::{Frame, RichText, Stroke, Ui};

use dash_core::{Notice, NoticeLevel};
use crate::theme::notice_color;

fn notice_icon(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "✔",
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Error => "⚠",
    }
}

/// Show a notice as a colored banner
pub fn show_notice(ui: &mut Ui, notice: &Notice) {
    let color = notice_color(notice.level);

    Frame::none()
        .fill(color.linear_multiply(0.2))
        .stroke(Stroke::new(1.0, color))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(notice_icon(notice.level)).color(color));
                ui.label(notice.message.as_str());
            });
        });
}

/// Heading shown at the top of a view
pub fn page_heading(ui: &mut Ui, text: &str) {
    ui.heading(text);
    ui.add_space(8.0);
}

/// Smaller heading for a section within a view
pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).strong().size(16.0));
    ui.add_space(4.0);
}
