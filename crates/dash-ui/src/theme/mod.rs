use egui::style::WidgetVisuals;
use egui::{Context, Visuals, Style, Color32, Rounding, Stroke, FontId, FontFamily, TextStyle};
use std::collections::BTreeMap;
use tracing::debug;

use dash_core::{AppSettings, NoticeLevel};

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Dashboard Dark".to_string(),
            dark_mode: true,
        }
    }
}

impl Theme {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            name: if settings.dark_mode { "Dashboard Dark" } else { "Dashboard Light" }.to_string(),
            dark_mode: settings.dark_mode,
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    debug!("Applying theme {}", theme.name);

    let mut style = Style::default();

    let mut visuals = if theme.dark_mode {
        dark_visuals()
    } else {
        Visuals::light()
    };

    let accent = accent_color();
    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);
    style.spacing.indent = 20.0;

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    let panel = Color32::from_gray(31);
    let text = Color32::from_gray(220);

    visuals.window_fill = panel;
    visuals.panel_fill = panel;
    visuals.extreme_bg_color = Color32::from_gray(23);
    visuals.faint_bg_color = Color32::from_gray(40);
    visuals.code_bg_color = Color32::from_gray(35);

    let widgets = &mut visuals.widgets;
    shade(&mut widgets.noninteractive, Color32::from_gray(40), Color32::from_gray(60), text);
    shade(&mut widgets.inactive, Color32::from_gray(40), Color32::from_gray(70), text);
    shade(&mut widgets.hovered, Color32::from_gray(50), Color32::from_gray(80), text);
    shade(&mut widgets.active, Color32::from_gray(60), accent_color(), text);

    visuals.window_shadow.extrusion = 8.0;
    visuals.popup_shadow.extrusion = 4.0;

    visuals
}

fn shade(widget: &mut WidgetVisuals, fill: Color32, border: Color32, text: Color32) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = Stroke::new(1.0, border);
    widget.fg_stroke = Stroke::new(1.0, text);
    widget.rounding = Rounding::same(4.0);
}

pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

pub fn warning_color() -> Color32 {
    Color32::from_rgb(230, 180, 80)
}

pub fn success_color() -> Color32 {
    Color32::from_rgb(80, 200, 120)
}

/// Banner color for a notice level
pub fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Success => success_color(),
        NoticeLevel::Info => accent_color(),
        NoticeLevel::Warning => warning_color(),
        NoticeLevel::Error => error_color(),
    }
}

/// Diverging blue-white-red scale for values in `[-1, 1]`
pub fn diverging_color(value: f64) -> Color32 {
    let t = value.clamp(-1.0, 1.0) as f32;
    let blue = (59.0, 76.0, 192.0);
    let white = (221.0, 221.0, 221.0);
    let red = (180.0, 4.0, 38.0);

    let (from, to, f) = if t < 0.0 {
        (white, blue, -t)
    } else {
        (white, red, t)
    };

    Color32::from_rgb(
        (from.0 + (to.0 - from.0) * f) as u8,
        (from.1 + (to.1 - from.1) * f) as u8,
        (from.2 + (to.2 - from.2) * f) as u8,
    )
}

/// Categorical palette
pub fn categorical_color(index: usize) -> Color32 {
    const COLORS: [Color32; 8] = [
        Color32::from_rgb(76, 114, 176),
        Color32::from_rgb(221, 132, 82),
        Color32::from_rgb(85, 168, 104),
        Color32::from_rgb(196, 78, 82),
        Color32::from_rgb(129, 114, 179),
        Color32::from_rgb(147, 120, 96),
        Color32::from_rgb(218, 139, 195),
        Color32::from_rgb(140, 140, 140),
    ];
    COLORS[index % COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_endpoints() {
        assert_eq!(diverging_color(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(diverging_color(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(diverging_color(1.0), Color32::from_rgb(180, 4, 38));
        assert_eq!(diverging_color(5.0), diverging_color(1.0));
    }

    #[test]
    fn test_theme_follows_settings() {
        let settings = AppSettings { dark_mode: false, ..AppSettings::default() };
        assert!(!Theme::from_settings(&settings).dark_mode);
        assert_eq!(categorical_color(8), categorical_color(0));
    }
}
