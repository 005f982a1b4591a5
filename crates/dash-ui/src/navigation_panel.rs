//! Sidebar with the view selector and the loaded dataset's status

use egui::{RichText, Ui};

use dash_core::{ActiveView, AppState};
use crate::theme::{accent_color, warning_color};

/// Navigation panel configuration
#[derive(Debug, Clone)]
pub struct NavigationPanelConfig {
    pub title: String,
    pub width: f32,
    pub show_dataset_status: bool,
}

impl Default for NavigationPanelConfig {
    fn default() -> Self {
        Self {
            title: "Navigation".to_string(),
            width: 220.0,
            show_dataset_status: true,
        }
    }
}

/// Sidebar widget listing every view
#[derive(Default)]
pub struct NavigationPanel {
    config: NavigationPanelConfig,
}

impl NavigationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &NavigationPanelConfig {
        &self.config
    }

    /// Draw the selector and return the view the user clicked, if it changed
    pub fn ui(&self, ui: &mut Ui, state: &AppState) -> Option<ActiveView> {
        ui.heading(&self.config.title);
        ui.add_space(4.0);

        let mut selected = state.active_view;
        for view in ActiveView::ALL {
            ui.radio_value(&mut selected, view, view.label());
        }

        if self.config.show_dataset_status {
            ui.add_space(8.0);
            ui.separator();
            dataset_status(ui, state);
        }

        (selected != state.active_view).then_some(selected)
    }
}

/// Name and shape of the loaded dataset, or a hint when nothing is loaded
pub fn dataset_status(ui: &mut Ui, state: &AppState) {
    match state.dataset() {
        Some(dataset) => {
            ui.label(RichText::new(dataset.name()).color(accent_color()).strong());
            let (rows, cols) = dataset.shape();
            ui.label(status_line(rows, cols));
        }
        None => {
            ui.label(RichText::new("No dataset loaded").color(warning_color()));
        }
    }
}

pub fn status_line(rows: usize, cols: usize) -> String {
    format!("Rows: {} | Columns: {}", rows, cols)
}
