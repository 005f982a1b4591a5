//! The dashboard's views
//!
//! One module per sidebar entry. Each view reads and writes the session
//! through `&mut AppState`; work that needs the platform (file dialogs) is
//! handed back to the app as a [`ViewRequest`].

pub mod about;
pub mod charts;
pub mod missing;
pub mod report;
pub mod summary;
pub mod tables;
pub mod upload;
pub mod visualization;

use egui::Ui;

use dash_core::{ActiveView, AppState, Dataset, Notice};
use dash_data::ReportArtifact;

pub use missing::MissingDataView;
pub use report::ReportView;
pub use upload::UploadView;
pub use visualization::VisualizationView;

/// Something a view needs the app shell to do outside the frame
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRequest {
    /// Show the native open dialog for a CSV file
    OpenFileDialog,
    /// Show the native save dialog and write the report
    SaveReport(ReportArtifact),
}

/// Per-view widget state that lives across frames
#[derive(Default)]
pub struct DashboardViews {
    pub upload: UploadView,
    pub visualization: VisualizationView,
    pub missing: MissingDataView,
    pub report: ReportView,
}

/// The stored dataset, or the warning to show in its place
pub fn require_dataset<'a>(state: &'a AppState, message: &str) -> Result<&'a Dataset, Notice> {
    state.dataset().ok_or_else(|| Notice::warning(message))
}

/// Draw the active view
pub fn show_view(ui: &mut Ui, state: &mut AppState, views: &mut DashboardViews) -> Option<ViewRequest> {
    dash_ui::page_heading(ui, state.active_view.heading());

    match state.active_view {
        ActiveView::Upload => views.upload.ui(ui, state),
        ActiveView::Summary => {
            summary::ui(ui, state);
            None
        }
        ActiveView::Visualization => {
            views.visualization.ui(ui, state);
            None
        }
        ActiveView::MissingData => {
            views.missing.ui(ui, state);
            None
        }
        ActiveView::Report => views.report.ui(ui, state),
        ActiveView::About => {
            about::ui(ui);
            None
        }
    }
}

/// Sidebar controls that belong to the active view
pub fn show_sidebar_options(ui: &mut Ui, state: &AppState, views: &mut DashboardViews) {
    match state.active_view {
        ActiveView::Visualization if state.has_dataset() => views.visualization.sidebar_ui(ui),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::notice::NO_DATASET;
    use dash_data::LoadOptions;

    fn run_frame(state: &mut AppState, views: &mut DashboardViews) -> Option<ViewRequest> {
        let ctx = egui::Context::default();
        let mut request = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::SidePanel::left("test_sidebar").show(ctx, |ui| {
                show_sidebar_options(ui, state, views);
            });
            egui::CentralPanel::default().show(ctx, |ui| {
                request = show_view(ui, state, views);
            });
        });
        request
    }

    #[test]
    fn test_require_dataset() {
        let state = AppState::new();
        let notice = require_dataset(&state, NO_DATASET).unwrap_err();
        assert_eq!(notice, Notice::warning("Please upload a dataset first."));
    }

    #[test]
    fn test_every_view_renders_without_dataset() {
        let mut state = AppState::new();
        let mut views = DashboardViews::default();
        for view in ActiveView::ALL {
            state.select_view(view);
            assert_eq!(run_frame(&mut state, &mut views), None);
        }
        assert!(!state.has_dataset());
    }

    #[test]
    fn test_every_view_renders_with_dataset() {
        let mut state = AppState::new();
        let mut views = DashboardViews::default();
        let notice = upload::handle_upload(
            &mut state,
            "people.csv",
            b"name,age,score\nAnn,30,1.5\nBob,,2.5\nCy,41,\n",
            &LoadOptions::default(),
        );
        assert!(!notice.is_error());

        for view in ActiveView::ALL {
            state.select_view(view);
            run_frame(&mut state, &mut views);
        }
        assert_eq!(state.dataset().map(|d| d.shape()), Some((3, 3)));
    }
}
