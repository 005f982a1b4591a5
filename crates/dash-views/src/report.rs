//! Report view: offer the describe table as a CSV download

use egui::{RichText, Ui};
use tracing::error;

use dash_core::notice::NO_DATASET_FOR_REPORT;
use dash_core::{AppState, Notice};
use dash_data::report::build_report;
use dash_data::ReportArtifact;
use dash_ui::show_notice;

use crate::{require_dataset, ViewRequest};

/// Build the downloadable report, or the notice to show instead
pub fn prepare_report(state: &AppState) -> Result<ReportArtifact, Notice> {
    let dataset = require_dataset(state, NO_DATASET_FOR_REPORT)?;

    build_report(dataset, &state.settings.report_file_name).map_err(|e| {
        error!("Could not build report for {}: {}", dataset.name(), e);
        Notice::error(e.to_string())
    })
}

#[derive(Debug, Clone, Default)]
pub struct ReportView {
    notice: Option<Notice>,
    generation: u64,
}

impl ReportView {
    /// Outcome of the last save, shown under the button
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn ui(&mut self, ui: &mut Ui, state: &AppState) -> Option<ViewRequest> {
        if self.generation != state.dataset_generation() {
            self.generation = state.dataset_generation();
            self.notice = None;
        }

        let artifact = match prepare_report(state) {
            Ok(artifact) => artifact,
            Err(notice) => {
                show_notice(ui, &notice);
                return None;
            }
        };

        let details = format!(
            "{} ({}, {} bytes)",
            artifact.file_name,
            artifact.mime,
            artifact.bytes.len()
        );
        ui.label(RichText::new(details).weak());
        ui.add_space(4.0);

        let clicked = ui.button("Download Summary CSV").clicked();

        if let Some(notice) = &self.notice {
            ui.add_space(4.0);
            show_notice(ui, notice);
        }

        clicked.then_some(ViewRequest::SaveReport(artifact))
    }
}
