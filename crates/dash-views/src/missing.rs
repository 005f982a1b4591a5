//! Missing data view: null overview, null map and remediation

use egui::Ui;
use tracing::{error, info};

use dash_core::notice::NO_DATASET;
use dash_core::{AppState, Notice};
use dash_data::missing::{apply_action, columns_with_nulls, MissingAction, NullMask};
use dash_ui::{section_heading, show_notice, WidgetId};

use crate::charts::null_heatmap;
use crate::require_dataset;
use crate::tables::{show_table, TextTable};

pub const NO_MISSING_DATA: &str = "No missing data found.";

/// Run a remediation against the stored dataset.
///
/// `None` for the no-op action; otherwise the notice to show.
pub fn apply_missing_action(state: &mut AppState, action: MissingAction) -> Option<Notice> {
    let success = action.success_message()?;

    match state.modify_dataset(action.label(), |dataset| apply_action(dataset, action)) {
        Some(Ok(outcome)) => {
            info!(
                "{}: removed {} rows, filled {:?}",
                action.label(),
                outcome.rows_removed,
                outcome.columns_filled
            );
            Some(Notice::success(success))
        }
        Some(Err(e)) => {
            error!("{} failed: {}", action.label(), e);
            Some(Notice::error(e.to_string()))
        }
        None => Some(Notice::warning(NO_DATASET)),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MissingDataView {
    pub action: MissingAction,
    notice: Option<Notice>,
    generation: u64,
}

impl MissingDataView {
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Drop a notice left over from a previously loaded dataset
    fn forget_stale_notice(&mut self, state: &AppState) {
        if self.generation != state.dataset_generation() {
            self.generation = state.dataset_generation();
            self.notice = None;
        }
    }

    /// Apply the selected action and remember its notice
    pub fn apply(&mut self, state: &mut AppState) {
        self.forget_stale_notice(state);
        self.notice = apply_missing_action(state, self.action);
        self.action = MissingAction::None;
    }

    pub fn ui(&mut self, ui: &mut Ui, state: &mut AppState) {
        self.forget_stale_notice(state);

        let (nulls, mask) = match require_dataset(state, NO_DATASET) {
            Ok(dataset) => (
                columns_with_nulls(dataset),
                NullMask::from_dataset(dataset, state.settings.max_null_bands),
            ),
            Err(notice) => {
                show_notice(ui, &notice);
                return;
            }
        };

        if let Some(notice) = &self.notice {
            show_notice(ui, notice);
            ui.add_space(4.0);
        }

        section_heading(ui, "Missing Values Overview");
        show_table(ui, WidgetId::new("missing").with("counts"), &TextTable::from_pairs("nulls", &nulls));

        if nulls.is_empty() {
            show_notice(ui, &Notice::info(NO_MISSING_DATA));
            return;
        }

        ui.add_space(8.0);
        null_heatmap(ui, &mask);
        ui.add_space(8.0);

        ui.label("Select an action");
        ui.horizontal(|ui| {
            for action in MissingAction::ALL {
                ui.radio_value(&mut self.action, action, action.label());
            }
        });

        let enabled = self.action != MissingAction::None;
        if ui.add_enabled(enabled, egui::Button::new("Apply")).clicked() {
            self.apply(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_data::LoadOptions;
    use crate::upload::handle_upload;

    fn state_with(csv: &str) -> AppState {
        let mut state = AppState::new();
        handle_upload(&mut state, "m.csv", csv.as_bytes(), &LoadOptions::default());
        state
    }

    #[test]
    fn test_none_does_nothing() {
        let mut state = state_with("a\n1\n\n2\nNA\n");
        let before = state.dataset().map(|d| d.batch().clone());
        assert_eq!(apply_missing_action(&mut state, MissingAction::None), None);
        assert_eq!(state.dataset().map(|d| d.batch().clone()), before);
    }

    #[test]
    fn test_drop_rows_notice_and_effect() {
        let mut state = state_with("a,b\n1,x\n,y\n3,\n4,z\n");
        let notice = apply_missing_action(&mut state, MissingAction::DropRows);
        assert_eq!(notice, Some(Notice::success("Missing rows dropped.")));
        assert_eq!(state.dataset().map(|d| (d.num_rows(), d.null_count())), Some((2, 0)));
    }

    #[test]
    fn test_fill_mean_notice_and_effect() {
        let mut state = state_with("age,city\n25,A\n,B\n30,\n");
        let notice = apply_missing_action(&mut state, MissingAction::FillMean);
        assert_eq!(notice, Some(Notice::success("Missing values filled with column means.")));
        let ds = state.dataset().unwrap();
        assert_eq!(ds.column("age").map(|c| c.null_count()), Some(0));
        assert_eq!(ds.column("city").map(|c| c.null_count()), Some(1));
    }

    #[test]
    fn test_action_without_dataset_warns() {
        let mut state = AppState::new();
        let notice = apply_missing_action(&mut state, MissingAction::DropRows);
        assert_eq!(notice, Some(Notice::warning("Please upload a dataset first.")));
    }

    #[test]
    fn test_view_resets_action_after_apply() {
        let mut state = state_with("a\n1\nNA\n");
        let mut view = MissingDataView { action: MissingAction::DropRows, ..Default::default() };
        view.apply(&mut state);
        assert_eq!(view.action, MissingAction::None);
        assert_eq!(view.notice().map(|n| n.message.as_str()), Some("Missing rows dropped."));
        assert_eq!(state.dataset().map(|d| d.num_rows()), Some(1));
    }

    #[test]
    fn test_notice_cleared_by_new_upload() {
        let mut state = state_with("a\n1\nNA\n");
        let mut view = MissingDataView { action: MissingAction::DropRows, ..Default::default() };
        view.apply(&mut state);

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| view.ui(ui, &mut state));
        });
        assert!(view.notice().is_some());

        handle_upload(&mut state, "other.csv", b"b\n1\n\n", &LoadOptions::default());
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| view.ui(ui, &mut state));
        });
        assert_eq!(view.notice(), None);
    }
}
