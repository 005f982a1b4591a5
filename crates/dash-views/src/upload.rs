//! Upload view: parse a CSV file into the session slot and preview it

use std::path::Path;
use egui::{RichText, Ui};
use tracing::{debug, error};

use dash_core::{AppState, Notice};
use dash_data::{read_csv, read_csv_file, source_name, DataError, LoadOptions};
use dash_ui::navigation_panel::status_line;
use dash_ui::{section_heading, show_notice, WidgetId};

use crate::tables::{show_table, TextTable};
use crate::ViewRequest;

pub const UPLOAD_SUCCESS: &str = "File uploaded successfully!";

fn finish_load(state: &mut AppState, name: &str, result: Result<dash_core::Dataset, DataError>) -> Notice {
    match result {
        Ok(dataset) => {
            state.load_dataset(dataset);
            Notice::success(UPLOAD_SUCCESS)
        }
        Err(e) => {
            error!("Failed to read {}: {}", name, e);
            state.report_load_failure(name, &e.to_string());
            Notice::error(format!("Error reading file: {}", e))
        }
    }
}

/// Parse uploaded bytes and store the result.
///
/// On failure the stored dataset is left as it was.
pub fn handle_upload(state: &mut AppState, name: &str, bytes: &[u8], options: &LoadOptions) -> Notice {
    let result = read_csv(name, bytes, options);
    finish_load(state, name, result)
}

/// Read a file chosen in the open dialog and store the result
pub fn handle_upload_path(state: &mut AppState, path: &Path, options: &LoadOptions) -> Notice {
    let name = source_name(path);
    let result = read_csv_file(path, options);
    finish_load(state, &name, result)
}

#[derive(Default)]
pub struct UploadView {
    pub options: LoadOptions,
    notice: Option<Notice>,
}

impl UploadView {
    pub fn upload_bytes(&mut self, state: &mut AppState, name: &str, bytes: &[u8]) {
        self.notice = Some(handle_upload(state, name, bytes, &self.options));
    }

    pub fn upload_path(&mut self, state: &mut AppState, path: &Path) {
        self.notice = Some(handle_upload_path(state, path, &self.options));
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn ui(&mut self, ui: &mut Ui, state: &AppState) -> Option<ViewRequest> {
        let mut request = None;

        ui.horizontal(|ui| {
            if ui.button("Choose a CSV file").clicked() {
                request = Some(ViewRequest::OpenFileDialog);
            }
            ui.label(RichText::new("or drop a .csv file onto the window").weak());
        });
        ui.add_space(8.0);

        if let Some(notice) = &self.notice {
            show_notice(ui, notice);
            if notice.is_error() {
                return request;
            }
        }

        if let Some(dataset) = state.dataset() {
            let preview = dataset.head(state.settings.preview_rows);
            debug!("Previewing {} rows of {}", preview.num_rows(), dataset.name());

            section_heading(ui, "Dataset Preview");
            show_table(ui, WidgetId::new("upload").with("preview"), &TextTable::from_batch(&preview));

            ui.add_space(6.0);
            let (rows, cols) = dataset.shape();
            ui.label(RichText::new(status_line(rows, cols)).strong());

            ui.add_space(6.0);
            show_table(
                ui,
                WidgetId::new("upload").with("dtypes"),
                &TextTable::from_pairs("dtype", &dataset.dtypes()),
            );
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use dash_core::events::{events, handler_from_fn};
    use dash_core::NoticeLevel;
    use parking_lot::Mutex;

    #[test]
    fn test_successful_upload_replaces_dataset() {
        let mut state = AppState::new();
        let notice = handle_upload(&mut state, "a.csv", b"x,y\n1,2\n3,4\n", &LoadOptions::default());
        assert_eq!(notice, Notice::success("File uploaded successfully!"));
        assert_eq!(state.dataset().map(|d| d.shape()), Some((2, 2)));

        handle_upload(&mut state, "b.csv", b"z\n1\n", &LoadOptions::default());
        assert_eq!(state.dataset().map(|d| d.name().to_string()), Some("b.csv".to_string()));
    }

    #[test]
    fn test_failed_upload_keeps_previous_dataset() {
        let mut state = AppState::new();
        handle_upload(&mut state, "good.csv", b"x\n1\n", &LoadOptions::default());

        let notice = handle_upload(&mut state, "bad.csv", b"x\n1,2\n", &LoadOptions::default());

        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Error reading file: "));
        assert_eq!(state.dataset().map(|d| d.name().to_string()), Some("good.csv".to_string()));
    }

    #[test]
    fn test_empty_file_reports_no_columns() {
        let mut state = AppState::new();
        let notice = handle_upload(&mut state, "empty.csv", b"", &LoadOptions::default());
        assert_eq!(notice.message, "Error reading file: No columns to parse from file");
        assert!(!state.has_dataset());
    }

    #[test]
    fn test_missing_path_is_an_error_notice() {
        let mut state = AppState::new();
        let mut view = UploadView::default();
        view.upload_path(&mut state, Path::new("/definitely/not/here.csv"));
        assert!(view.notice().map(|n| n.is_error()).unwrap_or(false));
        assert!(!state.has_dataset());
    }

    #[test]
    fn test_path_failure_names_file_only() {
        let mut state = AppState::new();
        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = failures.clone();
        state.event_bus.subscribe::<events::DatasetLoadFailed>(handler_from_fn(move |event| {
            if let Some(failed) = event.as_any().downcast_ref::<events::DatasetLoadFailed>() {
                sink.lock().push(failed.source_name.clone());
            }
        }));

        handle_upload_path(&mut state, Path::new("/definitely/not/here.csv"), &LoadOptions::default());

        assert_eq!(*failures.lock(), vec!["here.csv".to_string()]);
    }
}
