//! Main application entry point

use std::path::Path;
use anyhow::{Context as _, Result};
use eframe::egui::{self, Context};
use tracing::{error, info, warn};

use dash_core::events::events;
use dash_core::{ActiveView, AppState, Notice};
use dash_data::ReportArtifact;
use dash_ui::{panel_ids, NavigationPanel, Theme};
use dash_views::{DashboardViews, ViewRequest};

mod event_log;

const APP_TITLE: &str = "📊 Data Analysis and Visualization Dashboard";

/// Main application state
struct DashboardApp {
    /// Session state handed to every view
    state: AppState,

    /// Widget state for each view
    views: DashboardViews,

    /// Sidebar
    navigation: NavigationPanel,
}

impl DashboardApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();
        dash_ui::apply_theme(&cc.egui_ctx, &Theme::from_settings(&state.settings));
        event_log::install(&state.event_bus);

        Self {
            state,
            views: DashboardViews::default(),
            navigation: NavigationPanel::new(),
        }
    }

    /// Load any files dropped onto the window this frame
    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());

        // Only one dataset is kept; the last readable drop wins
        for file in dropped {
            if let Some(path) = &file.path {
                info!("Dropped file: {}", path.display());
                self.views.upload.upload_path(&mut self.state, path);
            } else if let Some(bytes) = &file.bytes {
                info!("Dropped {} ({} bytes)", file.name, bytes.len());
                self.views.upload.upload_bytes(&mut self.state, &file.name, bytes);
            } else {
                warn!("Dropped file {} has neither a path nor contents", file.name);
                continue;
            }
            self.state.select_view(ActiveView::Upload);
        }
    }

    fn handle_request(&mut self, request: ViewRequest) {
        match request {
            ViewRequest::OpenFileDialog => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV Files", &["csv"])
                    .pick_file()
                {
                    self.views.upload.upload_path(&mut self.state, &path);
                }
            }
            ViewRequest::SaveReport(artifact) => {
                let Some(path) = rfd::FileDialog::new()
                    .set_file_name(&artifact.file_name)
                    .add_filter("CSV Files", &["csv"])
                    .save_file()
                else {
                    return;
                };

                let notice = match self.save_report(&artifact, &path) {
                    Ok(()) => Notice::success(format!("Report saved to {}", path.display())),
                    Err(e) => {
                        error!("Failed to save report: {:#}", e);
                        Notice::error(format!("Failed to save report: {:#}", e))
                    }
                };
                self.views.report.set_notice(notice);
            }
        }
    }

    fn save_report(&self, artifact: &ReportArtifact, path: &Path) -> Result<()> {
        std::fs::write(path, &artifact.bytes)
            .with_context(|| format!("writing {}", path.display()))?;

        self.state.event_bus.publish(events::ReportExported {
            path: path.display().to_string(),
            bytes: artifact.bytes.len(),
        });

        Ok(())
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(APP_TITLE);
            ui.add_space(4.0);
        });

        let mut selected = None;
        egui::SidePanel::left(panel_ids::NAVIGATION)
            .default_width(self.navigation.config().width)
            .show(ctx, |ui| {
                selected = self.navigation.ui(ui, &self.state);
                ui.add_space(8.0);
                dash_views::show_sidebar_options(ui, &self.state, &mut self.views);
            });
        if let Some(view) = selected {
            self.state.select_view(view);
        }

        let mut request = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source(panel_ids::CENTRAL)
                .show(ui, |ui| {
                    request = dash_views::show_view(ui, &mut self.state, &mut self.views);
                });
        });

        if let Some(request) = request {
            self.handle_request(request);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Data Analysis and Visualization Dashboard",
        options,
        Box::new(|cc| Box::new(DashboardApp::new(cc))),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app() -> DashboardApp {
        let state = AppState::new();
        event_log::install(&state.event_bus);
        DashboardApp {
            state,
            views: DashboardViews::default(),
            navigation: NavigationPanel::new(),
        }
    }

    #[test]
    fn test_save_report_writes_file() {
        let mut app = app();
        app.views.upload.upload_bytes(&mut app.state, "s.csv", b"v\n1\n2\n");
        let artifact = dash_views::report::prepare_report(&app.state).unwrap();

        let path: PathBuf = std::env::temp_dir().join(format!("dash_report_{}.csv", std::process::id()));
        app.save_report(&artifact, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, artifact.bytes);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_report_to_missing_directory_fails() {
        let app = app();
        let artifact = ReportArtifact {
            file_name: "summary_report.csv".into(),
            mime: "text/csv",
            bytes: b",a\n".to_vec(),
        };
        let err = app.save_report(&artifact, Path::new("/no/such/dir/summary_report.csv")).unwrap_err();
        assert!(format!("{:#}", err).contains("writing /no/such/dir/summary_report.csv"));
    }

    #[test]
    fn test_dropped_bytes_are_loaded() {
        let mut app = app();
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.dropped_files.push(egui::DroppedFile {
            name: "dropped.csv".into(),
            bytes: Some(std::sync::Arc::from(&b"a,b\n1,2\n"[..])),
            ..Default::default()
        });
        app.state.select_view(ActiveView::About);

        let _ = ctx.run(input, |ctx| app.handle_dropped_files(ctx));

        assert_eq!(app.state.dataset().map(|d| d.name().to_string()), Some("dropped.csv".to_string()));
        assert_eq!(app.state.active_view, ActiveView::Upload);
    }
}
