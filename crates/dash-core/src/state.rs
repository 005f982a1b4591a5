use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::events::{EventBus, events};
use crate::navigation::ActiveView;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Whether to use the dark theme
    pub dark_mode: bool,

    /// Rows shown in the upload preview
    pub preview_rows: usize,

    /// Maximum numeric columns drawn in the pairwise grid
    pub max_pair_columns: usize,

    /// Maximum row bands drawn in the null-location heatmap
    pub max_null_bands: usize,

    /// File name offered by the report download
    pub report_file_name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            preview_rows: 5,
            max_pair_columns: 6,
            max_null_bands: 200,
            report_file_name: "summary_report.csv".to_string(),
        }
    }
}

/// Session state handed to every view on every frame
pub struct AppState {
    /// The currently selected view
    pub active_view: ActiveView,

    /// Application settings
    pub settings: AppSettings,

    /// The event bus
    pub event_bus: Arc<EventBus>,

    /// The one dataset slot
    dataset: Option<Dataset>,

    /// Bumped on every successful load
    generation: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            active_view: ActiveView::default(),
            settings,
            event_bus: Arc::new(EventBus::new()),
            dataset: None,
            generation: 0,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }

    /// Counter that changes whenever a different dataset is stored.
    ///
    /// In-place modifications keep the same generation.
    pub fn dataset_generation(&self) -> u64 {
        self.generation
    }

    /// Replace whatever was stored with a freshly parsed dataset
    pub fn load_dataset(&mut self, dataset: Dataset) {
        let (row_count, column_count) = dataset.shape();
        let source_name = dataset.name().to_string();

        if let Some(previous) = &self.dataset {
            debug!("Replacing {} with {}", previous.name(), source_name);
        }
        self.dataset = Some(dataset);
        self.generation += 1;

        self.event_bus.publish(events::DatasetLoaded {
            source_name,
            row_count,
            column_count,
        });
    }

    /// Record a failed load without touching the stored dataset
    pub fn report_load_failure(&self, source_name: &str, error: &str) {
        self.event_bus.publish(events::DatasetLoadFailed {
            source_name: source_name.to_string(),
            error: error.to_string(),
        });
    }

    /// Run an in-place modification on the stored dataset.
    ///
    /// Returns `None` when nothing is loaded. A `DatasetModified` event is
    /// published only when the closure succeeds.
    pub fn modify_dataset<T, E>(
        &mut self,
        action: &str,
        f: impl FnOnce(&mut Dataset) -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        let Some(dataset) = self.dataset.as_mut() else {
            warn!("{} requested with no dataset loaded", action);
            return None;
        };
        let rows_before = dataset.num_rows();
        let result = f(dataset);
        let rows_after = dataset.num_rows();

        if result.is_ok() {
            self.event_bus.publish(events::DatasetModified {
                action: action.to_string(),
                rows_before,
                rows_after,
            });
        }

        Some(result)
    }

    /// Switch the active view
    pub fn select_view(&mut self, view: ActiveView) {
        if self.active_view != view {
            let from = self.active_view;
            self.active_view = view;
            self.event_bus.publish(events::ViewChanged { from, to: view });
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::handler_from_fn;
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parking_lot::Mutex;

    fn dataset(rows: i64) -> Dataset {
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, true)]));
        let values: Vec<i64> = (0..rows).collect();
        let batch = RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(values))]).unwrap();
        Dataset::new("n.csv", batch)
    }

    #[test]
    fn test_starts_empty() {
        let state = AppState::new();
        assert!(!state.has_dataset());
        assert_eq!(state.active_view, ActiveView::Upload);
        assert_eq!(state.settings.report_file_name, "summary_report.csv");
    }

    #[test]
    fn test_load_replaces_and_publishes() {
        let mut state = AppState::new();
        let loads = Arc::new(Mutex::new(0usize));
        let counter = loads.clone();
        state.event_bus.subscribe::<events::DatasetLoaded>(handler_from_fn(move |_| {
            *counter.lock() += 1;
        }));

        state.load_dataset(dataset(3));
        state.load_dataset(dataset(5));

        assert_eq!(state.dataset().map(|d| d.num_rows()), Some(5));
        assert_eq!(*loads.lock(), 2);
    }

    #[test]
    fn test_generation_tracks_loads_not_modifications() {
        let mut state = AppState::new();
        assert_eq!(state.dataset_generation(), 0);

        state.load_dataset(dataset(3));
        assert_eq!(state.dataset_generation(), 1);

        let _ = state.modify_dataset("noop", |_| Ok::<_, ()>(()));
        assert_eq!(state.dataset_generation(), 1);

        state.load_dataset(dataset(3));
        assert_eq!(state.dataset_generation(), 2);
    }

    #[test]
    fn test_modify_without_dataset_is_none() {
        let mut state = AppState::new();
        let result = state.modify_dataset("noop", |_| Ok::<_, ()>(()));
        assert!(result.is_none());
    }

    #[test]
    fn test_failed_modification_publishes_nothing() {
        let mut state = AppState::new();
        state.load_dataset(dataset(2));
        let modified = Arc::new(Mutex::new(0usize));
        let counter = modified.clone();
        state.event_bus.subscribe::<events::DatasetModified>(handler_from_fn(move |_| {
            *counter.lock() += 1;
        }));

        let failed = state.modify_dataset("broken", |_| Err::<(), _>("nope"));
        assert_eq!(failed, Some(Err("nope")));
        assert_eq!(*modified.lock(), 0);

        let ok = state.modify_dataset("fine", |_| Ok::<_, ()>(1));
        assert_eq!(ok, Some(Ok(1)));
        assert_eq!(*modified.lock(), 1);
    }

    #[test]
    fn test_select_view_publishes_on_change_only() {
        let mut state = AppState::new();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        state.event_bus.subscribe::<events::ViewChanged>(handler_from_fn(move |event| {
            if let Some(change) = event.as_any().downcast_ref::<events::ViewChanged>() {
                sink.lock().push(change.to);
            }
        }));

        state.select_view(ActiveView::Upload);
        state.select_view(ActiveView::Report);

        assert_eq!(*changes.lock(), vec![ActiveView::Report]);
    }
}
