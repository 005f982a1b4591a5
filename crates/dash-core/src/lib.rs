//! Core functionality for the dashboard
//!
//! This crate provides the dataset handle, the session state threaded
//! through every view, menu navigation, user notices and the event bus.

pub mod dataset;
pub mod events;
pub mod navigation;
pub mod notice;
pub mod state;

// Re-export commonly used types
pub use dataset::{ColumnKind, Dataset, dtype_label};
pub use events::EventBus;
pub use navigation::ActiveView;
pub use notice::{Notice, NoticeLevel};
pub use state::{AppSettings, AppState};
