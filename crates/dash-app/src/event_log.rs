//! Logs dataset lifecycle events published on the session bus

use tracing::{error, info};

use dash_core::events::{events, handler_from_fn, Event};
use dash_core::EventBus;

fn downcast<E: 'static>(event: &dyn Event) -> Option<&E> {
    event.as_any().downcast_ref::<E>()
}

/// Subscribe a tracing logger to every dashboard event
pub fn install(bus: &EventBus) {
    bus.subscribe::<events::DatasetLoaded>(handler_from_fn(|event| {
        if let Some(e) = downcast::<events::DatasetLoaded>(event) {
            info!("Loaded {} ({} rows x {} columns)", e.source_name, e.row_count, e.column_count);
        }
    }));

    bus.subscribe::<events::DatasetLoadFailed>(handler_from_fn(|event| {
        if let Some(e) = downcast::<events::DatasetLoadFailed>(event) {
            error!("Could not load {}: {}", e.source_name, e.error);
        }
    }));

    bus.subscribe::<events::DatasetModified>(handler_from_fn(|event| {
        if let Some(e) = downcast::<events::DatasetModified>(event) {
            info!("{}: {} -> {} rows", e.action, e.rows_before, e.rows_after);
        }
    }));

    bus.subscribe::<events::ReportExported>(handler_from_fn(|event| {
        if let Some(e) = downcast::<events::ReportExported>(event) {
            info!("Report written to {} ({} bytes)", e.path, e.bytes);
        }
    }));

    bus.subscribe::<events::ViewChanged>(handler_from_fn(|event| {
        if let Some(e) = downcast::<events::ViewChanged>(event) {
            info!("View {} -> {}", e.from.label(), e.to.label());
        }
    }));
}
