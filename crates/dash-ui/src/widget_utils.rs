//! Stable widget ids for plots, tables and scroll areas
//!
//! Views draw several plots and tables per frame (the pairwise grid draws
//! dozens), and egui needs each to have a distinct id. Ids are built from the
//! view, the chart and the columns involved so they stay stable across frames
//! while the selection is unchanged.

use egui::{Id, ScrollArea};
use std::fmt::Display;

/// Widget ID builder that joins its components with `_`
#[derive(Debug, Clone)]
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Add a grid position
    pub fn cell(self, row: usize, col: usize) -> Self {
        self.with(format!("r{}c{}", row, col))
    }

    pub fn build(&self) -> String {
        self.components.join("_")
    }

    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// Extension trait for ScrollArea to take a WidgetId
pub trait ScrollAreaExt {
    fn id_builder(self, builder: WidgetId) -> Self;
}

impl ScrollAreaExt for ScrollArea {
    fn id_builder(self, builder: WidgetId) -> Self {
        self.id_source(builder.build())
    }
}

/// Id for a chart over the given columns
pub fn plot_id(chart: &str, columns: &[&str]) -> String {
    columns.iter().fold(WidgetId::new("plot").with(chart), |id, c| id.with(c)).build()
}
