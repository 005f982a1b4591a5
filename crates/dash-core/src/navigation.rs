//! Sidebar navigation between the dashboard views

use serde::{Serialize, Deserialize};

/// The six views reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    Upload,
    Summary,
    Visualization,
    MissingData,
    Report,
    About,
}

impl ActiveView {
    /// Sidebar order
    pub const ALL: [ActiveView; 6] = [
        ActiveView::Upload,
        ActiveView::Summary,
        ActiveView::Visualization,
        ActiveView::MissingData,
        ActiveView::Report,
        ActiveView::About,
    ];

    /// Label used in the navigation selector
    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Upload => "Upload Dataset",
            ActiveView::Summary => "Data Summary",
            ActiveView::Visualization => "Visualization",
            ActiveView::MissingData => "Missing Data",
            ActiveView::Report => "Download Report",
            ActiveView::About => "About",
        }
    }

    /// Page heading shown above the view content
    pub fn heading(&self) -> &'static str {
        match self {
            ActiveView::Upload => "Upload Your CSV File",
            ActiveView::Summary => "📈 Data Summary",
            ActiveView::Visualization => "📊 Data Visualization",
            ActiveView::MissingData => "Missing Data Handling",
            ActiveView::Report => "Download Descriptive Report",
            ActiveView::About => "About This Project",
        }
    }

    /// Whether the view has nothing to show without a dataset
    pub fn requires_dataset(&self) -> bool {
        !matches!(self, ActiveView::Upload | ActiveView::About)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = ActiveView::ALL.iter().map(|v| v.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), ActiveView::ALL.len());
    }

    #[test]
    fn test_dataset_requirement() {
        let needing: Vec<ActiveView> = ActiveView::ALL
            .into_iter()
            .filter(|v| v.requires_dataset())
            .collect();
        assert_eq!(needing, vec![
            ActiveView::Summary,
            ActiveView::Visualization,
            ActiveView::MissingData,
            ActiveView::Report,
        ]);
        assert_eq!(ActiveView::default(), ActiveView::Upload);
    }
}
