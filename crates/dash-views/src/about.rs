use egui::{RichText, Ui};

const STACK: [&str; 3] = [
    "Arrow and csv for loading and column storage",
    "egui_plot and the egui painter for charts",
    "egui and eframe for the user interface",
];

const FEATURES: [&str; 5] = [
    "Upload and explore datasets",
    "View summary statistics",
    "Create interactive visualizations",
    "Handle missing data",
    "Download reports",
];

pub fn ui(ui: &mut Ui) {
    ui.label(RichText::new("Data Analysis and Visualization Dashboard").strong().size(16.0));
    ui.add_space(8.0);

    ui.label("This interactive dashboard is built using:");
    for item in STACK {
        ui.label(format!("  • {}", item));
    }
    ui.add_space(8.0);

    ui.label("Features:");
    for item in FEATURES {
        ui.label(format!("  • {}", item));
    }
    ui.add_space(8.0);

    ui.label(RichText::new("A small project demonstrating data analytics workflows.").weak());
}
