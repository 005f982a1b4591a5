//! User interface components for the dashboard
//!
//! Theme, sidebar navigation, notice banners and widget id helpers shared by
//! the views.

pub mod navigation_panel;
pub mod shell;
pub mod theme;
pub mod widget_utils;

pub use navigation_panel::{NavigationPanel, NavigationPanelConfig};
pub use shell::{page_heading, section_heading, show_notice};
pub use theme::{Theme, apply_theme};
pub use widget_utils::{WidgetId, ScrollAreaExt, plot_id};

// Panel IDs
pub mod panel_ids {
    pub const NAVIGATION: &str = "navigation_panel";
    pub const CENTRAL: &str = "central_panel";
}
