//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod orchestrator;

pub use app::HappinessBoardApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use orchestrator::UiOrchestrator;
