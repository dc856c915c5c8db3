//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod window;

pub use app::GanttApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use window::{native_options, render, RenderError, WINDOW_TITLE};
