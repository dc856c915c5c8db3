//! Charts module - Gantt layout and rendering

pub mod gantt;
mod plotter;
mod renderer;

pub use gantt::{
    BarRun, GanttBar, GanttError, GanttFigure, GanttOptions, HoverText, LegendEntry, EXCLUDED_RESOURCE,
};
pub use plotter::{GanttPlotter, HoverOverlay};
pub use renderer::{ExportError, StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
