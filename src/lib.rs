//! Gantt Chart - Interactive viewer for batch schedules
//!
//! Lays out task rows as horizontal bars on resource lanes, colored by batch,
//! and shows the hovered task's timing above the chart.

pub mod charts;
pub mod data;
pub mod gui;

pub use charts::{GanttFigure, GanttOptions, StaticChartRenderer};
pub use data::{BatchKey, ColorMap, DataLoader, TaskRow};
pub use gui::{render, RenderError};
