//! Standalone Chart Window
//! Blocking entry point: lay out the rows, show them in a native window and
//! hand the figure back once the window is closed.

use crate::charts::{GanttError, GanttFigure, GanttOptions};
use crate::data::TaskRow;
use crate::gui::ChartViewer;
use thiserror::Error;

pub const WINDOW_TITLE: &str = "Gantt Chart";
pub const WINDOW_POSITION: [f32; 2] = [600.0, 100.0];
pub const WINDOW_SIZE: [f32; 2] = [1000.0, 500.0];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Build(#[from] GanttError),
    #[error("Failed to open chart window: {0}")]
    Window(#[from] eframe::Error),
}

/// Single-figure window.
struct ChartWindow {
    viewer: ChartViewer,
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui);
        });
    }
}

pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_position(WINDOW_POSITION)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    }
}

/// Render `rows` as an interactive Gantt chart.
///
/// Blocks until the window is closed, then returns the figure so it can be
/// exported with [`crate::charts::StaticChartRenderer`].
pub fn render(rows: &[TaskRow], options: &GanttOptions) -> Result<GanttFigure, RenderError> {
    let figure = GanttFigure::build(rows, options)?;
    let window_figure = figure.clone();

    log::info!("Opening gantt chart with {} bars", figure.bars.len());
    eframe::run_native(
        WINDOW_TITLE,
        native_options(),
        Box::new(move |_cc| {
            Ok(Box::new(ChartWindow {
                viewer: ChartViewer::with_figure(window_figure),
            }))
        }),
    )?;

    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_has_fixed_title_and_position() {
        let options = native_options();
        assert_eq!(options.viewport.title.as_deref(), Some(WINDOW_TITLE));
        assert_eq!(WINDOW_TITLE, "Gantt Chart");
        assert_eq!(
            options.viewport.position,
            Some(egui::pos2(600.0, 100.0))
        );
        assert_eq!(
            options.viewport.inner_size,
            Some(egui::vec2(1000.0, 500.0))
        );
    }
}
