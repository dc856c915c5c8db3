//! Chart Viewer Widget
//! Central panel holding one Gantt figure and its hover overlay.

use crate::charts::{GanttFigure, GanttPlotter, HoverOverlay};
use egui::RichText;

/// Displays a Gantt figure; the overlay lives as long as the figure does.
#[derive(Default)]
pub struct ChartViewer {
    figure: Option<GanttFigure>,
    overlay: HoverOverlay,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_figure(figure: GanttFigure) -> Self {
        Self {
            figure: Some(figure),
            overlay: HoverOverlay::default(),
        }
    }

    /// Replace the figure and reset the overlay.
    pub fn set_figure(&mut self, figure: GanttFigure) {
        self.figure = Some(figure);
        self.overlay.clear();
    }

    pub fn clear(&mut self) {
        self.figure = None;
        self.overlay.clear();
    }

    pub fn figure(&self) -> Option<&GanttFigure> {
        self.figure.as_ref()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(figure) = &self.figure else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        GanttPlotter::draw_gantt_chart(ui, figure, &mut self.overlay);
    }
}
