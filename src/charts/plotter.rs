//! Gantt Plotter Module
//! Draws an interactive Gantt chart using egui_plot.

use crate::charts::gantt::{GanttBar, GanttFigure, HoverText, BAR_HEIGHT, Y_AXIS_LABEL};
use crate::data::Rgb;
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotMemory};

pub const EDGE_COLOR: Color32 = Color32::BLACK;
pub const PLOT_ID: &str = "gantt_chart";

pub fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

/// Pointer-driven overlay state, owned by whoever shows the chart.
#[derive(Debug, Clone, Default)]
pub struct HoverOverlay {
    pub text: HoverText,
}

impl HoverOverlay {
    /// Update from a pointer position in plot coordinates, ignoring bars of
    /// `hidden` legend labels. Returns whether the text changed.
    pub fn update(
        &mut self,
        figure: &GanttFigure,
        pointer: Option<(f64, f64)>,
        hidden: &[String],
    ) -> bool {
        let next = match pointer {
            Some((x, y)) => figure.visible_hover_text(x, y, hidden),
            None => HoverText::default(),
        };
        if next == self.text {
            return false;
        }
        self.text = next;
        true
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Creates Gantt charts using egui_plot.
pub struct GanttPlotter;

impl GanttPlotter {
    /// Draw the overlay line and the chart below it.
    pub fn draw_gantt_chart(ui: &mut egui::Ui, figure: &GanttFigure, overlay: &mut HoverOverlay) {
        // Overlay: batch and task on the left, timing on the right
        ui.horizontal(|ui| {
            ui.label(RichText::new(&overlay.text.left).size(13.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&overlay.text.right).size(13.0));
            });
        });

        let lane_count = figure.lane_count();
        let tick_labels = figure.tick_labels();
        let (x_min, x_max) = figure.time_range();

        let plot_id = egui::Id::new(PLOT_ID);
        let response = Plot::new(PLOT_ID)
            .id(plot_id)
            .legend(Legend::default().background_alpha(0.0))
            .x_axis_label(figure.x_label())
            .y_axis_label(Y_AXIS_LABEL)
            .show_x(false)
            .show_y(false)
            .allow_scroll(false)
            .include_x(x_min)
            .include_x(x_max)
            .include_y(-0.5)
            .include_y(lane_count as f64 - 0.5)
            // One tick per resource lane
            .y_grid_spacer(move |_input| {
                (0..lane_count)
                    .map(|lane| GridMark {
                        value: lane as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let lane = mark.value.round();
                if lane < 0.0 || (mark.value - lane).abs() > f64::EPSILON {
                    return String::new();
                }
                tick_labels.get(lane as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                // Runs keep paint order. Every run carries its label, the
                // legend merges equal names and hides them together.
                for run in figure.bar_runs() {
                    let color = to_color32(run.color);
                    let bars: Vec<Bar> = run.bars.iter().map(|bar| lane_bar(bar, color)).collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .horizontal()
                            .color(color)
                            .name(&run.label),
                    );
                }

                plot_ui.pointer_coordinate()
            });

        let pointer = response.inner.map(|p| (p.x, p.y));
        let hidden = hidden_labels(ui.ctx(), plot_id);
        let changed = overlay.update(figure, pointer, &hidden);
        let moving = response.response.hovered() && ui.input(|i| i.pointer.is_moving());
        if changed || moving {
            ui.ctx().request_repaint();
        }
    }
}

/// Horizontal bar on the task's lane. Left unnamed so egui_plot adds no
/// tooltip of its own next to the overlay.
fn lane_bar(bar: &GanttBar, color: Color32) -> Bar {
    Bar::new(bar.lane as f64, bar.duration)
        .base_offset(bar.start)
        .width(BAR_HEIGHT)
        .fill(color)
        .stroke(Stroke::new(1.0, EDGE_COLOR))
}

/// Legend labels the user switched off.
fn hidden_labels(ctx: &egui::Context, plot_id: egui::Id) -> Vec<String> {
    PlotMemory::load(ctx, plot_id)
        .map(|mem| mem.hidden_items.iter().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::gantt::GanttOptions;
    use crate::data::TaskRow;

    fn figure() -> GanttFigure {
        let rows = vec![TaskRow::new("Heat", 2.0, 3.0)
            .with_batch(5)
            .with_resource(0, "Oven")];
        GanttFigure::build(&rows, &GanttOptions::default()).unwrap()
    }

    #[test]
    fn overlay_follows_pointer() {
        let figure = figure();
        let mut overlay = HoverOverlay::default();

        assert!(overlay.update(&figure, Some((3.0, 0.0)), &[]));
        assert_eq!(overlay.text.left, "Batch 5 | Heat");
        assert_eq!(overlay.text.right, "Start: 2 | End: 5 | Duration: 3 min");

        // Same bar again is not a change
        assert!(!overlay.update(&figure, Some((4.0, 0.2)), &[]));

        assert!(overlay.update(&figure, Some((9.0, 0.0)), &[]));
        assert!(overlay.text.is_empty());

        overlay.update(&figure, Some((3.0, 0.0)), &[]);
        assert!(overlay.update(&figure, None, &[]));
        assert!(overlay.text.is_empty());

        // A batch switched off in the legend is not reported
        let hidden = vec!["Batch 5".to_string()];
        assert!(!overlay.update(&figure, Some((3.0, 0.0)), &hidden));
        assert!(overlay.text.is_empty());
    }

    #[test]
    fn lane_bars_carry_geometry_but_no_name() {
        let figure = figure();
        let bar = lane_bar(&figure.bars[0], Color32::RED);

        assert!(bar.name.is_empty());
        assert_eq!(bar.argument, 0.0);
        assert_eq!(bar.value, 3.0);
        assert_eq!(bar.base_offset, Some(2.0));
        assert_eq!(bar.fill, Color32::RED);
        assert_eq!(bar.stroke, Stroke::new(1.0, EDGE_COLOR));
    }

    fn batch_rows() -> Vec<TaskRow> {
        vec![
            TaskRow::new("A", 0.0, 2.0)
                .with_batch(1)
                .with_resource(0, "R1"),
            TaskRow::new("B", 2.0, 2.0)
                .with_batch(2)
                .with_resource(0, "R2"),
            TaskRow::new("C", 4.0, 2.0)
                .with_batch(1)
                .with_resource(0, "R3"),
        ]
    }

    fn count_filled(shape: &egui::Shape, fill: Color32) -> usize {
        match shape {
            egui::Shape::Rect(rect) if rect.fill == fill => 1,
            egui::Shape::Vec(shapes) => shapes.iter().map(|s| count_filled(s, fill)).sum(),
            _ => 0,
        }
    }

    /// Run one headless frame and count the bars painted in `fill`.
    fn painted_bars(ctx: &egui::Context, figure: &GanttFigure, fill: Color32) -> usize {
        let mut overlay = HoverOverlay::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                GanttPlotter::draw_gantt_chart(ui, figure, &mut overlay);
            });
        });
        output
            .shapes
            .iter()
            .map(|clipped| count_filled(&clipped.shape, fill))
            .sum()
    }

    #[test]
    fn legend_toggle_hides_every_run_of_a_batch() {
        let figure = GanttFigure::build(&batch_rows(), &GanttOptions::default()).unwrap();
        assert_eq!(figure.bar_runs().len(), 3);

        let batch_one = Color32::from_rgb(0xAA, 0xB4, 0x00);
        let batch_two = Color32::from_rgb(0x5F, 0x78, 0x00);
        let ctx = egui::Context::default();

        assert_eq!(painted_bars(&ctx, &figure, batch_one), 2);

        // Same state a click on the "Batch 1" legend entry leaves behind
        let plot_id = egui::Id::new(PLOT_ID);
        let mut memory = PlotMemory::load(&ctx, plot_id).unwrap();
        memory.hidden_items.insert("Batch 1".to_string());
        memory.store(&ctx, plot_id);

        assert_eq!(hidden_labels(&ctx, plot_id), vec!["Batch 1".to_string()]);
        assert_eq!(painted_bars(&ctx, &figure, batch_one), 0);
        assert_eq!(painted_bars(&ctx, &figure, batch_two), 1);
    }

    #[test]
    fn converts_palette_colors() {
        assert_eq!(
            to_color32(Rgb(0xEB, 0x82, 0x00)),
            Color32::from_rgb(0xEB, 0x82, 0x00)
        );
    }
}
