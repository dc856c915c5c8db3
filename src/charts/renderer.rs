//! Static Chart Renderer
//! Draws a Gantt figure into a PNG image with plotters.
//!
//! Layout matches the interactive chart: lanes bottom-to-top, bars filled
//! with their batch color and outlined in black, resource names on the
//! y-axis and a transparent legend in the upper right.

use crate::charts::gantt::{GanttBar, GanttFigure, BAR_HEIGHT, Y_AXIS_LABEL};
use crate::data::Rgb;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Chart buffer has unexpected size")]
    Buffer,
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write PNG: {0}")]
    Io(#[from] std::io::Error),
}

/// Default export size, matching the interactive window.
pub const EXPORT_WIDTH: u32 = 1000;
pub const EXPORT_HEIGHT: u32 = 500;

fn rgb_color(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render into a raw RGB8 buffer of `width * height * 3` bytes.
    pub fn render_to_rgb(
        figure: &GanttFigure,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (x_min, x_max) = figure.time_range();
            let lanes = figure.lane_count().max(1);
            let y_range = -0.5f64..(lanes as f64 - 0.5);
            let tick_labels = figure.tick_labels();

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .set_label_area_size(LabelAreaPosition::Left, 90)
                .set_label_area_size(LabelAreaPosition::Bottom, 45)
                .build_cartesian_2d(x_min..x_max, y_range)
                .map_err(draw_err)?;

            let y_formatter = |v: &f64| {
                let lane = v.round();
                if lane < 0.0 || (v - lane).abs() > 1e-6 {
                    return String::new();
                }
                tick_labels.get(lane as usize).cloned().unwrap_or_default()
            };

            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(lanes * 2 + 1)
                .y_label_formatter(&y_formatter)
                .x_desc(figure.x_label())
                .y_desc(Y_AXIS_LABEL)
                .draw()
                .map_err(draw_err)?;

            let half = BAR_HEIGHT / 2.0;
            for run in figure.bar_runs() {
                let color = rgb_color(run.color);
                let rect = |bar: &GanttBar| {
                    let lane = bar.lane as f64;
                    [(bar.start, lane - half), (bar.end(), lane + half)]
                };

                let fills = chart
                    .draw_series(
                        run.bars
                            .iter()
                            .map(|bar| Rectangle::new(rect(bar), color.filled())),
                    )
                    .map_err(draw_err)?;
                if run.in_legend {
                    fills.label(run.label.clone()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled())
                    });
                }

                chart
                    .draw_series(
                        run.bars
                            .iter()
                            .map(|bar| Rectangle::new(rect(bar), BLACK.stroke_width(1))),
                    )
                    .map_err(draw_err)?;
            }

            if !figure.legend.is_empty() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(&WHITE.mix(0.0))
                    .border_style(&BLACK.mix(0.0))
                    .draw()
                    .map_err(draw_err)?;
            }

            root.present().map_err(draw_err)?;
        }
        Ok(buffer)
    }

    /// Render and encode as PNG bytes in memory.
    pub fn render_to_png_bytes(
        figure: &GanttFigure,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let buffer = Self::render_to_rgb(figure, width, height)?;
        let image = RgbImage::from_raw(width, height, buffer).ok_or(ExportError::Buffer)?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    pub fn save_png(
        figure: &GanttFigure,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        let png = Self::render_to_png_bytes(figure, width, height)?;
        std::fs::write(path, png)?;
        log::info!("Saved gantt chart to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::gantt::GanttOptions;
    use crate::data::TaskRow;

    #[test]
    fn converts_palette_colors() {
        assert_eq!(rgb_color(Rgb(0x00, 0xA0, 0xBE)), RGBColor(0x00, 0xA0, 0xBE));
    }

    fn two_task_figure() -> GanttFigure {
        let rows = vec![
            TaskRow::new("A", 0.0, 5.0)
                .with_batch(1)
                .with_resource(0, "R1"),
            TaskRow::new("B", 5.0, 3.0)
                .with_batch(2)
                .with_resource(0, "R1")
                .with_resource(1, "R2"),
        ];
        GanttFigure::build(&rows, &GanttOptions::default()).unwrap()
    }

    #[test]
    fn renders_png_at_export_size() {
        let png = StaticChartRenderer::render_to_png_bytes(
            &two_task_figure(),
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        )
        .unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), EXPORT_WIDTH);
        assert_eq!(decoded.height(), EXPORT_HEIGHT);
    }

    #[test]
    fn renders_empty_figure() {
        let figure = GanttFigure::build(&[], &GanttOptions::default()).unwrap();
        let png =
            StaticChartRenderer::render_to_png_bytes(&figure, EXPORT_WIDTH, EXPORT_HEIGHT).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (EXPORT_WIDTH, EXPORT_HEIGHT));
    }

    #[test]
    fn bars_are_painted_in_batch_color() {
        let figure = two_task_figure();
        let (width, height) = (EXPORT_WIDTH, EXPORT_HEIGHT);
        let rgb = StaticChartRenderer::render_to_rgb(&figure, width, height).unwrap();
        assert_eq!(rgb.len(), (width * height * 3) as usize);

        // Batch 1 green (#AAB400) and batch 2 green (#5F7800) both show up
        let has_pixel = |c: Rgb| rgb.chunks_exact(3).any(|p| p == [c.0, c.1, c.2]);
        assert!(has_pixel(Rgb(0xAA, 0xB4, 0x00)));
        assert!(has_pixel(Rgb(0x5F, 0x78, 0x00)));
    }

    #[test]
    fn saves_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantt.png");

        StaticChartRenderer::save_png(&two_task_figure(), &path, EXPORT_WIDTH, EXPORT_HEIGHT)
            .unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), EXPORT_WIDTH);
        assert_eq!(decoded.height(), EXPORT_HEIGHT);
    }

    #[test]
    fn draw_errors_keep_their_message() {
        let err = draw_err("backend gone");
        assert_eq!(err.to_string(), "Failed to draw chart: backend gone");
    }
}
