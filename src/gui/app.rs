//! Gantt Chart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{GanttFigure, GanttOptions, StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::data::{ColorMap, DataLoader, TaskRow};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Complete(Vec<TaskRow>),
    Error(String),
}

/// Main application window.
#[derive(Default)]
pub struct GanttApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    rows: Vec<TaskRow>,
    color_map: Option<ColorMap>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl GanttApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Load the schedule on a background thread
    fn start_loading(&mut self, path: PathBuf) {
        self.rows.clear();
        self.chart_viewer.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::load_csv(&path) {
                Ok(rows) => LoadResult::Complete(rows),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(rows)) => {
                self.rows = rows;
                self.is_loading = false;
                self.rebuild_chart();
            }
            Ok(LoadResult::Error(error)) => {
                log::warn!("CSV load failed: {}", error);
                self.control_panel.settings.csv_path = None;
                self.control_panel.set_status(&format!("Error: {}", error));
                self.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel.settings.csv_path = None;
                self.control_panel.set_status("Error: loader stopped unexpectedly");
                self.is_loading = false;
            }
        }
    }

    fn options(&self) -> GanttOptions {
        let settings = &self.control_panel.settings;
        GanttOptions {
            color_map: self.color_map.clone(),
            include_excluded_resource: settings.include_excluded_resource,
            time_unit: settings.time_unit.clone(),
        }
    }

    /// Lay out the loaded rows with the current options
    fn rebuild_chart(&mut self) {
        // Nothing loaded yet, or a load is still running
        if self.is_loading || self.control_panel.settings.csv_path.is_none() {
            return;
        }

        match GanttFigure::build(&self.rows, &self.options()) {
            Ok(figure) => {
                let status = format!(
                    "{} tasks, {} bars on {} resources",
                    self.rows.len(),
                    figure.bars.len(),
                    figure.lane_count()
                );
                self.chart_viewer.set_figure(figure);
                self.control_panel.export_enabled = true;
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                self.chart_viewer.clear();
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_browse_color_map(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Color Map", &["json"])
            .pick_file()
        else {
            return;
        };

        match ColorMap::from_json_file(&path) {
            Ok(map) => {
                self.color_map = Some(map);
                self.control_panel.settings.color_map_path = Some(path);
                self.rebuild_chart();
            }
            Err(e) => {
                log::warn!("Color map rejected: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_reset_color_map(&mut self) {
        self.color_map = None;
        self.control_panel.settings.color_map_path = None;
        self.rebuild_chart();
    }

    /// Handle PNG export of the current chart
    fn handle_export_png(&mut self) {
        let Some(figure) = self.chart_viewer.figure() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("gantt_chart.png")
            .save_file()
        else {
            return;
        };

        match export_png(figure, &output_path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                log::warn!("PNG export failed: {:#}", e);
                self.control_panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }
}

fn export_png(figure: &GanttFigure, path: &Path) -> anyhow::Result<()> {
    StaticChartRenderer::save_png(figure, path, EXPORT_WIDTH, EXPORT_HEIGHT)
        .with_context(|| format!("exporting {}", path.display()))
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::BrowseColorMap => self.handle_browse_color_map(),
                        ControlPanelAction::ResetColorMap => self.handle_reset_color_map(),
                        ControlPanelAction::OptionsChanged => self.rebuild_chart(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
