//! Control Panel Widget
//! Left side panel with data source, chart options and export.

use crate::charts::EXCLUDED_RESOURCE;
use crate::charts::gantt::DEFAULT_TIME_UNIT;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings for the chart
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub color_map_path: Option<PathBuf>,
    pub include_excluded_resource: bool,
    pub time_unit: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            color_map_path: None,
            include_excluded_resource: false,
            time_unit: DEFAULT_TIME_UNIT.to_string(),
        }
    }
}

/// Left side control panel with file selection and chart options.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

fn file_label(path: Option<&PathBuf>, empty: &str) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| empty.to_string())
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Gantt Chart")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Schedule").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let text = file_label(self.settings.csv_path.as_ref(), "No file selected");
                    let text_color = if self.settings.csv_path.is_some() {
                        ui.visuals().text_color()
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(text).size(12.0).color(text_color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Colors Section =====
        ui.label(RichText::new("🎨 Batch Colors").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let text = file_label(self.settings.color_map_path.as_ref(), "Default palette");
                    ui.label(RichText::new(text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.settings.color_map_path.is_some() && ui.button("↺ Reset").clicked()
                        {
                            action = ControlPanelAction::ResetColorMap;
                        }
                        if ui.button("📂 Load").clicked() {
                            action = ControlPanelAction::BrowseColorMap;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Options Section =====
        ui.label(RichText::new("⚙️ Options").size(14.0).strong());
        ui.add_space(5.0);

        let include_label = format!("Include {}", EXCLUDED_RESOURCE);
        if ui
            .checkbox(&mut self.settings.include_excluded_resource, include_label)
            .changed()
        {
            action = ControlPanelAction::OptionsChanged;
        }

        ui.horizontal(|ui| {
            ui.add_sized([80.0, 20.0], egui::Label::new("Time unit:"));
            let edit = egui::TextEdit::singleline(&mut self.settings.time_unit).desired_width(80.0);
            if ui.add(edit).changed() {
                action = ControlPanelAction::OptionsChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    BrowseColorMap,
    ResetColorMap,
    OptionsChanged,
    ExportPng,
}
