//! Gantt Figure Builder
//! Lays out task rows as horizontal bars on resource lanes.
//!
//! Resources are collected in first-seen order (row order, then columns
//! `Resource 1` to `Resource 3`) and stacked in reverse, so the first resource
//! seen ends up on the top lane. Bars keep draw order, which is also the
//! order used to resolve the bar under the pointer.

use crate::data::{parse_hex_color, BatchKey, ColorMap, Rgb, TaskRow};
use thiserror::Error;

/// Resource hidden from the chart unless explicitly included.
pub const EXCLUDED_RESOURCE: &str = "F&P";
pub const DEFAULT_TIME_UNIT: &str = "min";
pub const Y_AXIS_LABEL: &str = "Resource";
/// Bar thickness in lane units.
pub const BAR_HEIGHT: f64 = 0.8;

#[derive(Error, Debug)]
pub enum GanttError {
    #[error("Invalid color {color:?} for batch {batch}")]
    InvalidColor { batch: BatchKey, color: String },
}

/// Rendering options.
#[derive(Debug, Clone)]
pub struct GanttOptions {
    /// `None` (or an empty map) selects the built-in palette.
    pub color_map: Option<ColorMap>,
    pub include_excluded_resource: bool,
    /// Display label only, no conversion is applied.
    pub time_unit: String,
}

impl Default for GanttOptions {
    fn default() -> Self {
        Self {
            color_map: None,
            include_excluded_resource: false,
            time_unit: DEFAULT_TIME_UNIT.to_string(),
        }
    }
}

impl GanttOptions {
    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.color_map = Some(color_map);
        self
    }

    pub fn include_excluded_resource(mut self, include: bool) -> Self {
        self.include_excluded_resource = include;
        self
    }

    pub fn time_unit(mut self, unit: impl Into<String>) -> Self {
        self.time_unit = unit.into();
        self
    }

    /// The palette actually used for rendering.
    pub fn effective_color_map(&self) -> ColorMap {
        match &self.color_map {
            Some(map) if !map.is_empty() => map.clone(),
            _ => ColorMap::default_palette(),
        }
    }
}

/// One bar: a task occupying one resource lane.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttBar {
    pub task: String,
    pub batch: BatchKey,
    pub resource: String,
    pub lane: usize,
    pub start: f64,
    pub duration: f64,
    pub color: Rgb,
}

impl GanttBar {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn label(&self) -> String {
        batch_label(&self.batch)
    }

    /// Covers `[start, end)` horizontally and `BAR_HEIGHT` around the lane.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let center = self.lane as f64;
        x >= self.start
            && x < self.end()
            && (y - center).abs() <= BAR_HEIGHT / 2.0
    }
}

/// Deduplicated legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub batch: BatchKey,
    pub color: Rgb,
}

/// Consecutive bars sharing a label and color, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRun<'a> {
    pub label: String,
    pub color: Rgb,
    pub bars: &'a [GanttBar],
    /// First run of its label. Backends that do not merge legend entries
    /// by name only label this run.
    pub in_legend: bool,
}

pub fn batch_label(batch: &BatchKey) -> String {
    format!("Batch {}", batch)
}

/// Text shown above the chart for the hovered bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverText {
    pub left: String,
    pub right: String,
}

impl HoverText {
    pub fn for_bar(bar: &GanttBar, time_unit: &str) -> Self {
        Self {
            left: format!("{} | {}", bar.label(), bar.task),
            right: format!(
                "Start: {} | End: {} | Duration: {} {}",
                bar.start,
                bar.end(),
                bar.duration,
                time_unit
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

/// A laid-out Gantt chart, independent of the drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttFigure {
    /// Tracked resources in first-seen order.
    pub resources: Vec<String>,
    pub bars: Vec<GanttBar>,
    pub legend: Vec<LegendEntry>,
    pub time_unit: String,
}

impl GanttFigure {
    pub fn build(rows: &[TaskRow], options: &GanttOptions) -> Result<Self, GanttError> {
        let resources = collect_resources(rows, options.include_excluded_resource);
        let colors = options.effective_color_map();
        let lane_count = resources.len();

        let mut bars = Vec::new();
        let mut legend: Vec<LegendEntry> = Vec::new();
        let mut skipped = 0usize;

        for row in rows {
            let Some(batch) = row.batch.as_ref().filter(|b| colors.contains(b)) else {
                skipped += 1;
                continue;
            };
            let hex = colors.get(batch).unwrap_or_default();
            let color = parse_hex_color(hex).ok_or_else(|| GanttError::InvalidColor {
                batch: batch.clone(),
                color: hex.to_string(),
            })?;

            let mut placed: Vec<&str> = Vec::with_capacity(3);
            for resource in row.assigned_resources() {
                if placed.contains(&resource) {
                    continue;
                }
                let Some(position) = resources.iter().position(|r| r == resource) else {
                    continue;
                };
                placed.push(resource);

                bars.push(GanttBar {
                    task: row.task.clone(),
                    batch: batch.clone(),
                    resource: resource.to_string(),
                    lane: lane_count - 1 - position,
                    start: row.start,
                    duration: row.duration,
                    color,
                });

                let label = batch_label(batch);
                if !legend.iter().any(|e| e.label == label) {
                    legend.push(LegendEntry {
                        label,
                        batch: batch.clone(),
                        color,
                    });
                }
            }
        }

        if skipped > 0 {
            log::debug!("Skipped {} rows without a batch color", skipped);
        }
        log::debug!(
            "Built gantt figure: {} resources, {} bars, {} legend entries",
            resources.len(),
            bars.len(),
            legend.len()
        );

        Ok(Self {
            resources,
            bars,
            legend,
            time_unit: options.time_unit.clone(),
        })
    }

    pub fn lane_count(&self) -> usize {
        self.resources.len()
    }

    /// Lane of a tracked resource; the first-seen resource has the highest.
    pub fn lane_of(&self, resource: &str) -> Option<usize> {
        self.resources
            .iter()
            .position(|r| r == resource)
            .map(|i| self.resources.len() - 1 - i)
    }

    /// Resource name shown at `lane`.
    pub fn lane_label(&self, lane: usize) -> Option<&str> {
        let index = self.resources.len().checked_sub(lane + 1)?;
        self.resources.get(index).map(String::as_str)
    }

    /// Tick labels from the bottom lane to the top lane.
    pub fn tick_labels(&self) -> Vec<String> {
        self.resources.iter().rev().cloned().collect()
    }

    pub fn x_label(&self) -> String {
        format!("Time ({})", self.time_unit)
    }

    /// Split the bars into paint-ordered runs. Concatenating the runs gives
    /// back `bars` exactly, so every bar is painted and later rows paint over
    /// earlier ones.
    pub fn bar_runs(&self) -> Vec<BarRun<'_>> {
        let mut runs = Vec::new();
        let mut named: Vec<String> = Vec::new();
        let mut start = 0;
        while start < self.bars.len() {
            let first = &self.bars[start];
            let label = first.label();
            let mut end = start + 1;
            while end < self.bars.len()
                && self.bars[end].color == first.color
                && self.bars[end].label() == label
            {
                end += 1;
            }

            let in_legend = !named.contains(&label);
            if in_legend {
                named.push(label.clone());
            }
            runs.push(BarRun {
                label,
                color: first.color,
                bars: &self.bars[start..end],
                in_legend,
            });
            start = end;
        }
        runs
    }

    /// First bar in draw order that contains the point.
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&GanttBar> {
        self.visible_bar_at(x, y, &[])
    }

    /// Like [`Self::bar_at`], skipping bars whose legend label is hidden.
    pub fn visible_bar_at(&self, x: f64, y: f64, hidden: &[String]) -> Option<&GanttBar> {
        self.bars
            .iter()
            .filter(|bar| hidden.is_empty() || !hidden.contains(&bar.label()))
            .find(|bar| bar.contains(x, y))
    }

    /// Overlay text for a pointer position; empty when nothing is hit.
    pub fn hover_text(&self, x: f64, y: f64) -> HoverText {
        self.visible_hover_text(x, y, &[])
    }

    pub fn visible_hover_text(&self, x: f64, y: f64, hidden: &[String]) -> HoverText {
        self.visible_bar_at(x, y, hidden)
            .map(|bar| HoverText::for_bar(bar, &self.time_unit))
            .unwrap_or_default()
    }

    /// Horizontal extent of all bars, `(0, 1)` when there are none.
    pub fn time_range(&self) -> (f64, f64) {
        let min = self
            .bars
            .iter()
            .map(|b| b.start)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .bars
            .iter()
            .map(GanttBar::end)
            .fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max.is_finite() {
            (min.min(0.0), max)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Distinct resource names in first-seen order.
pub fn collect_resources(rows: &[TaskRow], include_excluded: bool) -> Vec<String> {
    let mut resources: Vec<String> = Vec::new();
    for resource in rows.iter().flat_map(TaskRow::assigned_resources) {
        if !resources.iter().any(|r| r == resource) {
            resources.push(resource.to_string());
        }
    }
    if !include_excluded {
        resources.retain(|r| r != EXCLUDED_RESOURCE);
    }
    resources
}
