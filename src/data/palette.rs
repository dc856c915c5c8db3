//! Batch Color Palette
//! Maps batch keys to bar colors. Presence of a key enables rendering of that
//! batch; absence suppresses it.

use crate::data::BatchKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorMapError {
    #[error("Failed to read color map: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid color map JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid color {color:?} for batch {batch}")]
    InvalidColor { batch: BatchKey, color: String },
}

/// Built-in palette keyed by integer batch 1..8.
pub const DEFAULT_BATCH_COLORS: [(i64, &str); 8] = [
    (1, "#AAB400"), // Light Green
    (2, "#5F7800"), // Dark Green
    (3, "#00A0BE"), // Dark Blue
    (4, "#FFB400"), // Light Orange
    (5, "#EB8200"), // Dark Orange
    (6, "#82C8DC"), // Light Blue
    (7, "#333333"), // Dark Gray
    (8, "#D9D5D2"), // Light Gray
];

/// 8-bit RGB color, independent of the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Deserialize)]
struct ColorEntry {
    batch: BatchKey,
    color: String,
}

/// Batch key to hex color mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    colors: HashMap<BatchKey, String>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_palette() -> Self {
        DEFAULT_BATCH_COLORS
            .iter()
            .map(|&(batch, color)| (BatchKey::Int(batch), color.to_string()))
            .collect()
    }

    /// Parse a JSON array of `{"batch": 1, "color": "#AAB400"}` entries.
    /// Numeric batches become integer keys, strings become label keys.
    pub fn from_json_str(json: &str) -> Result<Self, ColorMapError> {
        let entries: Vec<ColorEntry> = serde_json::from_str(json)?;
        let map: ColorMap = entries.into_iter().map(|e| (e.batch, e.color)).collect();
        map.validate()?;
        Ok(map)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ColorMapError> {
        let json = std::fs::read_to_string(path)?;
        let map = Self::from_json_str(&json)?;
        log::info!("Loaded {} batch colors from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn insert(&mut self, batch: impl Into<BatchKey>, color: impl Into<String>) {
        self.colors.insert(batch.into(), color.into());
    }

    pub fn get(&self, batch: &BatchKey) -> Option<&str> {
        self.colors.get(batch).map(String::as_str)
    }

    pub fn contains(&self, batch: &BatchKey) -> bool {
        self.colors.contains_key(batch)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn validate(&self) -> Result<(), ColorMapError> {
        for (batch, color) in &self.colors {
            if parse_hex_color(color).is_none() {
                return Err(ColorMapError::InvalidColor {
                    batch: batch.clone(),
                    color: color.clone(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(BatchKey, String)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (BatchKey, String)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}
