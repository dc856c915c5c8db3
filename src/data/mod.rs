//! Data module - schedule rows, batch palettes and CSV loading

mod loader;
mod palette;
pub mod task;

pub use loader::{DataLoader, LoaderError};
pub use palette::{parse_hex_color, ColorMap, ColorMapError, Rgb, DEFAULT_BATCH_COLORS};
pub use task::{BatchKey, TaskRow};
