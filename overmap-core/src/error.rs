use std::path::Path;

use crate::{grid::TileCoord, layer::LayerError, seen::SeenError};

/// Error categories for save assembly and rendering.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Save directory traversal, tile discovery or extent errors.
    #[error("Save error: {0}")]
    Save(String),

    /// Tile file reading or output writing errors.
    #[error("I/O error: {0}")]
    Io(String),

    /// Terrain layer scanning or decoding errors.
    #[error("Layer error: {0}")]
    Layer(String),
}

impl Error {
    // Save errors
    pub(crate) fn save_walk_failed(err: &walkdir::Error) -> Self {
        Self::Save(format!("Failed to walk save directory: {err}"))
    }

    pub(crate) fn no_tiles_found(root: &Path) -> Self {
        Self::Save(format!("No overmap tiles found in {}", root.display()))
    }

    pub(crate) fn no_tiles() -> Self {
        Self::Save("No overmap tiles given".into())
    }

    pub(crate) fn seen_config_invalid(reason: &str) -> Self {
        Self::Save(format!("Invalid seen map settings: {reason}"))
    }

    pub(crate) fn image_too_large(columns: usize, rows: usize) -> Self {
        Self::Save(format!("Seen map of {columns}x{rows} overmaps is too large for an image"))
    }

    pub(crate) fn image_alloc_failed(width: u32, height: u32) -> Self {
        Self::Save(format!("Failed to allocate a {width}x{height} image"))
    }

    pub(crate) fn extent_too_large(min: TileCoord, max: TileCoord) -> Self {
        Self::Save(format!(
            "Save extent too large: tiles span ({}, {}) to ({}, {})",
            min.x, min.y, max.x, max.y
        ))
    }

    // I/O errors
    pub(crate) fn tile_read_failed(path: &Path, err: &std::io::Error) -> Self {
        Self::Io(format!("Failed to read tile {}: {err}", path.display()))
    }

    pub(crate) fn output_failed(err: &std::io::Error) -> Self {
        Self::Io(format!("Failed to write rendered map: {err}"))
    }

    // Layer errors
    pub(crate) fn layer_failed(path: &Path, err: &LayerError) -> Self {
        Self::Layer(format!("{}: {err}", path.display()))
    }

    pub(crate) fn seen_failed(path: &Path, err: &SeenError) -> Self {
        Self::Layer(format!("{}: {err}", path.display()))
    }
}
