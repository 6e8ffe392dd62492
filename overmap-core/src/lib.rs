//! Turns overmap save tiles into a text or HTML map.
//!
//! [`OvermapGrid::discover`] assembles the tile files of a save into a dense
//! grid, [`read_layer`] extracts the run-length encoded terrain of one z-level
//! from a tile, [`resolve`] maps terrain identifiers to glyphs through a
//! [`TerrainTable`], and [`OvermapRenderer`] ties them together.
//!
//! [`SeenRenderer`] draws the explored area recorded in a save's seen files
//! as an RGBA image.

pub mod error;
mod grid;
pub mod html;
mod layer;
mod render;
mod resolve;
mod seen;

pub use ::overmap_data::{TerrainEntry, TerrainTable, TerrainTableBuilder};
pub use error::Error;
pub use grid::{OvermapGrid, TileCoord, parse_tile_name};
pub use layer::{LayerError, PREAMBLE_LEN, TileRun, decode_layer, read_layer};
pub use render::{OutputFormat, OvermapRenderer, RenderConfig};
pub use resolve::{ORIENTATIONS, ROAD_GLYPHS, Symbol, orientation_index, resolve};
pub use seen::{
    BACKGROUND, GRID, NOTE, Note, NoteLabel, ORIGIN, Rgba, SEEN, SeenConfig, SeenError,
    SeenImage, SeenRenderer, SeenSpan, parse_note, parse_notes, parse_seen_data,
    parse_seen_name, seen_level,
};
