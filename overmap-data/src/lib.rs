mod serialization;
mod symbol;
mod table;
mod terrain;

pub use serialization::SerializationError;
use serialization::*;
pub use symbol::{LINE_GLYPHS, SymbolSpec, UNKNOWN_GLYPH, decode_symbol};
pub use table::{TerrainTable, TerrainTableBuilder};
pub use terrain::TerrainEntry;

/// Error returned when a persisted terrain table cannot be loaded.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TableDeserializationError {
    /// Description of what was wrong with the data.
    pub message: String,
}
