//! Terrain layer extraction from overmap save tiles.
//!
//! A tile file starts with a fixed-size preamble followed by a JSON document
//! whose first array holds one run-length encoded list per z-level. Only the
//! selected layer is decoded; everything before it is skipped by counting
//! array boundaries.

use std::path::Path;

use compact_str::CompactString;
use serde::Deserialize;

use crate::Error;

/// Bytes preceding the JSON document in a tile file.
pub const PREAMBLE_LEN: usize = 12;

/// `count` consecutive tiles of terrain `id`, stored as `[id, count]`.
///
/// Negative counts in the save decode as 0; counts beyond `u32::MAX` are
/// clamped to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(CompactString, i64)")]
pub struct TileRun {
    /// Raw overmap terrain identifier.
    pub id: CompactString,
    /// Number of consecutive tiles covered by the run.
    pub count: u32,
}

impl From<(CompactString, i64)> for TileRun {
    fn from((id, count): (CompactString, i64)) -> Self {
        let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        Self { id, count }
    }
}

/// Failure to locate or decode a layer in a tile file.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// The file ends inside the preamble.
    #[error("file is shorter than the {PREAMBLE_LEN}-byte preamble")]
    MissingPreamble,

    /// A string is still open at the end of the data; holds its start offset.
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    /// A closing bracket without a matching opening one.
    #[error("unbalanced ']' at offset {0}")]
    Unbalanced(usize),

    /// The data ends before the requested layer starts.
    #[error("data ends before layer {0}")]
    NotFound(usize),

    /// The layer was found but isn't a list of runs.
    #[error("layer {layer} is not a list of [id, count] pairs: {source}")]
    Decode {
        /// Requested layer index.
        layer: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the tile file at `path` and decodes `layer`.
///
/// # Errors
/// Fails if the file cannot be read or the layer cannot be located or decoded.
pub fn read_layer(path: &Path, layer: usize) -> Result<Vec<TileRun>, Error> {
    let data = std::fs::read(path).map_err(|e| Error::tile_read_failed(path, &e))?;
    decode_layer(&data, layer).map_err(|e| Error::layer_failed(path, &e))
}

/// Decodes the runs of `layer` from raw tile file contents.
///
/// Layers are selected by counting array boundaries (an opening or closing
/// bracket) that leave the nesting depth at 1. The opening bracket of the
/// layer list is the first such boundary and the end of each layer adds one
/// more, so `layer` N is positioned after boundary N + 1 and lands on the
/// element at index N of the layer list.
///
/// # Errors
/// Fails on a missing preamble, malformed structure, data ending before the
/// layer, or a layer that is not a list of `[id, count]` pairs.
pub fn decode_layer(data: &[u8], layer: usize) -> Result<Vec<TileRun>, LayerError> {
    let document = data
        .get(PREAMBLE_LEN..)
        .ok_or(LayerError::MissingPreamble)?;
    let start = find_layer(document, layer)?;

    // deserializes exactly one value; the rest of the document is never parsed
    let mut deser = serde_json::Deserializer::from_slice(&document[start..]);
    Vec::<TileRun>::deserialize(&mut deser).map_err(|source| LayerError::Decode { layer, source })
}

/// Offset of the first value after the boundary preceding `layer`.
fn find_layer(document: &[u8], layer: usize) -> Result<usize, LayerError> {
    let target = layer + 1;
    let mut depth = 0usize;
    let mut boundaries = 0usize;
    let mut string_start = None;
    let mut escaped = false;

    for (offset, &byte) in document.iter().enumerate() {
        if string_start.is_some() {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => string_start = None,
                _ => {},
            }
            continue;
        }

        match byte {
            b'"' => {
                string_start = Some(offset);
                continue;
            },
            b'[' => depth += 1,
            b']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(LayerError::Unbalanced(offset))?;
            },
            _ => continue,
        }

        if depth == 1 {
            boundaries += 1;
            if boundaries == target {
                return Ok(skip_separator(document, offset + 1));
            }
        }
    }

    match string_start {
        Some(offset) => Err(LayerError::UnterminatedString(offset)),
        None => Err(LayerError::NotFound(layer)),
    }
}

/// Skips whitespace and at most one element separator.
fn skip_separator(document: &[u8], mut offset: usize) -> usize {
    let skip_whitespace = |mut offset: usize| {
        while document.get(offset).is_some_and(u8::is_ascii_whitespace) {
            offset += 1;
        }
        offset
    };

    offset = skip_whitespace(offset);
    if document.get(offset) == Some(&b',') {
        offset = skip_whitespace(offset + 1);
    }
    offset
}
