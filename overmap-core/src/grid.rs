use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::Error;

/// Overmap tile coordinate, as encoded in `o.<x>.<y>` file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCoord {
    /// Column, growing eastward.
    pub x: i32,
    /// Row, growing southward.
    pub y: i32,
}

impl TileCoord {
    /// Creates a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Dense grid of overmap tile files spanning the bounding rectangle of all
/// tiles found in a save.
///
/// Rows run from the smallest to the largest y, columns from the smallest to
/// the largest x. Cells without a tile file are `None`.
#[derive(Debug)]
pub struct OvermapGrid {
    min: TileCoord,
    max: TileCoord,
    width: usize,
    height: usize,
    cells: Vec<Option<PathBuf>>,
}

impl OvermapGrid {
    /// Walks `root` recursively and collects every `o.<x>.<y>` tile file.
    ///
    /// # Errors
    /// Fails if the directory cannot be traversed, holds no tile files, or
    /// the tiles span more cells than can be allocated.
    pub fn discover(root: &Path) -> Result<Self, Error> {
        Self::discover_matching(root, parse_tile_name)
    }

    /// Walks `root` recursively, sorted by file name, and collects every file
    /// whose name `parse` maps to a coordinate.
    ///
    /// # Errors
    /// Same as [`discover`](Self::discover).
    pub fn discover_matching(
        root: &Path,
        parse: impl Fn(&str) -> Option<TileCoord>,
    ) -> Result<Self, Error> {
        let mut tiles = Vec::new();
        let walker = WalkDir::new(root).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| Error::save_walk_failed(&e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if let Some(coord) = parse(name) {
                info!(path = %entry.path().display(), x = coord.x, y = coord.y, "found tile file");
                tiles.push((coord, entry.into_path()));
            }
        }

        if tiles.is_empty() {
            return Err(Error::no_tiles_found(root));
        }
        Self::from_tiles(tiles)
    }

    /// Builds the grid from tile files keyed by coordinate. A coordinate seen
    /// twice keeps the later path.
    ///
    /// # Errors
    /// Fails when there are no tiles or the bounding rectangle is too large
    /// to allocate.
    pub fn from_tiles(tiles: impl IntoIterator<Item = (TileCoord, PathBuf)>) -> Result<Self, Error> {
        let mut by_coord = BTreeMap::new();
        for (coord, path) in tiles {
            if let Some(previous) = by_coord.insert(coord, path) {
                debug!(x = coord.x, y = coord.y, previous = %previous.display(), "duplicate tile replaced");
            }
        }

        let (Some(first), Some(last)) = (by_coord.keys().next(), by_coord.keys().next_back())
        else {
            return Err(Error::no_tiles());
        };
        // keys are ordered by x first, so only y needs a scan
        let min = TileCoord {
            x: first.x,
            y: by_coord.keys().map(|c| c.y).min().unwrap_or(first.y),
        };
        let max = TileCoord {
            x: last.x,
            y: by_coord.keys().map(|c| c.y).max().unwrap_or(last.y),
        };

        let width = span(min.x, max.x).ok_or_else(|| Error::extent_too_large(min, max))?;
        let height = span(min.y, max.y).ok_or_else(|| Error::extent_too_large(min, max))?;
        info!(
            min_x = min.x,
            max_x = max.x,
            min_y = min.y,
            max_y = max.y,
            width,
            height,
            tiles = by_coord.len(),
            "assembled overmap grid"
        );

        let len = width
            .checked_mul(height)
            .ok_or_else(|| Error::extent_too_large(min, max))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::extent_too_large(min, max))?;
        cells.resize(len, None);

        for (coord, path) in by_coord {
            let column = (i64::from(coord.x) - i64::from(min.x)) as usize;
            let row = (i64::from(coord.y) - i64::from(min.y)) as usize;
            cells[row * width + column] = Some(path);
        }

        Ok(Self { min, max, width, height, cells })
    }

    /// Number of tile columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of tile rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Coordinate of the top-left cell.
    pub fn min(&self) -> TileCoord {
        self.min
    }

    /// Coordinate of the bottom-right cell.
    pub fn max(&self) -> TileCoord {
        self.max
    }

    /// Tile file at the given column and row, if present.
    pub fn get(&self, column: usize, row: usize) -> Option<&Path> {
        if column >= self.width {
            return None;
        }
        self.cells
            .get(row * self.width + column)
            .and_then(|cell| cell.as_deref())
    }

    /// Rows of cells from top (smallest y) to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Option<PathBuf>> {
        self.cells.chunks(self.width)
    }
}

/// Number of cells from `min` to `max` inclusive.
fn span(min: i32, max: i32) -> Option<usize> {
    usize::try_from(i64::from(max) - i64::from(min) + 1).ok()
}

/// Parses an overmap tile file name of the form `o.<x>.<y>`.
///
/// Names not starting with `o.` are ignored silently. Names with the wrong
/// number of parts are logged as malformed; non-numeric coordinates are
/// skipped with a debug message.
pub fn parse_tile_name(name: &str) -> Option<TileCoord> {
    if !name.starts_with("o.") {
        return None;
    }

    let parts: Vec<&str> = name.split('.').collect();
    let [_, x, y] = parts.as_slice() else {
        warn!(name, "malformed overmap file name");
        return None;
    };

    match (x.parse(), y.parse()) {
        (Ok(x), Ok(y)) => Some(TileCoord { x, y }),
        _ => {
            debug!(name, "skipping overmap file with non-numeric coordinates");
            None
        },
    }
}
