//! Explored-area maps from overmap seen files.
//!
//! Every overmap a character has visited has a `#<player>.seen.<x>.<y>` file.
//! For each z-level it holds an `L <level>` header followed by a line of
//! run-length encoded `<visited> <count>` pairs covering the overmap row by
//! row, two more lines of per-level data, and then the map notes as
//! `N <x> <y>` lines each followed by the note text.
//!
//! [`SeenRenderer`] draws the visited tiles of a whole save into an RGBA
//! [`SeenImage`], optionally with notes, an overmap grid and the origin
//! overmap outlined.

use std::str::Lines;

use tracing::{debug, warn};

use crate::{
    Error,
    grid::{OvermapGrid, TileCoord},
};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Color from a `0xRRGGBBAA` value.
    pub const fn from_hex(rgba: u32) -> Self {
        Self(rgba.to_be_bytes())
    }
}

/// Unexplored area.
pub const BACKGROUND: Rgba = Rgba::from_hex(0x0000_00ff);
/// Explored tiles.
pub const SEEN: Rgba = Rgba::from_hex(0xffff_ffff);
/// Overmap boundaries.
pub const GRID: Rgba = Rgba::from_hex(0xff00_00ff);
/// Outline of the overmap at `(0, 0)`.
pub const ORIGIN: Rgba = Rgba::from_hex(0x00ff_00ff);
/// Tiles carrying a map note.
pub const NOTE: Rgba = Rgba::from_hex(0x0000_ffff);

/// Lines between a level header and the first note of that level, counting
/// the seen data line.
const LINES_BEFORE_NOTES: usize = 3;

/// Seen map parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeenConfig {
    /// Tiles per overmap row.
    pub map_width: usize,
    /// Tile rows per overmap.
    pub map_height: usize,
    /// Z-level to draw; 10 is ground level.
    pub layer: usize,
    /// Pixels per tile along each axis.
    pub scale: usize,
    /// Outline every overmap.
    pub grid: bool,
    /// Outline the overmap at `(0, 0)`.
    pub origin: bool,
    /// Mark tiles that carry a note.
    pub notes: bool,
}

impl Default for SeenConfig {
    fn default() -> Self {
        Self {
            map_width: 180,
            map_height: 180,
            layer: 10,
            scale: 2,
            grid: true,
            origin: true,
            notes: false,
        }
    }
}

/// Failure to read the seen data of a level.
#[derive(Debug, thiserror::Error)]
pub enum SeenError {
    /// No `L <level>` header, or nothing after it.
    #[error("no seen data for level {0}")]
    LevelNotFound(usize),

    /// A token of the run-length data isn't a number.
    #[error("bad seen run value {0:?}")]
    BadRun(String),
}

/// Visited tiles `first..=last` of one overmap row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeenSpan {
    /// Row within the overmap.
    pub row: usize,
    /// First visited column.
    pub first: usize,
    /// Last visited column, inclusive.
    pub last: usize,
}

/// Marker and text of a map note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteLabel {
    /// Note text without the marker prefixes.
    pub text: String,
    /// Color letter from a `<c>;` prefix, lowercased.
    pub color: Option<char>,
    /// Map symbol from a `<s>:` or `<s>|` prefix.
    pub symbol: Option<char>,
}

/// Map note at an overmap-local tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Column within the overmap.
    pub x: usize,
    /// Row within the overmap.
    pub y: usize,
    /// Parsed note line.
    pub label: NoteLabel,
}

/// Parses a seen file name of the form `#<player>.seen.<x>.<y>`.
pub fn parse_seen_name(name: &str) -> Option<TileCoord> {
    if !name.starts_with('#') {
        return None;
    }

    let mut parts = name.rsplitn(3, '.');
    let (Some(y), Some(x), Some(stem)) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if !stem.ends_with(".seen") {
        return None;
    }

    match (x.parse(), y.parse()) {
        (Ok(x), Ok(y)) => Some(TileCoord { x, y }),
        _ => {
            debug!(name, "skipping seen file with non-numeric coordinates");
            None
        },
    }
}

/// Lines following the `L <layer>` header of a seen file.
fn level_lines(data: &str, layer: usize) -> Option<Lines<'_>> {
    let header = format!("L {layer}");
    let mut lines = data.lines();
    lines.find(|line| line.trim_end() == header)?;
    Some(lines)
}

/// Run-length seen data line of `layer`.
///
/// # Errors
/// Fails if the file has no such level or the header is the last line.
pub fn seen_level(data: &str, layer: usize) -> Result<&str, SeenError> {
    level_lines(data, layer)
        .and_then(|mut lines| lines.next())
        .ok_or(SeenError::LevelNotFound(layer))
}

/// Expands `<visited> <count>` pairs into per-row spans of visited tiles.
///
/// Tiles are numbered row-major over rows of `map_width`; a visited run
/// crossing a row end is split into one span per row. Rows past
/// `map_height` are dropped with a warning. A trailing unpaired value is
/// ignored.
///
/// # Errors
/// Fails if a value isn't a non-negative integer.
pub fn parse_seen_data(
    data: &str,
    map_width: usize,
    map_height: usize,
) -> Result<Vec<SeenSpan>, SeenError> {
    let mut spans = Vec::new();
    if map_width == 0 {
        return Ok(spans);
    }

    let area = map_width.saturating_mul(map_height);
    let mut position = 0usize;
    let mut values = data.split_whitespace().map(|token| {
        token
            .parse::<usize>()
            .map_err(|_| SeenError::BadRun(token.into()))
    });

    while let (Some(visited), Some(count)) = (values.next(), values.next()) {
        let (visited, count) = (visited?, count?);
        let start = position;
        position = position.saturating_add(count);
        if visited != 1 || count == 0 {
            continue;
        }

        if start >= area {
            warn!(start, count, "seen run starts past the overmap area");
            continue;
        }
        let end = position.min(area) - 1;

        let (mut row, mut first) = (start / map_width, start % map_width);
        let (last_row, last) = (end / map_width, end % map_width);
        while row < last_row {
            spans.push(SeenSpan { row, first, last: map_width - 1 });
            row += 1;
            first = 0;
        }
        spans.push(SeenSpan { row, first, last });
    }

    Ok(spans)
}

/// Splits a note line into its optional marker prefixes and the text.
///
/// Up to two prefixes of one character followed by `:`, `|` or `;` are
/// recognized. A prefix ending in `;` sets the color, any other sets the
/// symbol.
pub fn parse_note(line: &str) -> NoteLabel {
    let mut label = NoteLabel::default();
    let mut rest = line;
    for _ in 0..2 {
        let mut chars = rest.chars();
        let (Some(mark), Some(separator @ (':' | '|' | ';'))) = (chars.next(), chars.next())
        else {
            break;
        };

        if separator == ';' {
            label.color = mark.to_lowercase().next();
        } else {
            label.symbol = Some(mark);
        }
        rest = chars.as_str();
    }

    label.text = rest.into();
    label
}

/// Notes recorded for `layer` in a seen file. Reading stops at the first
/// line that isn't an `N <x> <y>` header.
pub fn parse_notes(data: &str, layer: usize) -> Vec<Note> {
    let Some(lines) = level_lines(data, layer) else {
        return Vec::new();
    };

    let mut notes = Vec::new();
    let mut lines = lines.skip(LINES_BEFORE_NOTES);
    while let Some((x, y)) = lines.next().and_then(parse_note_header) {
        let Some(text) = lines.next() else {
            warn!(x, y, "note header without text");
            break;
        };
        notes.push(Note { x, y, label: parse_note(text) });
    }
    notes
}

fn parse_note_header(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.strip_prefix("N ")?.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    Some((x, y))
}

/// RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SeenImage {
    /// Creates an image filled with `background`.
    ///
    /// # Errors
    /// Fails if the pixel buffer cannot be allocated.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, Error> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| Error::image_alloc_failed(width, height))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::image_alloc_failed(width, height))?;
        pixels.extend(background.0.iter().copied().cycle().take(len));

        Ok(Self { width, height, pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        let offset = self.offset(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(Rgba(rgba))
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        let (width, height) = (self.width as usize, self.height as usize);
        (x < width && y < height).then(|| (y * width + x) * 4)
    }

    fn set(&mut self, x: usize, y: usize, color: Rgba) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset..offset + 4].copy_from_slice(&color.0);
        }
    }

    /// Fills the half-open rectangle `x0..x1` by `y0..y1`, clipped to the image.
    fn fill(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: Rgba) {
        let x1 = x1.min(self.width as usize);
        let y1 = y1.min(self.height as usize);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    /// Draws the outline of the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    fn outline(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: Rgba) {
        if x1 < x0 || y1 < y0 {
            return;
        }

        for x in x0..=x1 {
            self.set(x, y0, color);
            self.set(x, y1, color);
        }
        for y in y0..=y1 {
            self.set(x0, y, color);
            self.set(x1, y, color);
        }
    }
}

/// Draws the explored area of a save from its seen files.
#[derive(Debug)]
pub struct SeenRenderer {
    config: SeenConfig,
    overmap_width: usize,
    overmap_height: usize,
}

impl SeenRenderer {
    /// Creates a renderer.
    ///
    /// # Errors
    /// Fails if a map dimension or the scale is zero, or an overmap is too
    /// large to draw.
    pub fn new(config: SeenConfig) -> Result<Self, Error> {
        if config.map_width == 0 || config.map_height == 0 || config.scale == 0 {
            return Err(Error::seen_config_invalid("map size and scale must be positive"));
        }

        let pixels = |tiles: usize| {
            tiles
                .checked_mul(config.scale)
                .ok_or_else(|| Error::seen_config_invalid("overmap too large to draw at this scale"))
        };
        Ok(Self {
            config,
            overmap_width: pixels(config.map_width)?,
            overmap_height: pixels(config.map_height)?,
        })
    }

    /// Finds the seen files below `root`.
    ///
    /// # Errors
    /// Fails if the directory cannot be traversed or holds no seen files.
    pub fn discover(root: &std::path::Path) -> Result<OvermapGrid, Error> {
        OvermapGrid::discover_matching(root, parse_seen_name)
    }

    /// Draws every seen file of `grid`, then the enabled overlays: notes,
    /// overmap grid, origin.
    ///
    /// # Errors
    /// Fails if the image is too large, or a seen file cannot be read or
    /// lacks the configured level.
    pub fn render(&self, grid: &OvermapGrid) -> Result<SeenImage, Error> {
        let size = |overmaps: usize, pixels: usize| {
            overmaps
                .checked_mul(pixels)
                .and_then(|total| u32::try_from(total).ok())
                .ok_or_else(|| Error::image_too_large(grid.width(), grid.height()))
        };
        let width = size(grid.width(), self.overmap_width)?;
        let height = size(grid.height(), self.overmap_height)?;
        let mut image = SeenImage::new(width, height, BACKGROUND)?;

        for (row, files) in grid.rows().enumerate() {
            for (column, file) in files.iter().enumerate() {
                let Some(path) = file else {
                    continue;
                };
                debug!(path = %path.display(), column, row, "drawing seen file");

                let data =
                    std::fs::read_to_string(path).map_err(|e| Error::tile_read_failed(path, &e))?;
                self.draw_seen(&mut image, &data, column, row)
                    .map_err(|e| Error::seen_failed(path, &e))?;
                if self.config.notes {
                    self.draw_notes(&mut image, &data, column, row);
                }
            }
        }

        if self.config.grid {
            self.draw_grid(&mut image, grid.width(), grid.height());
        }
        if self.config.origin {
            self.draw_origin(&mut image, grid);
        }

        Ok(image)
    }

    fn draw_seen(
        &self,
        image: &mut SeenImage,
        data: &str,
        column: usize,
        row: usize,
    ) -> Result<(), SeenError> {
        let level = seen_level(data, self.config.layer)?;
        let spans = parse_seen_data(level, self.config.map_width, self.config.map_height)?;

        let scale = self.config.scale;
        let (left, top) = (column * self.overmap_width, row * self.overmap_height);
        for span in spans {
            image.fill(
                left + span.first * scale,
                top + span.row * scale,
                left + (span.last + 1) * scale,
                top + (span.row + 1) * scale,
                SEEN,
            );
        }
        Ok(())
    }

    fn draw_notes(&self, image: &mut SeenImage, data: &str, column: usize, row: usize) {
        let scale = self.config.scale;
        let (left, top) = (column * self.overmap_width, row * self.overmap_height);
        for note in parse_notes(data, self.config.layer) {
            if note.x >= self.config.map_width || note.y >= self.config.map_height {
                warn!(x = note.x, y = note.y, text = %note.label.text, "note outside the overmap");
                continue;
            }

            let (x, y) = (left + note.x * scale, top + note.y * scale);
            image.fill(x, y, x + scale, y + scale, NOTE);
        }
    }

    fn draw_grid(&self, image: &mut SeenImage, columns: usize, rows: usize) {
        for row in 0..rows {
            for column in 0..columns {
                let (left, top) = (column * self.overmap_width, row * self.overmap_height);
                image.outline(
                    left,
                    top,
                    left + self.overmap_width - 1,
                    top + self.overmap_height - 1,
                    GRID,
                );
            }
        }
    }

    fn draw_origin(&self, image: &mut SeenImage, grid: &OvermapGrid) {
        let (min, max) = (grid.min(), grid.max());
        if !(min.x..=max.x).contains(&0) || !(min.y..=max.y).contains(&0) {
            return;
        }

        // both are in 0..=-min since min <= 0
        let column = min.x.unsigned_abs() as usize;
        let row = min.y.unsigned_abs() as usize;
        let (left, top) = (column * self.overmap_width, row * self.overmap_height);
        image.outline(
            left + 1,
            top + 1,
            (left + self.overmap_width).saturating_sub(2),
            (top + self.overmap_height).saturating_sub(2),
            ORIGIN,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    fn span(row: usize, first: usize, last: usize) -> SeenSpan {
        SeenSpan { row, first, last }
    }

    fn label(text: &str, color: Option<char>, symbol: Option<char>) -> NoteLabel {
        NoteLabel { text: text.into(), color, symbol }
    }

    #[test]
    fn parses_seen_names() {
        assert_eq!(parse_seen_name("#UGxheWVy.seen.0.0"), Some(TileCoord::new(0, 0)));
        assert_eq!(parse_seen_name("#UGxheWVy.seen.-1.3"), Some(TileCoord::new(-1, 3)));
        assert_eq!(parse_seen_name("#a.b.seen.2.-7"), Some(TileCoord::new(2, -7)));
    }

    #[test]
    fn rejects_other_names() {
        assert_eq!(parse_seen_name("o.0.0"), None);
        assert_eq!(parse_seen_name("UGxheWVy.seen.0.0"), None);
        assert_eq!(parse_seen_name("#UGxheWVy.sav"), None);
        assert_eq!(parse_seen_name("#UGxheWVy.seen.0"), None);
        assert_eq!(parse_seen_name("#UGxheWVy.seen.x.0"), None);
        assert_eq!(parse_seen_name("#UGxheWVy.mm.0.0"), None);
    }

    #[test]
    fn seen_data_becomes_row_spans() {
        assert_eq!(parse_seen_data("1 10", 180, 180).unwrap(), [span(0, 0, 9)]);
        assert_eq!(parse_seen_data("0 10 1 5", 180, 180).unwrap(), [span(0, 10, 14)]);
        assert_eq!(
            parse_seen_data("1 200", 180, 180).unwrap(),
            [span(0, 0, 179), span(1, 0, 19)]
        );
    }

    #[test]
    fn long_runs_cover_whole_rows() {
        assert_eq!(
            parse_seen_data("0 2 1 10", 4, 4).unwrap(),
            [span(0, 2, 3), span(1, 0, 3), span(2, 0, 3)]
        );
    }

    #[test]
    fn runs_past_the_overmap_are_clipped() {
        assert_eq!(parse_seen_data("1 999999999", 2, 2).unwrap(), [span(0, 0, 1), span(1, 0, 1)]);
        assert!(parse_seen_data("0 4 1 3", 2, 2).unwrap().is_empty());
    }

    #[test]
    fn empty_runs_and_odd_values_are_ignored() {
        assert_eq!(parse_seen_data("1 0 1 2 1", 180, 180).unwrap(), [span(0, 0, 1)]);
        assert!(parse_seen_data("", 180, 180).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_run_is_an_error() {
        assert!(matches!(parse_seen_data("1 ten", 180, 180), Err(SeenError::BadRun(_))));
        assert!(matches!(parse_seen_data("-1 3", 180, 180), Err(SeenError::BadRun(_))));
    }

    #[test]
    fn note_prefixes_set_color_and_symbol() {
        assert_eq!(parse_note("<:W;AUTO: goes up"), label("AUTO: goes up", Some('w'), Some('<')));
        assert_eq!(parse_note(">:W;AUTO: goes down"), label("AUTO: goes down", Some('w'), Some('>')));
        assert_eq!(parse_note("GOOD STUFF HERE!"), label("GOOD STUFF HERE!", None, None));
        assert_eq!(parse_note("R;!:TANK DRONE"), label("TANK DRONE", Some('r'), Some('!')));
        assert_eq!(parse_note("C;H:Base 1"), label("Base 1", Some('c'), Some('H')));
        assert_eq!(parse_note("x|loot"), label("loot", None, Some('x')));
    }

    const SEEN_FILE: &str = "# version 26
L 9
1 4
0 4
0
L 10
0 1 1 2 0 13
0 16
2
N 0 0
<:W;AUTO: goes up
N 3 2
Base 1
L 11
1 16
";

    #[test]
    fn selects_level_lines() {
        assert_eq!(seen_level(SEEN_FILE, 10).unwrap(), "0 1 1 2 0 13");
        assert_eq!(seen_level(SEEN_FILE, 11).unwrap(), "1 16");
        assert!(matches!(seen_level(SEEN_FILE, 1), Err(SeenError::LevelNotFound(1))));
        assert!(matches!(seen_level("L 10", 10), Err(SeenError::LevelNotFound(10))));
    }

    #[test]
    fn reads_notes_of_the_level() {
        let notes = parse_notes(SEEN_FILE, 10);

        assert_eq!(notes.len(), 2);
        assert_eq!((notes[0].x, notes[0].y), (0, 0));
        assert_eq!(notes[0].label, label("AUTO: goes up", Some('w'), Some('<')));
        assert_eq!((notes[1].x, notes[1].y), (3, 2));
        assert_eq!(notes[1].label.text, "Base 1");

        assert!(parse_notes(SEEN_FILE, 9).is_empty());
        assert!(parse_notes(SEEN_FILE, 3).is_empty());
    }

    fn config(scale: usize) -> SeenConfig {
        SeenConfig {
            map_width: 4,
            map_height: 4,
            scale,
            grid: false,
            origin: false,
            ..SeenConfig::default()
        }
    }

    fn grid_of(dir: &std::path::Path, files: &[(i32, i32, &str)]) -> OvermapGrid {
        let tiles = files.iter().map(|&(x, y, data)| {
            let path = dir.join(format!("#cGxheWVy.seen.{x}.{y}"));
            fs::write(&path, data).unwrap();
            (TileCoord::new(x, y), path)
        });
        OvermapGrid::from_tiles(tiles.collect::<Vec<(TileCoord, PathBuf)>>()).unwrap()
    }

    #[test]
    fn default_config() {
        let config = SeenConfig::default();
        assert_eq!((config.map_width, config.map_height), (180, 180));
        assert_eq!((config.layer, config.scale), (10, 2));
        assert!(config.grid && config.origin && !config.notes);
    }

    #[test]
    fn draws_visited_tiles_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let grid = grid_of(dir.path(), &[(0, 0, "L 10\n0 1 1 2 0 13\n")]);

        let image = SeenRenderer::new(config(2)).unwrap().render(&grid).unwrap();

        assert_eq!((image.width(), image.height()), (8, 8));
        assert_eq!(image.pixels().len(), 8 * 8 * 4);
        assert_eq!(image.pixel(1, 0), Some(BACKGROUND));
        assert_eq!(image.pixel(2, 0), Some(SEEN));
        assert_eq!(image.pixel(5, 1), Some(SEEN));
        assert_eq!(image.pixel(6, 0), Some(BACKGROUND));
        assert_eq!(image.pixel(2, 2), Some(BACKGROUND));
    }

    #[test]
    fn overmaps_are_placed_by_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let grid = grid_of(dir.path(), &[
            (-1, 0, "L 10\n1 1 0 15\n"),
            (0, 1, "L 10\n0 15 1 1\n"),
        ]);

        let image = SeenRenderer::new(config(1)).unwrap().render(&grid).unwrap();

        assert_eq!((image.width(), image.height()), (8, 8));
        assert_eq!(image.pixel(0, 0), Some(SEEN));
        assert_eq!(image.pixel(7, 7), Some(SEEN));
        assert_eq!(image.pixel(4, 0), Some(BACKGROUND));
        assert_eq!(image.pixel(3, 7), Some(BACKGROUND));
    }

    #[test]
    fn overlays_outline_overmaps_and_origin() {
        let dir = tempfile::tempdir().unwrap();
        let grid = grid_of(dir.path(), &[(0, 0, "L 10\n0 16\n"), (1, 0, "L 10\n0 16\n")]);
        let config = SeenConfig { grid: true, origin: true, ..config(2) };

        let image = SeenRenderer::new(config).unwrap().render(&grid).unwrap();

        assert_eq!(image.pixel(0, 0), Some(GRID));
        assert_eq!(image.pixel(7, 7), Some(GRID));
        assert_eq!(image.pixel(8, 3), Some(GRID));
        assert_eq!(image.pixel(15, 0), Some(GRID));
        assert_eq!(image.pixel(1, 1), Some(ORIGIN));
        assert_eq!(image.pixel(6, 4), Some(ORIGIN));
        assert_eq!(image.pixel(3, 3), Some(BACKGROUND));
        assert_eq!(image.pixel(10, 3), Some(BACKGROUND));
        assert_eq!(image.pixel(9, 9), None);
    }

    #[test]
    fn origin_outside_the_save_is_not_drawn() {
        let dir = tempfile::tempdir().unwrap();
        let grid = grid_of(dir.path(), &[(3, 3, "L 10\n0 16\n")]);
        let config = SeenConfig { origin: true, ..config(2) };

        let image = SeenRenderer::new(config).unwrap().render(&grid).unwrap();
        assert!(image.pixels().chunks(4).all(|pixel| pixel == BACKGROUND.0.as_slice()));
    }

    #[test]
    fn notes_are_marked_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let data = "L 10\n1 16\n0 16\n1\nN 1 2\nC;H:Base 1\nN 9 0\nfar away\n";
        let grid = grid_of(dir.path(), &[(0, 0, data)]);

        let plain = SeenRenderer::new(config(1)).unwrap().render(&grid).unwrap();
        assert_eq!(plain.pixel(1, 2), Some(SEEN));

        let config = SeenConfig { notes: true, ..config(1) };
        let noted = SeenRenderer::new(config).unwrap().render(&grid).unwrap();
        assert_eq!(noted.pixel(1, 2), Some(NOTE));
        assert_eq!(noted.pixel(0, 2), Some(SEEN));
    }

    #[test]
    fn missing_level_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let grid = grid_of(dir.path(), &[(0, 0, "L 9\n1 16\n")]);

        let err = SeenRenderer::new(config(1)).unwrap().render(&grid).unwrap_err();
        assert!(matches!(err, Error::Layer(_)));
        assert!(err.to_string().contains("no seen data for level 10"));
    }

    #[test]
    fn zero_scale_is_rejected() {
        assert!(SeenRenderer::new(config(0)).is_err());
        assert!(SeenRenderer::new(SeenConfig { map_width: 0, ..config(1) }).is_err());
    }

    #[test]
    fn discovers_seen_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("o.0.0"), "").unwrap();
        fs::write(dir.path().join("#cGxheWVy.seen.2.1"), "").unwrap();
        fs::write(dir.path().join("#cGxheWVy.sav"), "").unwrap();

        let grid = SeenRenderer::discover(dir.path()).unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 1));
        assert_eq!(grid.min(), TileCoord::new(2, 1));

        let empty = tempfile::tempdir().unwrap();
        assert!(matches!(SeenRenderer::discover(empty.path()), Err(Error::Save(_))));
    }
}
