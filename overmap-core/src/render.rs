use std::io::Write;

use overmap_data::TerrainTable;
use tracing::{debug, warn};

use crate::{
    Error,
    grid::OvermapGrid,
    html,
    layer::{TileRun, read_layer},
    resolve::resolve,
};

/// Shape of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Complete HTML document with colored spans.
    #[default]
    Html,
    /// Raw glyphs only.
    Plain,
}

/// Rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Characters per tile row.
    pub tile_width: usize,
    /// Rows per tile.
    pub tile_height: usize,
    /// Index of the z-level layer to render.
    pub layer: usize,
    /// HTML document or plain glyphs.
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_width: 180,
            tile_height: 180,
            layer: 10,
            format: OutputFormat::Html,
        }
    }
}

/// Renders an [`OvermapGrid`] as text, one band of tiles at a time.
///
/// Each band holds one row of tiles. Every tile is expanded into
/// `tile_height` lines of `tile_width` glyphs; once the band is complete its
/// lines are written out left to right and the buffers reused for the next
/// band.
#[derive(Debug)]
pub struct OvermapRenderer<'a> {
    table: &'a TerrainTable,
    config: RenderConfig,
}

impl<'a> OvermapRenderer<'a> {
    /// Creates a renderer resolving symbols through `table`.
    pub fn new(table: &'a TerrainTable, config: RenderConfig) -> Self {
        Self { table, config }
    }

    /// Renders the whole grid to `out`.
    ///
    /// # Errors
    /// Fails if a tile cannot be read or decoded, or if writing fails.
    pub fn render(&self, grid: &OvermapGrid, out: &mut impl Write) -> Result<(), Error> {
        if self.config.format == OutputFormat::Html {
            html::write_header(out).map_err(|e| Error::output_failed(&e))?;
        }

        let mut band = vec![vec![String::new(); self.config.tile_height]; grid.width()];
        for (row, tiles) in grid.rows().enumerate() {
            debug!(row, "rendering band");
            for (tile, lines) in tiles.iter().zip(band.iter_mut()) {
                match tile {
                    Some(path) => {
                        debug!(path = %path.display(), "rendering tile");
                        let runs = read_layer(path, self.config.layer)?;
                        self.render_tile(&runs, lines);
                    },
                    None => self.render_tile(&[], lines),
                }
            }
            flush_band(&mut band, out).map_err(|e| Error::output_failed(&e))?;
        }

        if self.config.format == OutputFormat::Html {
            html::write_footer(out).map_err(|e| Error::output_failed(&e))?;
        }
        out.flush().map_err(|e| Error::output_failed(&e))
    }

    /// Expands `runs` into the tile's lines, padding whatever the runs leave
    /// uncovered with blanks.
    ///
    /// A line advances exactly when it is full, so a run ending on the tile
    /// edge never leaves an empty line behind. Runs past the tile area are
    /// dropped with a warning.
    pub fn render_tile(&self, runs: &[TileRun], lines: &mut [String]) {
        let width = self.config.tile_width;
        if width == 0 {
            return;
        }

        let mut line = 0;
        let mut column = 0;
        for (index, run) in runs.iter().enumerate() {
            let symbol = resolve(self.table, &run.id);
            let glyph = match self.config.format {
                OutputFormat::Html => html::escape_glyph(symbol.glyph),
                OutputFormat::Plain => symbol.glyph.into(),
            };
            let span_color = match self.config.format {
                OutputFormat::Html if !symbol.color.is_empty() => Some(symbol.color),
                _ => None,
            };

            let mut remaining = run.count as usize;
            while remaining > 0 {
                let Some(buffer) = lines.get_mut(line) else {
                    let dropped = remaining
                        + runs[index + 1..]
                            .iter()
                            .map(|run| run.count as usize)
                            .sum::<usize>();
                    warn!(id = %run.id, dropped, "tile data exceeds tile area");
                    return;
                };

                let segment = remaining.min(width - column);
                if let Some(color) = span_color {
                    buffer.push_str("<span class=\"cl_");
                    buffer.push_str(color);
                    buffer.push_str("\">");
                }
                (0..segment).for_each(|_| buffer.push_str(&glyph));
                if span_color.is_some() {
                    buffer.push_str("</span>");
                }

                column += segment;
                remaining -= segment;
                if column == width {
                    column = 0;
                    line += 1;
                }
            }
        }

        if column > 0
            && let Some(buffer) = lines.get_mut(line)
        {
            pad(buffer, width - column);
            line += 1;
        }
        lines
            .iter_mut()
            .skip(line)
            .for_each(|buffer| pad(buffer, width));
    }
}

fn pad(buffer: &mut String, count: usize) {
    buffer.extend(std::iter::repeat_n(' ', count));
}

/// Writes each line of the band across all tiles, then clears the buffers.
fn flush_band(band: &mut [Vec<String>], out: &mut impl Write) -> std::io::Result<()> {
    let height = band.first().map_or(0, Vec::len);
    for line in 0..height {
        for tile in band.iter_mut() {
            out.write_all(tile[line].as_bytes())?;
            tile[line].clear();
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use compact_str::ToCompactString;
    use overmap_data::{TerrainEntry, TerrainTableBuilder};

    use super::*;
    use crate::grid::TileCoord;

    fn table() -> TerrainTable {
        let mut builder = TerrainTableBuilder::new();
        let mut add = |id: &str, glyph: &str, color: &str| {
            let glyphs = vec![glyph.to_compact_string()];
            builder.insert(id, TerrainEntry::new(glyphs, color).unwrap());
        };

        add("grass", "g", "green");
        add("wall", "w", "");
        add("lt", "<", "red");
        add("gt", ">", "");
        builder.build()
    }

    fn config(width: usize, height: usize, format: OutputFormat) -> RenderConfig {
        RenderConfig { tile_width: width, tile_height: height, layer: 0, format }
    }

    fn run(id: &str, count: u32) -> TileRun {
        TileRun { id: id.into(), count }
    }

    fn render_tile(config: RenderConfig, runs: &[TileRun]) -> Vec<String> {
        let table = table();
        let mut lines = vec![String::new(); config.tile_height];
        OvermapRenderer::new(&table, config).render_tile(runs, &mut lines);
        lines
    }

    #[test]
    fn default_config() {
        let config = RenderConfig::default();
        assert_eq!((config.tile_width, config.tile_height), (180, 180));
        assert_eq!(config.layer, 10);
        assert_eq!(config.format, OutputFormat::Html);
    }

    #[test]
    fn runs_wrap_at_tile_width() {
        let lines = render_tile(
            config(4, 2, OutputFormat::Plain),
            &[run("grass", 3), run("wall", 2)],
        );
        assert_eq!(lines, ["gggw", "w   "]);
    }

    #[test]
    fn run_ending_on_edge_leaves_no_blank_line() {
        let lines = render_tile(
            config(4, 3, OutputFormat::Plain),
            &[run("grass", 4), run("wall", 4), run("grass", 4)],
        );
        assert_eq!(lines, ["gggg", "wwww", "gggg"]);
    }

    #[test]
    fn short_tile_is_padded() {
        let lines = render_tile(config(3, 3, OutputFormat::Plain), &[run("wall", 4)]);
        assert_eq!(lines, ["www", "w  ", "   "]);

        let blank = render_tile(config(3, 2, OutputFormat::Plain), &[]);
        assert_eq!(blank, ["   ", "   "]);
    }

    #[test]
    fn overflowing_runs_are_dropped() {
        let lines = render_tile(
            config(2, 2, OutputFormat::Plain),
            &[run("grass", 3), run("wall", 5)],
        );
        assert_eq!(lines, ["gg", "gw"]);
    }

    #[test]
    fn unresolved_terrain_renders_placeholder() {
        let lines = render_tile(config(3, 1, OutputFormat::Html), &[run("mall", 3)]);
        assert_eq!(lines, ["???"]);
    }

    #[test]
    fn html_wraps_each_line_segment_in_span() {
        let lines = render_tile(
            config(4, 2, OutputFormat::Html),
            &[run("grass", 3), run("wall", 2)],
        );
        assert_eq!(lines, [
            "<span class=\"cl_green\">ggg</span>w",
            "w   "
        ]);

        let wrapped = render_tile(config(2, 2, OutputFormat::Html), &[run("grass", 3)]);
        assert_eq!(wrapped, [
            "<span class=\"cl_green\">gg</span>",
            "<span class=\"cl_green\">g</span> "
        ]);
    }

    #[test]
    fn html_escapes_markup_glyphs() {
        let html = render_tile(
            config(3, 1, OutputFormat::Html),
            &[run("lt", 1), run("gt", 2)],
        );
        assert_eq!(html, ["<span class=\"cl_red\">&#x3c;</span>&#x3e;&#x3e;"]);

        let plain = render_tile(
            config(3, 1, OutputFormat::Plain),
            &[run("lt", 1), run("gt", 2)],
        );
        assert_eq!(plain, ["<>>"]);
    }

    fn write_tile(dir: &std::path::Path, name: &str, layer: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("# version 26{{\"layers\":[{layer}]}}")).unwrap();
        path
    }

    #[test]
    fn bands_flush_line_by_line_left_to_right() {
        let dir = tempfile::tempdir().unwrap();
        let grid = OvermapGrid::from_tiles([
            (TileCoord::new(0, 0), write_tile(dir.path(), "o.0.0", r#"[["grass",4]]"#)),
            (TileCoord::new(1, 0), write_tile(dir.path(), "o.1.0", r#"[["wall",4]]"#)),
            (TileCoord::new(1, 1), write_tile(dir.path(), "o.1.1", r#"[["grass",2],["wall",2]]"#)),
        ])
        .unwrap();

        let table = table();
        let mut out = Vec::new();
        OvermapRenderer::new(&table, config(2, 2, OutputFormat::Plain))
            .render(&grid, &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "ggww\nggww\n  gg\n  ww\n");
    }

    #[test]
    fn html_document_wraps_map() {
        let dir = tempfile::tempdir().unwrap();
        let grid = OvermapGrid::from_tiles([(
            TileCoord::new(0, 0),
            write_tile(dir.path(), "o.0.0", r#"[["wall",1]]"#),
        )])
        .unwrap();

        let table = table();
        let mut out = Vec::new();
        OvermapRenderer::new(&table, config(1, 1, OutputFormat::Html))
            .render(&grid, &mut out)
            .unwrap();

        let document = String::from_utf8(out).unwrap();
        assert!(document.starts_with("<html><head><style>\n"));
        assert!(document.ends_with("<body><pre>\nw\n</pre></body></html>\n"));
    }

    #[test]
    fn negative_run_counts_do_not_abort_render() {
        let dir = tempfile::tempdir().unwrap();
        let grid = OvermapGrid::from_tiles([(
            TileCoord::new(0, 0),
            write_tile(dir.path(), "o.0.0", r#"[["grass",-2],["wall",3]]"#),
        )])
        .unwrap();

        let table = table();
        let mut out = Vec::new();
        OvermapRenderer::new(&table, config(2, 2, OutputFormat::Plain))
            .render(&grid, &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "ww
w 
");
    }

    #[test]
    fn unreadable_tile_aborts_render() {
        let dir = tempfile::tempdir().unwrap();
        let grid = OvermapGrid::from_tiles([(TileCoord::new(0, 0), dir.path().join("o.0.0"))])
            .unwrap();

        let table = table();
        let result = OvermapRenderer::new(&table, RenderConfig::default()).render(&grid, &mut Vec::new());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
