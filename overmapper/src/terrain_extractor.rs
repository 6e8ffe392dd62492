use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use compact_str::CompactString;
use overmap_data::{SymbolSpec, TerrainEntry, TerrainTable, TerrainTableBuilder};
use serde::Deserialize;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Terrain definition record as found in the game's JSON data.
///
/// Only the fields needed for rendering are kept; everything else in the
/// record is ignored.
#[derive(Debug, Deserialize)]
struct RawTerrain {
    id: Option<CompactString>,
    color: Option<CompactString>,
    sym: Option<RawSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSymbol {
    Single(i64),
    Multi(Vec<i64>),
}

impl From<RawSymbol> for SymbolSpec {
    fn from(raw: RawSymbol) -> Self {
        match raw {
            RawSymbol::Single(code) => SymbolSpec::Single(code),
            RawSymbol::Multi(codes) => SymbolSpec::Multi(codes),
        }
    }
}

/// Collects overmap terrain definitions from game data files into a
/// [`TerrainTableBuilder`].
#[derive(Debug, Default)]
pub struct TerrainExtractor {
    builder: TerrainTableBuilder,
    parsed: usize,
}

impl TerrainExtractor {
    /// Creates an extractor with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts terrain from a game root, in order: the core
    /// `data/json/overmap_terrain.json`, every `*.json` below
    /// `data/json/mapgen`, then every `overmap_terrain.json` below
    /// `data/mods`. Later definitions overwrite earlier ones.
    pub fn extract_game_data(&mut self, root: &Path) -> Result<()> {
        let json_dir = root.join("data").join("json");
        self.process_file(&json_dir.join("overmap_terrain.json"))?;

        self.process_tree(&json_dir.join("mapgen"), |path| {
            path.extension().is_some_and(|ext| ext == "json")
        })?;

        self.process_tree(&root.join("data").join("mods"), |path| {
            path.file_name().is_some_and(|name| name == "overmap_terrain.json")
        })?;

        if self.builder.is_empty() {
            warn!(root = %root.display(), "no overmap terrain definitions found");
        }
        info!(terrains = self.parsed, unique = self.builder.len(), "terrain extraction finished");
        Ok(())
    }

    /// Processes every file below `dir` accepted by `filter`, sorted by file name.
    fn process_tree(&mut self, dir: &Path, filter: impl Fn(&Path) -> bool) -> Result<()> {
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry =
                entry.wrap_err_with(|| format!("Failed to walk directory {}", dir.display()))?;
            if entry.file_type().is_file() && filter(entry.path()) {
                self.process_file(entry.path())?;
            }
        }

        Ok(())
    }

    /// Extracts all terrain definitions from one JSON file.
    ///
    /// Returns the number of definitions taken from the file.
    pub fn process_file(&mut self, path: &Path) -> Result<usize> {
        info!(path = %path.display(), "processing terrain file");
        let data = std::fs::read(path)
            .wrap_err_with(|| format!("Failed to read terrain file {}", path.display()))?;

        self.process_json(&data)
            .wrap_err_with(|| format!("Failed to process terrain file {}", path.display()))
    }

    /// Extracts all terrain definitions from a JSON array of records.
    ///
    /// Records without a symbol are skipped silently; records that cannot be
    /// decoded are logged and skipped.
    pub fn process_json(&mut self, data: &[u8]) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_slice(data).wrap_err("Invalid JSON")?;
        let serde_json::Value::Array(records) = value else {
            return Err(eyre!("Expected a JSON array of records"));
        };

        let mut taken = 0;
        for record in records {
            let raw = match RawTerrain::deserialize(&record) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(error = %err, "bad terrain record format");
                    continue;
                },
            };

            if self.add_terrain(raw) {
                taken += 1;
            }
        }

        Ok(taken)
    }

    fn add_terrain(&mut self, raw: RawTerrain) -> bool {
        let Some(sym) = raw.sym else {
            return false;
        };
        let Some(id) = raw.id else {
            warn!("terrain record without id");
            return false;
        };

        let glyphs = SymbolSpec::from(sym).decode();
        let Some(entry) = TerrainEntry::new(glyphs, raw.color.unwrap_or_default()) else {
            return false;
        };

        info!(id = %id, glyphs = ?entry.glyphs(), color = entry.color(), "parsed terrain");
        if self.builder.insert(id.clone(), entry).is_some() {
            warn!(id = %id, "terrain already defined, overwriting");
        }
        self.parsed += 1;
        true
    }

    /// Freezes everything extracted so far.
    pub fn finish(self) -> TerrainTable {
        self.builder.build()
    }
}

/// Builds the terrain table from a game root.
pub fn prepare(root: &Path) -> Result<TerrainTable> {
    let mut extractor = TerrainExtractor::new();
    extractor.extract_game_data(root)?;
    Ok(extractor.finish())
}
