use std::{fs::File, io::Write, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use overmap_data::TerrainTable;
use tracing::info;

/// Writes the terrain table to `path`, replacing any existing file.
pub fn save_table(table: &TerrainTable, path: &Path) -> Result<()> {
    let bytes = table.to_binary().wrap_err("Failed to serialize terrain table")?;
    let mut file = File::create(path)
        .wrap_err_with(|| format!("Failed to create terrain table {}", path.display()))?;
    file.write_all(&bytes)
        .wrap_err_with(|| format!("Failed to write terrain table {}", path.display()))?;

    info!(path = %path.display(), entries = table.len(), "saved terrain table");
    Ok(())
}

/// Reads a terrain table written by [`save_table`].
pub fn load_table(path: &Path) -> Result<TerrainTable> {
    let bytes = std::fs::read(path).wrap_err_with(|| {
        format!("Failed to read terrain table {}; run `prepare` first", path.display())
    })?;
    let table = TerrainTable::from_binary(&bytes)
        .wrap_err_with(|| format!("Invalid terrain table {}", path.display()))?;

    info!(path = %path.display(), entries = table.len(), "loaded terrain table");
    Ok(table)
}
