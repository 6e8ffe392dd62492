use compact_str::CompactString;

use crate::serialization::{Deserializer, Serializable, SerializationError, Serializer};

/// Display information for one overmap terrain type.
///
/// Holds the glyph for each orientation the terrain can be placed in, plus
/// the color tag used for rendering. The glyph list is never empty: a terrain
/// definition without symbols never becomes an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainEntry {
    glyphs: Vec<CompactString>,
    color: CompactString,
}

impl TerrainEntry {
    /// Creates an entry, or `None` if `glyphs` is empty.
    pub fn new(glyphs: Vec<CompactString>, color: impl Into<CompactString>) -> Option<Self> {
        if glyphs.is_empty() {
            return None;
        }

        Some(Self { glyphs, color: color.into() })
    }

    /// The color tag; empty means "no color".
    pub fn color(&self) -> &str {
        &self.color
    }

    /// All glyphs, indexed by orientation.
    pub fn glyphs(&self) -> &[CompactString] {
        &self.glyphs
    }

    /// Glyph for the default orientation.
    pub fn primary_glyph(&self) -> &str {
        &self.glyphs[0]
    }

    /// Glyph at `orientation`, or the primary glyph when the terrain has no
    /// glyph for that orientation.
    pub fn glyph(&self, orientation: usize) -> &str {
        self.glyphs
            .get(orientation)
            .unwrap_or(&self.glyphs[0])
    }
}

impl Serializable for TerrainEntry {
    fn serialize(&self, ser: &mut Serializer) -> Result<(), SerializationError> {
        ser.write_len(self.glyphs.len())?;
        for glyph in &self.glyphs {
            ser.write_string(glyph)?;
        }
        ser.write_string(&self.color)
    }

    fn deserialize(deser: &mut Deserializer) -> Result<Self, SerializationError> {
        let count = deser.read_u32()?;
        // each glyph takes at least its 4-byte length prefix
        let mut glyphs = Vec::with_capacity((count as usize).min(deser.remaining() / 4));
        for _ in 0..count {
            glyphs.push(deser.read_string()?);
        }
        let color = deser.read_string()?;

        TerrainEntry::new(glyphs, color)
            .ok_or_else(|| SerializationError::new("terrain entry without glyphs"))
    }
}
