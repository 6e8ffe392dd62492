use std::collections::HashMap;

use compact_str::CompactString;

use crate::{
    Deserializer, Serializable, SerializationError, Serializer, TableDeserializationError,
    TerrainEntry,
};

/// Mutable terrain table, populated while scanning terrain definitions.
///
/// Starts empty. Inserting an identifier that is already present replaces the
/// previous entry (last write wins); nothing is ever removed. Call
/// [`build`](Self::build) to freeze it into a [`TerrainTable`].
#[derive(Debug, Default)]
pub struct TerrainTableBuilder {
    entries: HashMap<CompactString, TerrainEntry>,
}

impl TerrainTableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` under `id`, returning the entry it replaced.
    pub fn insert(
        &mut self,
        id: impl Into<CompactString>,
        entry: TerrainEntry,
    ) -> Option<TerrainEntry> {
        self.entries.insert(id.into(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the table for lookups.
    pub fn build(self) -> TerrainTable {
        TerrainTable { entries: self.entries }
    }
}

/// Read-only terrain table used for symbol resolution.
///
/// Obtained either from [`TerrainTableBuilder::build`] or by loading a table
/// persisted with [`to_binary`](Self::to_binary).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TerrainTable {
    entries: HashMap<CompactString, TerrainEntry>,
}

impl TerrainTable {
    /// Magic bytes at the start of a persisted table.
    pub const MAGIC: [u8; 4] = *b"OMTD";
    /// Persisted format version.
    pub const VERSION: u8 = 2;

    /// Entry stored under exactly `id`.
    pub fn get(&self, id: &str) -> Option<&TerrainEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by identifier.
    pub fn sorted_entries(&self) -> Vec<(&str, &TerrainEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(id, entry)| (id.as_str(), entry))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }

    /// Serializes the table: magic, version, then a deflate-compressed body
    /// of length-prefixed entries sorted by identifier.
    ///
    /// # Errors
    /// Fails if a string or glyph list is longer than a u32 length prefix
    /// can describe.
    pub fn to_binary(&self) -> Result<Vec<u8>, SerializationError> {
        let mut body = Serializer::new();
        self.serialize(&mut body)?;
        let compressed = miniz_oxide::deflate::compress_to_vec(&body.into_bytes(), 6);

        let mut ser = Serializer::new();
        ser.write_bytes(&Self::MAGIC);
        ser.write_u8(Self::VERSION);
        ser.write_bytes(&compressed);
        Ok(ser.into_bytes())
    }

    /// Deserializes a table written by [`to_binary`](Self::to_binary).
    ///
    /// # Errors
    /// Fails on a wrong magic or version, corrupt compressed data, truncated
    /// or trailing entry data, invalid UTF-8 or an entry without glyphs.
    pub fn from_binary(serialized: &[u8]) -> Result<Self, TableDeserializationError> {
        let failed = |message: String| TableDeserializationError {
            message: format!("Failed to deserialize terrain table: {message}"),
        };

        let mut header = Deserializer::new(serialized);
        let magic = header.read_bytes(4).map_err(|e| failed(e.message.into()))?;
        if magic != Self::MAGIC {
            return Err(failed(format!("bad magic {magic:02x?}")));
        }

        let version = header.read_u8().map_err(|e| failed(e.message.into()))?;
        if version != Self::VERSION {
            return Err(failed(format!("unsupported version {version}")));
        }

        let compressed = header
            .read_bytes(header.remaining())
            .map_err(|e| failed(e.message.into()))?;
        let body = miniz_oxide::inflate::decompress_to_vec(compressed)
            .map_err(|e| failed(format!("corrupt body: {e}")))?;

        let mut deser = Deserializer::new(&body);
        let table = TerrainTable::deserialize(&mut deser).map_err(|e| failed(e.message.into()))?;
        if deser.remaining() != 0 {
            return Err(failed(format!("{} trailing bytes", deser.remaining())));
        }

        Ok(table)
    }
}

impl Serializable for TerrainTable {
    fn serialize(&self, ser: &mut Serializer) -> Result<(), SerializationError> {
        let entries = self.sorted_entries();
        ser.write_len(entries.len())?;
        for (id, entry) in entries {
            ser.write_string(id)?;
            entry.serialize(ser)?;
        }
        Ok(())
    }

    fn deserialize(deser: &mut Deserializer) -> Result<Self, SerializationError> {
        let count = deser.read_u32()?;
        let mut entries = HashMap::with_capacity(count.min(u16::MAX as u32) as usize);
        for _ in 0..count {
            let id = deser.read_string()?;
            let entry = TerrainEntry::deserialize(deser)?;
            if entries.insert(id.clone(), entry).is_some() {
                return Err(SerializationError::new(format!("duplicate terrain id {id}")));
            }
        }

        Ok(Self { entries })
    }
}
