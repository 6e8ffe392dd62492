use compact_str::CompactString;

/// Error raised while writing or reading a serialized terrain table.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SerializationError {
    /// Description of the failure.
    pub message: CompactString,
}

impl SerializationError {
    pub(crate) fn new(message: impl Into<CompactString>) -> Self {
        Self { message: message.into() }
    }
}

/// Types with a stable little-endian binary layout.
pub(crate) trait Serializable {
    fn serialize(&self, ser: &mut Serializer) -> Result<(), SerializationError>;

    fn deserialize(deser: &mut Deserializer) -> Result<Self, SerializationError>
    where
        Self: Sized;
}

#[derive(Debug, Default)]
pub(crate) struct Serializer {
    data: Vec<u8>,
}

impl Serializer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub(crate) fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Writes a collection length as a u32; lengths that don't fit are an error.
    pub(crate) fn write_len(&mut self, len: usize) -> Result<(), SerializationError> {
        let len = u32::try_from(len)
            .map_err(|_| SerializationError::new(format!("length {len} exceeds u32")))?;
        self.write_u32(len);
        Ok(())
    }

    /// Writes a u32 length-prefixed UTF-8 string.
    pub(crate) fn write_string(&mut self, value: &str) -> Result<(), SerializationError> {
        self.write_len(value.len())?;
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[derive(Debug)]
pub(crate) struct Deserializer<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Deserializer<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, SerializationError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, SerializationError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SerializationError> {
        let end = self
            .position
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                SerializationError::new(format!(
                    "unexpected end of data: wanted {len} bytes at offset {}, {} available",
                    self.position,
                    self.data.len() - self.position
                ))
            })?;

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    pub(crate) fn read_string(&mut self) -> Result<CompactString, SerializationError> {
        let len = self.read_u32()? as usize;
        let offset = self.position;
        let bytes = self.read_bytes(len)?;

        CompactString::from_utf8(bytes).map_err(|e| {
            SerializationError::new(format!("invalid UTF-8 string at offset {offset}: {e}"))
        })
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}
