use compact_str::{CompactString, ToCompactString};

/// Placeholder glyph for anything that cannot be decoded or resolved.
pub const UNKNOWN_GLYPH: &str = "?";

/// Codes above the 8-bit range are curses `ACS_*` line-drawing constants;
/// each maps to the box-drawing junction of the same shape.
#[rustfmt::skip]
pub const LINE_GLYPHS: [(i64, &str); 11] = [
    (4194424, "\u{2502}"), // │
    (4194417, "\u{2500}"), // ─
    (4194413, "\u{2514}"), // └
    (4194412, "\u{250C}"), // ┌
    (4194411, "\u{2510}"), // ┐
    (4194410, "\u{2518}"), // ┘
    (4194420, "\u{251C}"), // ├
    (4194422, "\u{2534}"), // ┴
    (4194421, "\u{2524}"), // ┤
    (4194423, "\u{252C}"), // ┬
    (4194414, "\u{253C}"), // ┼
];

/// Symbol specification of a terrain definition.
///
/// Terrain data files carry either one code for every orientation or a list
/// of codes, one per cardinal orientation (north, east, south, west).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSpec {
    /// A single code used regardless of orientation.
    Single(i64),
    /// One code per orientation, in north, east, south, west order.
    Multi(Vec<i64>),
}

impl SymbolSpec {
    /// Decodes every code into its display glyph, in orientation order.
    ///
    /// An empty `Multi` list yields an empty vector; callers treat that as
    /// "no glyph information".
    pub fn decode(&self) -> Vec<CompactString> {
        match self {
            SymbolSpec::Single(code) => vec![decode_symbol(*code)],
            SymbolSpec::Multi(codes) => codes.iter().copied().map(decode_symbol).collect(),
        }
    }
}

/// Decodes a numeric symbol code into a display glyph.
///
/// Codes `0..=255` are the character with that code point. Larger codes are
/// looked up in [`LINE_GLYPHS`]; anything else decodes to [`UNKNOWN_GLYPH`]
/// and logs a warning.
pub fn decode_symbol(code: i64) -> CompactString {
    if let Ok(byte) = u8::try_from(code) {
        return char::from(byte).to_compact_string();
    }

    match LINE_GLYPHS.iter().find(|(line, _)| *line == code) {
        Some((_, glyph)) => CompactString::const_new(*glyph),
        None => {
            tracing::warn!(code, "no line glyph found for symbol code");
            CompactString::const_new(UNKNOWN_GLYPH)
        },
    }
}
