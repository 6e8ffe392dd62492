use overmap_data::{TerrainTable, UNKNOWN_GLYPH};
use tracing::warn;

/// Glyphs for road shapes, keyed by the directions the road connects.
#[rustfmt::skip]
pub const ROAD_GLYPHS: [(&str, &str); 15] = [
    ("north", "│"),
    ("south", "│"),
    ("west",  "─"),
    ("east",  "─"),
    ("nesw",  "┼"),
    ("esw",   "┬"),
    ("nsw",   "┤"),
    ("new",   "┴"),
    ("nes",   "├"),
    ("ns",    "│"),
    ("ew",    "─"),
    ("wn",    "┘"),
    ("ne",    "└"),
    ("sw",    "┐"),
    ("es",    "┌"),
];

/// Orientation suffixes. Position modulo 4 is the glyph index, so the
/// two-letter aliases share the slots of the four cardinal directions.
pub const ORIENTATIONS: [&str; 8] = ["north", "east", "south", "west", "ns", "ew", "sn", "we"];

/// Color tag and glyph to render for a terrain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    /// Color tag; empty when the terrain is drawn uncolored.
    pub color: &'a str,
    /// Glyph drawn for one tile.
    pub glyph: &'a str,
}

impl Symbol<'static> {
    /// Placeholder for identifiers that resolve to nothing.
    pub const UNKNOWN: Self = Self { color: "", glyph: UNKNOWN_GLYPH };
}

/// Resolves a raw overmap terrain identifier to its color and glyph.
///
/// Identifiers present in the table resolve directly to their primary glyph.
/// Otherwise the identifier is split at its last underscore: `road_<shape>`
/// resolves through [`ROAD_GLYPHS`] without a color, and `<base>_<orientation>`
/// picks the orientation glyph of `base`. Anything that cannot be resolved
/// logs a warning and yields [`Symbol::UNKNOWN`].
pub fn resolve<'a>(table: &'a TerrainTable, id: &str) -> Symbol<'a> {
    if let Some(entry) = table.get(id) {
        return Symbol { color: entry.color(), glyph: entry.primary_glyph() };
    }

    let Some((base, suffix)) = id
        .rsplit_once('_')
        .filter(|(base, _)| !base.is_empty())
    else {
        warn!(id, "couldn't split terrain id");
        return Symbol::UNKNOWN;
    };

    if base == "road" {
        return match road_glyph(suffix) {
            Some(glyph) => Symbol { color: "", glyph },
            None => {
                warn!(id, suffix, "no road glyph for suffix");
                Symbol::UNKNOWN
            },
        };
    }

    match table.get(base) {
        Some(entry) => Symbol {
            color: entry.color(),
            glyph: entry.glyph(orientation_index(suffix)),
        },
        None => {
            warn!(id, base, suffix, "terrain not found");
            Symbol::UNKNOWN
        },
    }
}

/// Glyph index for an orientation suffix; unknown suffixes map to 0.
pub fn orientation_index(suffix: &str) -> usize {
    ORIENTATIONS
        .iter()
        .position(|&orientation| orientation == suffix)
        .unwrap_or(0)
        % 4
}

fn road_glyph(suffix: &str) -> Option<&'static str> {
    ROAD_GLYPHS
        .iter()
        .find(|(shape, _)| *shape == suffix)
        .map(|(_, glyph)| *glyph)
}

#[cfg(test)]
mod tests {
    use compact_str::ToCompactString;
    use overmap_data::{TerrainEntry, TerrainTableBuilder};

    use super::*;

    fn table() -> TerrainTable {
        let mut builder = TerrainTableBuilder::new();
        let mut add = |id: &str, symbols: &[&str], color: &str| {
            let glyphs = symbols.iter().map(|s| s.to_compact_string()).collect();
            builder.insert(id, TerrainEntry::new(glyphs, color).unwrap());
        };

        add("field", &["."], "brown");
        add("house", &["^", ">", "v", "<"], "light_green");
        add("bridge", &["│", "─"], "white");
        add("hospital_north", &["H"], "light_red");
        add("road", &["#"], "dark_gray");
        add("lab_stairs", &["L"], "");
        builder.build()
    }

    #[test]
    fn direct_hit_uses_primary_glyph() {
        let table = table();

        assert_eq!(resolve(&table, "field"), Symbol { color: "brown", glyph: "." });
        assert_eq!(resolve(&table, "house"), Symbol { color: "light_green", glyph: "^" });
    }

    #[test]
    fn direct_hit_ignores_suffix_heuristics() {
        let table = table();

        // would be house-like orientation lookup if it weren't a key itself
        assert_eq!(
            resolve(&table, "hospital_north"),
            Symbol { color: "light_red", glyph: "H" }
        );
        assert_eq!(resolve(&table, "lab_stairs"), Symbol { color: "", glyph: "L" });
    }

    #[test]
    fn cardinal_suffixes_select_orientation_glyph() {
        let table = table();

        ["north", "east", "south", "west"]
            .iter()
            .zip(["^", ">", "v", "<"])
            .for_each(|(suffix, glyph)| {
                let symbol = resolve(&table, &format!("house_{suffix}"));
                assert_eq!(symbol, Symbol { color: "light_green", glyph }, "suffix {suffix}");
            });
    }

    #[test]
    fn two_letter_suffixes_fold_onto_cardinal_slots() {
        assert_eq!(orientation_index("ns"), 0);
        assert_eq!(orientation_index("ew"), 1);
        assert_eq!(orientation_index("sn"), 2);
        assert_eq!(orientation_index("we"), 3);

        let table = table();
        assert_eq!(resolve(&table, "house_ns").glyph, "^");
        assert_eq!(resolve(&table, "house_ew").glyph, ">");
        assert_eq!(resolve(&table, "house_sn").glyph, "v");
        assert_eq!(resolve(&table, "house_we").glyph, "<");
    }

    #[test]
    fn missing_orientation_glyph_falls_back_to_primary() {
        let table = table();

        assert_eq!(resolve(&table, "bridge_north").glyph, "│");
        assert_eq!(resolve(&table, "bridge_east").glyph, "─");
        assert_eq!(resolve(&table, "bridge_south").glyph, "│");
        assert_eq!(resolve(&table, "bridge_we").glyph, "│");
        assert_eq!(resolve(&table, "field_west"), Symbol { color: "brown", glyph: "." });
    }

    #[test]
    fn unknown_suffix_uses_orientation_zero() {
        let table = table();

        assert_eq!(orientation_index("upper"), 0);
        assert_eq!(resolve(&table, "house_upper"), Symbol { color: "light_green", glyph: "^" });
    }

    #[test]
    fn splits_at_last_underscore() {
        let mut builder = TerrainTableBuilder::new();
        let glyphs = vec!["S".to_compact_string(), "s".to_compact_string()];
        builder.insert("s_gas", TerrainEntry::new(glyphs, "light_blue").unwrap());
        let table = builder.build();

        assert_eq!(resolve(&table, "s_gas_east"), Symbol { color: "light_blue", glyph: "s" });
    }

    #[test]
    fn road_shapes_never_consult_the_table() {
        let table = table();

        ROAD_GLYPHS.iter().for_each(|&(shape, glyph)| {
            let symbol = resolve(&table, &format!("road_{shape}"));
            assert_eq!(symbol, Symbol { color: "", glyph }, "shape {shape}");
        });

        assert_eq!(resolve(&table, "road_nesw").glyph, "┼");
        assert_eq!(resolve(&table, "road_wn").glyph, "┘");
    }

    #[test]
    fn unknown_road_shape_is_placeholder() {
        assert_eq!(resolve(&table(), "road_diagonal"), Symbol::UNKNOWN);
    }

    #[test]
    fn unresolvable_identifiers_are_placeholder() {
        let table = table();

        assert_eq!(resolve(&table, "mall"), Symbol::UNKNOWN);
        assert_eq!(resolve(&table, "_north"), Symbol::UNKNOWN);
        assert_eq!(resolve(&table, "mall_north"), Symbol::UNKNOWN);
        assert_eq!(resolve(&table, ""), Symbol::UNKNOWN);
        assert_eq!(Symbol::UNKNOWN, Symbol { color: "", glyph: "?" });
    }
}
