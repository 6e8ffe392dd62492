use std::io::{self, Write};

/// Stylesheet rules for the color tags used by terrain definitions. Each tag
/// `name` is rendered with class `cl_<name>`.
#[rustfmt::skip]
pub const COLOR_CLASSES: [(&str, &str); 33] = [
    ("white",          "color: #ffffff;"),
    ("blue",           "color: #0000ff;"),
    ("red",            "color: #ff0000;"),
    ("brown",          "color: #a52a2a;"),
    ("green",          "color: #008000;"),
    ("cyan",           "color: #00ffff;"),
    ("dark_gray",      "color: #a9a9a9;"),
    ("magenta",        "color: #ff00ff;"),
    ("yellow",         "color: #ffff00;"),
    ("light_blue",     "color: #add8e6;"),
    ("light_green",    "color: #90ee90;"),
    ("light_red",      "color: #ff5555;"),
    ("i_ltred",        "color: black; background: #ff5555;"),
    ("light_gray",     "color: #d3d3d3;"),
    ("i_ltgray",       "color: black; background: #d3d3d3;"),
    ("light_cyan",     "color: #e0ffff;"),
    ("ltgray_yellow",  "color: #d3d3d3; background: #ffff00;"),
    ("pink",           "color: #ffc0cb;"),
    ("yellow_magenta", "color: #ffff00; background: #ff00ff;"),
    ("white_magenta",  "color: #ffffff; background: #ff00ff;"),
    ("i_magenta",      "color: black; background: #ff00ff;"),
    ("pink_magenta",   "color: #ffc0cb; background: #ff00ff;"),
    ("i_green",        "color: black; background: #008000;"),
    ("i_brown",        "color: black; background: #a52a2a;"),
    ("h_yellow",       "color: #ffff00; background: #0000ff;"),
    ("h_dkgray",       "color: #a9a9a9; background: #0000ff;"),
    ("i_ltblue",       "color: black; background: #add8e6;"),
    ("i_blue",         "color: black; background: #0000ff;"),
    ("i_red",          "color: black; background: #ff0000;"),
    ("ltgreen_yellow", "color: #d3d3d3; background: #ffff00;"),
    ("white_white",    "background: white;"),
    ("i_ltcyan",       "color: black; background: #e0ffff;"),
    ("yellow_cyan",    "color: #ffff00; background: #00ffff;"),
];

/// Closes the document opened by the header.
pub const HTML_FOOTER: &str = "</pre></body></html>";

/// Writes the document head and opens the `<pre>` block, followed by a newline.
pub fn write_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "<html><head><style>")?;
    writeln!(out, "body {{ background: black; color: #aaaaaa; }}")?;
    for (name, rule) in COLOR_CLASSES {
        writeln!(out, ".cl_{name} {{ {rule} }}")?;
    }
    writeln!(
        out,
        "</style><meta content='text/html; charset=utf-8' http-equiv='Content-Type' />"
    )?;
    writeln!(out, "</head><body><pre>")
}

/// Closes the `<pre>` block and the document, followed by a newline.
pub fn write_footer(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{HTML_FOOTER}")
}

/// Escapes the characters that would otherwise be read as markup.
pub fn escape_glyph(glyph: &str) -> std::borrow::Cow<'_, str> {
    if glyph.contains(['<', '>']) {
        glyph
            .replace('<', "&#x3c;")
            .replace('>', "&#x3e;")
            .into()
    } else {
        glyph.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_declares_every_color_class() {
        let mut out = Vec::new();
        write_header(&mut out).unwrap();
        let header = String::from_utf8(out).unwrap();

        assert!(header.starts_with("<html><head><style>\n"));
        assert!(header.ends_with("<body><pre>\n"));
        assert!(header.contains("charset=utf-8"));
        assert!(header.contains(".cl_white { color: #ffffff; }"));
        assert!(header.contains(".cl_white_white { background: white; }"));
        assert_eq!(header.matches(".cl_").count(), 33);
    }

    #[test]
    fn footer_closes_document() {
        let mut out = Vec::new();
        write_footer(&mut out).unwrap();
        assert_eq!(out, b"</pre></body></html>\n");
    }

    #[test]
    fn escapes_angle_brackets_only() {
        assert_eq!(escape_glyph("<"), "&#x3c;");
        assert_eq!(escape_glyph(">"), "&#x3e;");
        assert_eq!(escape_glyph("&"), "&");
        assert_eq!(escape_glyph("│"), "│");
    }
}
