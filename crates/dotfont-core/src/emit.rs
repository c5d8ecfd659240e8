//! Serializes a glyph table into a packed artifact.
//!
//! Two layouts share one emission path and one set of escape tables: the
//! legacy index-parallel arrays consumed by older firmware, and the
//! character-keyed map used by the current renderer. The whole artifact is
//! built in memory; callers write it in a single operation, so a failed
//! emission never leaves a partial file behind.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::FontError;
use crate::escape::{char_literal, comment_label, encode_lookup};
use crate::glyph::GlyphTable;

/// The output layout of a packed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Quoted lookup string plus index-parallel `{width, b0..b6}` records.
    Legacy,
    /// One entry per glyph, keyed by character, holding only the
    /// width-length column prefix.
    #[default]
    Map,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Layout::Legacy),
            "map" => Ok(Layout::Map),
            _ => Err(format!("unknown layout: {} (expected legacy or map)", s)),
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Legacy => write!(f, "legacy"),
            Layout::Map => write!(f, "map"),
        }
    }
}

/// Emits the complete packed artifact for `table` in the given layout.
///
/// The table is validated in full before any artifact text is assembled.
pub fn emit(table: &GlyphTable, layout: Layout) -> Result<String, FontError> {
    for glyph in table.glyphs() {
        let code = glyph.codepoint() as u32;
        if code > 0xFF {
            return Err(FontError::UnencodableCodepoint { codepoint: code });
        }
    }
    match layout {
        Layout::Legacy => emit_legacy(table),
        Layout::Map => emit_map(table),
    }
}

/// The comment text for one map-layout entry, with alias annotation.
///
/// Only the map layout carries the `-> canonical` suffix; a legacy table
/// read back from disk has no alias grouping, so annotating legacy
/// comments would change the artifact across a round trip.
fn entry_comment(table: &GlyphTable, codepoint: char) -> String {
    match table.canonical_of(codepoint) {
        Some(canonical) => format!("{} -> {}", comment_label(codepoint), comment_label(canonical)),
        None => comment_label(codepoint),
    }
}

fn emit_legacy(table: &GlyphTable) -> Result<String, FontError> {
    let lookup = encode_lookup(table.glyphs().iter().map(|g| g.codepoint()))?;

    let mut out = String::new();
    out.push_str("/* Generated by dotfont. Do not edit by hand. */\n");
    out.push_str("#ifndef FONT_H\n#define FONT_H\n\n");
    let _ = writeln!(out, "#define FONT_COUNT {}\n", table.len());
    out.push_str("/* One entry per glyph, in table order. */\n");
    let _ = writeln!(out, "char charLookup[] = \"{}\";\n", lookup);
    out.push_str("/* Each record is the glyph width followed by seven column bytes. */\n");
    out.push_str("unsigned char font_variable[FONT_COUNT][8] = {\n");
    for glyph in table.glyphs() {
        let mut record = format!("{}", glyph.width());
        for byte in glyph.columns() {
            let _ = write!(record, ",0x{:02x}", byte);
        }
        let _ = writeln!(
            out,
            "    {{{}}}, /* {} */",
            record,
            comment_label(glyph.codepoint())
        );
    }
    out.push_str("};\n\n#endif /* FONT_H */\n");
    Ok(out)
}

fn emit_map(table: &GlyphTable) -> Result<String, FontError> {
    let mut out = String::new();
    out.push_str("/* Generated by dotfont. Do not edit by hand. */\n");
    out.push_str("#ifndef FONT_GENERATED_HPP\n#define FONT_GENERATED_HPP\n\n");
    out.push_str("#include <unordered_map>\n#include <vector>\n#include <cstdint>\n\n");
    out.push_str("namespace font {\n\n");
    out.push_str("using GlyphData = std::vector<uint8_t>;\n\n");
    out.push_str("const std::unordered_map<char, GlyphData> fontMap = {\n");

    for (i, glyph) in table.glyphs().iter().enumerate() {
        let key = char_literal(glyph.codepoint())?;
        let columns: Vec<String> = glyph
            .visible_columns()
            .iter()
            .map(|b| format!("0x{:02x}", b))
            .collect();
        let comma = if i + 1 < table.len() { "," } else { "" };
        let _ = writeln!(
            out,
            "    {{{}, {{{}}}}}{} // {}",
            key,
            columns.join(", "),
            comma,
            entry_comment(table, glyph.codepoint())
        );
    }

    out.push_str("};\n\n");
    out.push_str("inline const GlyphData* getGlyph(char c) {\n");
    out.push_str("    auto it = fontMap.find(c);\n");
    out.push_str("    if (it != fontMap.end()) {\n");
    out.push_str("        return &it->second;\n");
    out.push_str("    }\n");
    out.push_str("    // Fallback to space character\n");
    out.push_str("    auto fallback = fontMap.find(' ');\n");
    out.push_str("    return (fallback != fontMap.end()) ? &fallback->second : nullptr;\n");
    out.push_str("}\n\n");
    out.push_str("} // namespace font\n\n");
    out.push_str("#endif // FONT_GENERATED_HPP\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Glyph;
    use pretty_assertions::assert_eq;

    fn sample_table() -> GlyphTable {
        let mut table = GlyphTable::new();
        table
            .push(Glyph::new(' ', 1, [0, 0, 0, 0, 0, 0, 0]).unwrap())
            .unwrap();
        table
            .push(Glyph::new('"', 3, [0x07, 0x00, 0x07, 0, 0, 0, 0]).unwrap())
            .unwrap();
        let a = Glyph::new('a', 4, [0x20, 0x54, 0x54, 0x78, 0, 0, 0]).unwrap();
        table.push(a.clone()).unwrap();
        table.push(a.renamed('\u{e6}')).unwrap();
        table.record_alias('\u{e6}', 'a');
        table
    }

    #[test]
    fn test_legacy_layout() {
        let out = emit(&sample_table(), Layout::Legacy).unwrap();
        assert!(out.contains("#define FONT_COUNT 4"));
        assert!(out.contains(r#"char charLookup[] = " \"a\xe6";"#));
        assert!(out.contains("{1,0x00,0x00,0x00,0x00,0x00,0x00,0x00}, /* space */"));
        assert!(out.contains("{3,0x07,0x00,0x07,0x00,0x00,0x00,0x00}, /* \" */"));
        // Legacy comments carry the plain label only; alias annotations
        // live in the map layout.
        assert!(out.contains("{4,0x20,0x54,0x54,0x78,0x00,0x00,0x00}, /* 0xe6 */"));
        assert!(!out.contains("->"));
    }

    #[test]
    fn test_map_layout_emits_width_prefix_only() {
        let out = emit(&sample_table(), Layout::Map).unwrap();
        assert!(out.contains("{' ', {0x00}}, // space"));
        assert!(out.contains("{'\"', {0x07, 0x00, 0x07}}, // \""));
        assert!(out.contains("{'a', {0x20, 0x54, 0x54, 0x78}}, // a"));
        // Alias entry duplicates the columns and names its canonical glyph.
        assert!(out.contains("{'\\xe6', {0x20, 0x54, 0x54, 0x78}} // 0xe6 -> a"));
        assert!(out.contains("inline const GlyphData* getGlyph(char c)"));
    }

    #[test]
    fn test_map_last_entry_has_no_comma() {
        let out = emit(&sample_table(), Layout::Map).unwrap();
        let last = out
            .lines()
            .filter(|l| l.trim_start().starts_with('{'))
            .last()
            .unwrap();
        assert!(!last.trim_end().ends_with("},"));
    }

    #[test]
    fn test_wide_codepoint_fails_before_output() {
        let mut table = GlyphTable::new();
        table
            .push(Glyph::new('\u{0394}', 1, [0x7f, 0, 0, 0, 0, 0, 0]).unwrap())
            .unwrap();
        let err = emit(&table, Layout::Legacy).unwrap_err();
        assert_eq!(err, FontError::UnencodableCodepoint { codepoint: 0x394 });
        let err = emit(&table, Layout::Map).unwrap_err();
        assert_eq!(err.code(), "F010");
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("legacy".parse::<Layout>().unwrap(), Layout::Legacy);
        assert_eq!("map".parse::<Layout>().unwrap(), Layout::Map);
        assert!("json".parse::<Layout>().is_err());
    }
}
