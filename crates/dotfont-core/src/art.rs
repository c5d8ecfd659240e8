//! The human-editable art format: parser and renderer.
//!
//! An art file is a sequence of blocks separated by blank lines. Each
//! block names one or more characters, declares a width, and draws the
//! glyph as exactly eight rows of `#` (lit) and `.` (unlit):
//!
//! ```text
//! CHAR: A
//! WIDTH: 5
//! ........
//! .###....
//! #...#...
//! #...#...
//! #####...
//! #...#...
//! #...#...
//! ........
//! ```
//!
//! The first name on a `CHAR:` line is canonical; any further names are
//! aliases sharing the same bitmap.

use std::str::FromStr;

use crate::error::FontError;
use crate::escape;
use crate::glyph::{Glyph, GlyphTable, MAX_WIDTH, ROWS};
use crate::packer::{pack, unpack, ArtGrid};

/// The art character for a lit pixel.
pub const LIT: char = '#';

/// The conventional art character for an unlit pixel.
pub const UNLIT: char = '.';

/// How a block's width is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthMode {
    /// Use the declared `WIDTH:` value as-is.
    Explicit,
    /// Scan the art for the rightmost lit column; the declared value is
    /// ignored and overwritten.
    Dynamic,
}

impl FromStr for WidthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(WidthMode::Explicit),
            "dynamic" => Ok(WidthMode::Dynamic),
            _ => Err(format!("unknown width mode: {} (expected explicit or dynamic)", s)),
        }
    }
}

impl std::fmt::Display for WidthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthMode::Explicit => write!(f, "explicit"),
            WidthMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Parses an art file into a glyph table.
///
/// Blocks are processed in file order; the resulting table preserves that
/// order, with alias entries directly after their canonical glyph.
pub fn parse(input: &str, mode: WidthMode) -> Result<GlyphTable, FontError> {
    let mut table = GlyphTable::new();
    for (index, block) in blocks(input).into_iter().enumerate() {
        parse_block(&block, index + 1, mode, &mut table)?;
    }
    Ok(table)
}

/// Splits input into non-empty line groups separated by blank lines.
fn blocks(input: &str) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in input.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn parse_block(
    lines: &[String],
    block: usize,
    mode: WidthMode,
    table: &mut GlyphTable,
) -> Result<(), FontError> {
    let mut iter = lines.iter();

    let char_line = iter.next().and_then(|l| l.strip_prefix("CHAR:")).ok_or_else(|| {
        FontError::MalformedBlock {
            block,
            detail: "expected a CHAR: line".into(),
        }
    })?;
    let names = parse_names(char_line.trim(), block)?;

    let width_line = iter.next().and_then(|l| l.strip_prefix("WIDTH:")).ok_or_else(|| {
        FontError::MalformedBlock {
            block,
            detail: "expected a WIDTH: line".into(),
        }
    })?;
    let declared: usize =
        width_line
            .trim()
            .parse()
            .map_err(|_| FontError::MalformedBlock {
                block,
                detail: format!("WIDTH: value '{}' is not an integer", width_line.trim()),
            })?;

    let rows: Vec<&String> = iter.collect();
    if rows.len() != ROWS {
        return Err(FontError::MalformedBlock {
            block,
            detail: format!("expected {} art rows, found {}", ROWS, rows.len()),
        });
    }

    let canonical = names[0];
    let (grid, rightmost) = scan_rows(&rows);

    let width = match mode {
        WidthMode::Dynamic => rightmost.map_or(1, |m| m + 1),
        WidthMode::Explicit => {
            if let Some(m) = rightmost {
                if m >= MAX_WIDTH {
                    return Err(FontError::ColumnOverflow {
                        codepoint: canonical as u32,
                        index: m,
                    });
                }
            }
            declared
        }
    };
    if !(1..=MAX_WIDTH).contains(&width) {
        return Err(FontError::InvalidWidth {
            codepoint: canonical as u32,
            width,
        });
    }

    // Pack the full grid; glyph construction verifies that nothing is lit
    // at or beyond the resolved width.
    let columns = pack(&grid, MAX_WIDTH);
    let glyph = Glyph::new(canonical, width as u8, columns)?;
    table.push(glyph.clone())?;
    for &alias in &names[1..] {
        table.push(glyph.renamed(alias))?;
        table.record_alias(alias, canonical);
    }
    Ok(())
}

/// Decodes the comma-separated name list of a `CHAR:` line.
///
/// A payload that is just `,` names the comma glyph itself rather than an
/// empty list.
fn parse_names(payload: &str, block: usize) -> Result<Vec<char>, FontError> {
    if payload == "," {
        return Ok(vec![',']);
    }
    let mut names = Vec::new();
    for token in payload.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let c = escape::decode_char_name(token).ok_or_else(|| {
            FontError::InvalidCodepointLiteral {
                block,
                token: token.to_string(),
            }
        })?;
        names.push(c);
    }
    if names.is_empty() {
        return Err(FontError::MissingCharacter { block });
    }
    Ok(names)
}

/// Fills the pixel grid and finds the rightmost lit column, if any.
///
/// Lit pixels beyond column 6 are reported through `rightmost` but not
/// stored; the caller turns them into width or overflow errors.
fn scan_rows(rows: &[&String]) -> (ArtGrid, Option<usize>) {
    let mut grid = [[false; MAX_WIDTH]; ROWS];
    let mut rightmost = None;
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            if ch == LIT {
                rightmost = Some(rightmost.map_or(c, |m: usize| m.max(c)));
                if c < MAX_WIDTH {
                    grid[r][c] = true;
                }
            }
        }
    }
    (grid, rightmost)
}

/// Renders a glyph table back into art blocks.
///
/// Alias entries are folded onto their canonical glyph's `CHAR:` line, so
/// rendering is the inverse of [`parse`]. Every row is padded with `.` to
/// eight columns, matching the editable convention.
pub fn render(table: &GlyphTable) -> String {
    let mut out = String::new();
    for glyph in table.glyphs() {
        if table.canonical_of(glyph.codepoint()).is_some() {
            continue;
        }
        let mut names = vec![escape::char_name(glyph.codepoint())];
        for alias in table.aliases_of(glyph.codepoint()) {
            names.push(escape::char_name(alias));
        }
        out.push_str(&format!("CHAR: {}\n", names.join(",")));
        out.push_str(&format!("WIDTH: {}\n", glyph.width()));

        let rows = unpack(glyph.columns(), glyph.width() as usize);
        for row in rows.iter() {
            for &lit in row.iter() {
                out.push(if lit { LIT } else { UNLIT });
            }
            // Pad the seven-column grid to the conventional eight.
            out.push(UNLIT);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BLOCK_A: &str = "\
CHAR: A
WIDTH: 4
........
.###....
#...#...
#...#...
#####...
#...#...
#...#...
........
";

    #[test]
    fn test_parse_single_block_dynamic() {
        let table = parse(BLOCK_A, WidthMode::Dynamic).unwrap();
        assert_eq!(table.len(), 1);
        let glyph = table.get('A').unwrap();
        // Dynamic width comes from the art, not the declared 4.
        assert_eq!(glyph.width(), 5);
        assert_eq!(glyph.visible_columns(), &[0x7c, 0x12, 0x12, 0x12, 0x7c]);
    }

    #[test]
    fn test_parse_explicit_uses_declared_width() {
        let art = "\
CHAR: -
WIDTH: 6
........
........
........
####....
........
........
........
........
";
        let table = parse(art, WidthMode::Explicit).unwrap();
        assert_eq!(table.get('-').unwrap().width(), 6);

        let table = parse(art, WidthMode::Dynamic).unwrap();
        assert_eq!(table.get('-').unwrap().width(), 4);
    }

    #[test]
    fn test_explicit_overflow_is_rejected() {
        let art = "\
CHAR: .
WIDTH: 2
........
........
........
........
........
........
.....##.
........
";
        let err = parse(art, WidthMode::Explicit).unwrap_err();
        assert_eq!(
            err,
            FontError::ColumnOverflow {
                codepoint: '.' as u32,
                index: 5
            }
        );
    }

    #[test]
    fn test_blank_block_has_width_one() {
        let art = "CHAR: SPACE\nWIDTH: 3\n........\n........\n........\n........\n........\n........\n........\n........\n";
        let table = parse(art, WidthMode::Dynamic).unwrap();
        let glyph = table.get(' ').unwrap();
        assert_eq!(glyph.width(), 1);
        assert_eq!(glyph.visible_columns(), &[0]);
    }

    #[test]
    fn test_seven_rows_is_malformed() {
        let art = "CHAR: A\nWIDTH: 4\n........\n........\n........\n........\n........\n........\n........\n";
        let err = parse(art, WidthMode::Dynamic).unwrap_err();
        assert_eq!(
            err,
            FontError::MalformedBlock {
                block: 1,
                detail: "expected 8 art rows, found 7".into()
            }
        );
    }

    #[test]
    fn test_missing_width_line_is_malformed() {
        let art = "CHAR: A\n........\n........\n........\n........\n........\n........\n........\n........\n";
        let err = parse(art, WidthMode::Dynamic).unwrap_err();
        assert_eq!(err.code(), "F001");
    }

    #[test]
    fn test_aliases_share_one_bitmap() {
        let art = "\
CHAR: a,SPACE
WIDTH: 4
........
........
.##.....
...#....
.###....
#..#....
.###....
........
";
        let table = parse(art, WidthMode::Dynamic).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.canonical_of(' '), Some('a'));
        assert_eq!(
            table.get(' ').unwrap().visible_columns(),
            table.get('a').unwrap().visible_columns()
        );
    }

    #[test]
    fn test_comma_names_itself() {
        let art = "\
CHAR: ,
WIDTH: 2
........
........
........
........
........
........
#.......
##......
";
        let table = parse(art, WidthMode::Dynamic).unwrap();
        assert!(table.get(',').is_some());
    }

    #[test]
    fn test_hex_names_and_bad_hex() {
        let art = "\
CHAR: 0xe6
WIDTH: 3
........
........
###.....
........
###.....
........
........
........
";
        let table = parse(art, WidthMode::Dynamic).unwrap();
        assert!(table.get('\u{e6}').is_some());

        let bad = art.replace("0xe6", "0xzz");
        let err = parse(&bad, WidthMode::Dynamic).unwrap_err();
        assert_eq!(
            err,
            FontError::InvalidCodepointLiteral {
                block: 1,
                token: "0xzz".into()
            }
        );
    }

    #[test]
    fn test_no_names_is_missing_character() {
        let art = "CHAR:\nWIDTH: 1\n........\n........\n........\n........\n........\n........\n........\n........\n";
        let err = parse(art, WidthMode::Dynamic).unwrap_err();
        assert_eq!(err, FontError::MissingCharacter { block: 1 });
    }

    #[test]
    fn test_wide_art_is_rejected_dynamically() {
        let art = "\
CHAR: W
WIDTH: 7
........
........
........
.......#
........
........
........
........
";
        let err = parse(art, WidthMode::Dynamic).unwrap_err();
        assert_eq!(
            err,
            FontError::InvalidWidth {
                codepoint: 'W' as u32,
                width: 8
            }
        );
    }

    #[test]
    fn test_render_is_inverse_of_parse() {
        let art = "\
CHAR: A
WIDTH: 5
........
.###....
#...#...
#...#...
#####...
#...#...
#...#...
........

CHAR: a,0xe6
WIDTH: 4
........
........
.##.....
...#....
.###....
#..#....
.###....
........

CHAR: SPACE
WIDTH: 1
........
........
........
........
........
........
........
........

";
        let table = parse(art, WidthMode::Explicit).unwrap();
        let rendered = render(&table);
        assert_eq!(rendered, art);

        // A second pass is byte-stable.
        let table2 = parse(&rendered, WidthMode::Explicit).unwrap();
        assert_eq!(render(&table2), rendered);
    }

    #[test]
    fn test_multiple_blocks_index_errors() {
        let art = "\
CHAR: A
WIDTH: 4
........
........
........
........
........
........
........
........

CHAR: B
WIDTH: 4
........
";
        let err = parse(art, WidthMode::Dynamic).unwrap_err();
        assert_eq!(
            err,
            FontError::MalformedBlock {
                block: 2,
                detail: "expected 8 art rows, found 1".into()
            }
        );
    }
}
