//! Reader for existing packed tables in C source form.
//!
//! The legacy artifact pairs a quoted character-lookup string with a
//! parallel array of fixed 8-byte records, `{width, b0..b6}`. Matching is
//! positional: the i-th decoded lookup character owns the i-th record.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{FontError, Warning};
use crate::escape::decode_lookup;
use crate::glyph::{Glyph, GlyphTable, MAX_WIDTH};

/// How a lookup-string/record-count disagreement is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountPolicy {
    /// Fail with [`FontError::CountMismatch`].
    #[default]
    Strict,
    /// Truncate to the shorter length and report a warning.
    Lenient,
}

/// A quoted C string initializer: `char <name>[] = "...";`
const LOOKUP_PATTERN: &str = r#"char\s+\w+\s*\[\s*\]\s*=\s*"((?:[^"\\]|\\.)*)""#;

/// A two-dimensional byte array initializer holding the records.
const TABLE_PATTERN: &str = r"(?s)\w+\s*\[[^\]]*\]\s*\[[^\]]*\]\s*=\s*\{(.*?)\};";

/// One `{width, b0..b6}` record inside the array body.
const RECORD_PATTERN: &str = r"\{([^{}]*)\}";

static LOOKUP_RE: OnceLock<Regex> = OnceLock::new();
static TABLE_RE: OnceLock<Regex> = OnceLock::new();
static RECORD_RE: OnceLock<Regex> = OnceLock::new();

fn lookup_re() -> &'static Regex {
    LOOKUP_RE.get_or_init(|| Regex::new(LOOKUP_PATTERN).expect("invalid regex pattern"))
}

fn table_re() -> &'static Regex {
    TABLE_RE.get_or_init(|| Regex::new(TABLE_PATTERN).expect("invalid regex pattern"))
}

fn record_re() -> &'static Regex {
    RECORD_RE.get_or_init(|| Regex::new(RECORD_PATTERN).expect("invalid regex pattern"))
}

/// Parses a packed table source into a glyph table.
///
/// Under [`CountPolicy::Strict`] a lookup/record count disagreement is a
/// hard error; under [`CountPolicy::Lenient`] the table is truncated to
/// the shorter length and the disagreement is reported as a warning.
pub fn read_table(
    source: &str,
    policy: CountPolicy,
) -> Result<(GlyphTable, Vec<Warning>), FontError> {
    let lookup_raw = lookup_re()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| FontError::MalformedSource {
            detail: "no quoted character lookup string found".into(),
        })?
        .as_str();
    let lookup: Vec<char> = decode_lookup(lookup_raw)?.chars().collect();

    let body = table_re()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| FontError::MalformedSource {
            detail: "no packed record array found".into(),
        })?
        .as_str();

    let mut records = Vec::new();
    for (index, caps) in record_re().captures_iter(body).enumerate() {
        records.push(parse_record(caps[1].trim(), index)?);
    }

    let mut warnings = Vec::new();
    let count = if lookup.len() == records.len() {
        lookup.len()
    } else {
        match policy {
            CountPolicy::Strict => {
                return Err(FontError::CountMismatch {
                    lookup: lookup.len(),
                    records: records.len(),
                });
            }
            CountPolicy::Lenient => {
                let count = lookup.len().min(records.len());
                warnings.push(Warning::new(
                    "FW01",
                    format!(
                        "lookup string has {} entries but table has {} records; truncated to {}",
                        lookup.len(),
                        records.len(),
                        count
                    ),
                ));
                count
            }
        }
    };

    let mut table = GlyphTable::new();
    for (&codepoint, &(width, columns)) in lookup.iter().zip(records.iter()).take(count) {
        table.push(Glyph::new(codepoint, width, columns)?)?;
    }
    Ok((table, warnings))
}

/// Parses one record body (the text between braces) into width + columns.
fn parse_record(body: &str, index: usize) -> Result<(u8, [u8; MAX_WIDTH]), FontError> {
    let mut values = Vec::new();
    for token in body.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
            u32::from_str_radix(hex, 16).ok()
        } else {
            token.parse::<u32>().ok()
        }
        .ok_or_else(|| FontError::CorruptRecord {
            index,
            detail: format!("'{}' is not a byte value", token),
        })?;
        if value > 0xFF {
            return Err(FontError::CorruptRecord {
                index,
                detail: format!("byte value {} out of range", value),
            });
        }
        values.push(value as u8);
    }

    if values.len() != 1 + MAX_WIDTH {
        return Err(FontError::CorruptRecord {
            index,
            detail: format!("expected 8 bytes, found {}", values.len()),
        });
    }
    let width = values[0];
    if !(1..=MAX_WIDTH as u8).contains(&width) {
        return Err(FontError::CorruptRecord {
            index,
            detail: format!("width byte {} outside 1..=7", width),
        });
    }
    let mut columns = [0u8; MAX_WIDTH];
    columns.copy_from_slice(&values[1..]);
    Ok((width, columns))
}
