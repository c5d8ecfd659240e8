//! Escape-sequence encoding and decoding for non-printable codepoints.
//!
//! One declarative table drives both directions, so the reader and the
//! emitters cannot drift apart: [`decode_lookup`] is the exact inverse of
//! [`encode_lookup`] over every codepoint the packed formats can address.
//! The module also owns the display names used on `CHAR:` lines and in
//! generated-table comments.

use crate::error::FontError;

/// First and last codepoint emitted literally inside quoted strings.
const PRINTABLE_MIN: u32 = 0x20;
const PRINTABLE_MAX: u32 = 0x7E;

/// Characters with dedicated two-character escapes in quoted lookup
/// strings, consulted by both the encoder and the decoder.
const QUOTED_PAIRS: &[(char, char)] = &[('"', '"'), ('\\', '\\')];

/// Encodes one codepoint for a quoted lookup string.
///
/// A quote becomes `\"`, a backslash `\\`, anything outside the printable
/// range becomes `\xhh` (two lowercase hex digits), and everything else is
/// emitted literally. Codepoints above U+00FF cannot be addressed by the
/// packed formats and are rejected.
pub fn encode_string_char(c: char) -> Result<String, FontError> {
    if let Some((_, escaped)) = QUOTED_PAIRS.iter().find(|(literal, _)| *literal == c) {
        return Ok(format!("\\{}", escaped));
    }
    let code = c as u32;
    if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&code) {
        Ok(c.to_string())
    } else if code <= 0xFF {
        Ok(format!("\\x{:02x}", code))
    } else {
        Err(FontError::UnencodableCodepoint { codepoint: code })
    }
}

/// Encodes a sequence of codepoints as the body of a quoted lookup string.
pub fn encode_lookup(chars: impl IntoIterator<Item = char>) -> Result<String, FontError> {
    let mut out = String::new();
    for c in chars {
        out.push_str(&encode_string_char(c)?);
    }
    Ok(out)
}

/// Decodes the body of a quoted lookup string.
///
/// At each position, in priority order: `\"` decodes to a quote, `\\` to a
/// backslash, `\xHH` to the codepoint HH; any other character (including a
/// backslash starting no recognized escape) is copied literally. A `\x`
/// not followed by two hex digits fails with [`FontError::InvalidEscape`].
pub fn decode_lookup(raw: &str) -> Result<String, FontError> {
    let bytes: Vec<char> = raw.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c == '\\' && i + 1 < bytes.len() {
            let next = bytes[i + 1];
            if let Some((literal, _)) = QUOTED_PAIRS.iter().find(|(_, escaped)| *escaped == next) {
                out.push(*literal);
                i += 2;
                continue;
            }
            if next == 'x' {
                let hex: String = bytes[i + 2..].iter().take(2).collect();
                let code = if hex.len() == 2 {
                    u32::from_str_radix(&hex, 16).ok()
                } else {
                    None
                };
                match code.and_then(char::from_u32) {
                    Some(decoded) => {
                        out.push(decoded);
                        i += 4;
                        continue;
                    }
                    None => {
                        return Err(FontError::InvalidEscape {
                            offset: i,
                            fragment: format!("\\x{}", hex),
                        });
                    }
                }
            }
        }
        out.push(c);
        i += 1;
    }
    Ok(out)
}

/// Encodes one codepoint as a C character literal for map-layout keys.
///
/// Printable characters are quoted directly, with `'` and `\` escaped;
/// newline and tab use their named escapes; everything else non-printable
/// falls back to `'\xhh'`.
pub fn char_literal(c: char) -> Result<String, FontError> {
    let code = c as u32;
    let body = match c {
        '\'' => "\\'".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        _ if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&code) => c.to_string(),
        _ if code <= 0xFF => format!("\\x{:02x}", code),
        _ => return Err(FontError::UnencodableCodepoint { codepoint: code }),
    };
    Ok(format!("'{}'", body))
}

/// The display name used on `CHAR:` lines for one codepoint.
///
/// Space, newline, and tab get their word names; other characters outside
/// the printable range are written as `0xhh`; everything else is the
/// character itself.
pub fn char_name(c: char) -> String {
    match c {
        ' ' => "SPACE".to_string(),
        '\n' => "NEWLINE".to_string(),
        '\t' => "TAB".to_string(),
        _ => {
            let code = c as u32;
            if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&code) {
                c.to_string()
            } else {
                format!("0x{:02x}", code)
            }
        }
    }
}

/// Decodes one `CHAR:` token back to its codepoint.
///
/// Returns `None` for a `0x` token that does not parse as hex, or for any
/// other token that is not exactly one character.
pub fn decode_char_name(token: &str) -> Option<char> {
    match token {
        "SPACE" => Some(' '),
        "NEWLINE" => Some('\n'),
        "TAB" => Some('\t'),
        _ => {
            if let Some(hex) = token.strip_prefix("0x") {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
        }
    }
}

/// The human-readable label attached to a generated table entry.
pub fn comment_label(c: char) -> String {
    match c {
        ' ' => "space".to_string(),
        '\n' => "newline".to_string(),
        '\t' => "tab".to_string(),
        '\\' => "backslash".to_string(),
        '\'' => "single quote".to_string(),
        _ => {
            let code = c as u32;
            if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&code) {
                c.to_string()
            } else {
                format!("0x{:02x}", code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_specials() {
        assert_eq!(encode_string_char('"').unwrap(), "\\\"");
        assert_eq!(encode_string_char('\\').unwrap(), "\\\\");
        assert_eq!(encode_string_char(' ').unwrap(), " ");
        assert_eq!(encode_string_char('\u{e6}').unwrap(), "\\xe6");
        assert_eq!(encode_string_char('\n').unwrap(), "\\x0a");
    }

    #[test]
    fn test_encode_rejects_wide_codepoints() {
        let err = encode_string_char('\u{0394}').unwrap_err();
        assert_eq!(err, FontError::UnencodableCodepoint { codepoint: 0x394 });
    }

    #[test]
    fn test_decode_priorities() {
        assert_eq!(decode_lookup(r#"a\"b"#).unwrap(), "a\"b");
        assert_eq!(decode_lookup(r"a\\b").unwrap(), "a\\b");
        assert_eq!(decode_lookup(r"a\xe6b").unwrap(), "a\u{e6}b");
        // A backslash starting no recognized escape is copied literally.
        assert_eq!(decode_lookup(r"a\nb").unwrap(), "a\\nb");
    }

    #[test]
    fn test_decode_rejects_truncated_hex() {
        let err = decode_lookup(r"ab\xg6").unwrap_err();
        assert_eq!(
            err,
            FontError::InvalidEscape {
                offset: 2,
                fragment: "\\xg6".into()
            }
        );
        assert!(decode_lookup(r"\x5").is_err());
    }

    #[test]
    fn test_escape_round_trip_over_byte_range() {
        for code in 0u32..=0xFF {
            let c = char::from_u32(code).unwrap();
            let encoded = encode_string_char(c).unwrap();
            assert_eq!(decode_lookup(&encoded).unwrap(), c.to_string(), "U+{:04X}", code);
        }
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(char_literal(' ').unwrap(), "' '");
        assert_eq!(char_literal('\'').unwrap(), r"'\''");
        assert_eq!(char_literal('\\').unwrap(), r"'\\'");
        assert_eq!(char_literal('\n').unwrap(), r"'\n'");
        assert_eq!(char_literal('\t').unwrap(), r"'\t'");
        assert_eq!(char_literal('\u{e6}').unwrap(), r"'\xe6'");
        assert_eq!(char_literal('a').unwrap(), "'a'");
    }

    #[test]
    fn test_char_names_round_trip() {
        for c in [' ', '\n', '\t', 'a', 'Z', ',', '\u{e6}', '\u{01}'] {
            assert_eq!(decode_char_name(&char_name(c)), Some(c), "{:?}", c);
        }
    }

    #[test]
    fn test_decode_char_name_rejects_bad_hex() {
        assert_eq!(decode_char_name("0xzz"), None);
        assert_eq!(decode_char_name("ab"), None);
        assert_eq!(decode_char_name("0x41"), Some('A'));
    }

    #[test]
    fn test_comment_labels() {
        assert_eq!(comment_label('a'), "a");
        assert_eq!(comment_label(' '), "space");
        assert_eq!(comment_label('\\'), "backslash");
        assert_eq!(comment_label('\u{e6}'), "0xe6");
    }
}
