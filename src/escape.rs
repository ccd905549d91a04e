//! JSON string escaping and unescaping.
//!
//! Pure functions shared by the lexer and the writer. Escaping produces the
//! body of a string literal (without the surrounding quotes); unescaping does
//! the reverse, rejecting invalid escapes and unpaired surrogates.

use std::fmt;

use crate::error::{Error, Position, Result};

/// Escape `s` into a JSON string literal body.
///
/// Non-ASCII characters are passed through unchanged.
///
/// ```
/// use json_variant::escape::escape;
///
/// assert_eq!(escape("a\"b\n"), r#"a\"b\n"#);
/// ```
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    // Writing into a String cannot fail.
    let _ = write_escaped(&mut out, s, false);
    out
}

/// Escape `s`, writing every character above U+007F as `\uXXXX`.
pub fn escape_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    let _ = write_escaped(&mut out, s, true);
    out
}

/// Write the escaped form of `s` to `out`.
///
/// `"` and `\` and the control characters U+0000..=U+001F are always
/// escaped, using the short forms `\b \f \n \r \t` where one exists. With
/// `escape_non_ascii`, characters above U+007F are written as `\uXXXX`,
/// using a surrogate pair outside the Basic Multilingual Plane.
pub fn write_escaped<W: fmt::Write>(
    out: &mut W,
    s: &str,
    escape_non_ascii: bool,
) -> fmt::Result {
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        let short = match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\x08' => Some("\\b"),
            '\x0C' => Some("\\f"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            c if c < '\x20' => None,
            c if escape_non_ascii && !c.is_ascii() => None,
            _ => continue,
        };

        out.write_str(&s[start..i])?;
        start = i + ch.len_utf8();

        match short {
            Some(seq) => out.write_str(seq)?,
            None => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(out, "\\u{:04x}", unit)?;
                }
            }
        }
    }
    out.write_str(&s[start..])
}

/// Unescape the body of a JSON string literal.
///
/// The input must not include the surrounding quotes. Raw control characters
/// and unescaped `"` are rejected as they would be inside a literal. Error
/// positions are relative to `body`.
pub fn unescape(body: &str) -> Result<String> {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut pos = 0;
    let mut run_start = 0;

    while let Some(&b) = bytes.get(pos) {
        match b {
            b'\\' => {
                out.push_str(&body[run_start..pos]);
                let escape_start = pos;
                pos += 1;
                let ch = decode_escape(bytes, &mut pos)
                    .map_err(|msg| Error::syntax(msg, Position::locate(bytes, escape_start)))?;
                out.push(ch);
                run_start = pos;
            }
            b'"' => {
                return Err(Error::syntax(
                    "unescaped quote in string",
                    Position::locate(bytes, pos),
                ))
            }
            b if b < 0x20 => {
                return Err(Error::syntax(
                    "control character in string",
                    Position::locate(bytes, pos),
                ))
            }
            _ => pos += 1,
        }
    }
    out.push_str(&body[run_start..]);
    Ok(out)
}

/// Decode one escape sequence; `pos` points just past the backslash.
///
/// On success `pos` is left just past the sequence. On failure the returned
/// message describes the problem.
pub(crate) fn decode_escape(input: &[u8], pos: &mut usize) -> std::result::Result<char, &'static str> {
    let b = *input.get(*pos).ok_or("unterminated escape sequence")?;
    *pos += 1;
    match b {
        b'"' => Ok('"'),
        b'\\' => Ok('\\'),
        b'/' => Ok('/'),
        b'b' => Ok('\x08'),
        b'f' => Ok('\x0C'),
        b'n' => Ok('\n'),
        b'r' => Ok('\r'),
        b't' => Ok('\t'),
        b'u' => decode_unicode_escape(input, pos),
        _ => Err("invalid escape sequence"),
    }
}

/// Decode `XXXX` after `\u`, consuming a following low surrogate if needed.
fn decode_unicode_escape(input: &[u8], pos: &mut usize) -> std::result::Result<char, &'static str> {
    let unit = read_hex4(input, pos)?;

    if (0xD800..=0xDBFF).contains(&unit) {
        if input.get(*pos) != Some(&b'\\') || input.get(*pos + 1) != Some(&b'u') {
            return Err("unpaired high surrogate");
        }
        *pos += 2;
        let low = read_hex4(input, pos)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err("high surrogate not followed by a low surrogate");
        }
        let combined = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
        return char::from_u32(combined).ok_or("invalid unicode escape");
    }

    if (0xDC00..=0xDFFF).contains(&unit) {
        return Err("unpaired low surrogate");
    }

    char::from_u32(u32::from(unit)).ok_or("invalid unicode escape")
}

fn read_hex4(input: &[u8], pos: &mut usize) -> std::result::Result<u16, &'static str> {
    let mut value: u16 = 0;
    for _ in 0..4 {
        let b = *input.get(*pos).ok_or("unterminated unicode escape")?;
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return Err("invalid hex digit in unicode escape"),
        };
        value = (value << 4) | u16::from(digit);
        *pos += 1;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_short_forms() {
        assert_eq!(escape("\"\\\x08\x0C\n\r\t"), r#"\"\\\b\f\n\r\t"#);
    }

    #[test]
    fn test_escape_other_controls() {
        assert_eq!(escape("\x00\x1f"), "\\u0000\\u001f");
    }

    #[test]
    fn test_escape_leaves_solidus_and_unicode() {
        assert_eq!(escape("a/b é 😀"), "a/b é 😀");
    }

    #[test]
    fn test_escape_ascii_uses_surrogate_pairs() {
        assert_eq!(escape_ascii("é"), "\\u00e9");
        assert_eq!(escape_ascii("😀"), "\\ud83d\\ude00");
        assert_eq!(escape_ascii("plain"), "plain");
    }

    #[test]
    fn test_unescape_all_forms() {
        assert_eq!(
            unescape(r#"\"\\\/\b\f\n\r\t"#).unwrap(),
            "\"\\/\x08\x0C\n\r\t"
        );
        assert_eq!(unescape(r"\u0041\u00e9").unwrap(), "Aé");
    }

    #[test]
    fn test_unescape_surrogate_pair() {
        assert_eq!(unescape(r"\ud83d\ude00").unwrap(), "😀");
        assert_eq!(unescape(r"\uD83D\uDE00").unwrap(), "😀");
    }

    #[test]
    fn test_unescape_rejects_unpaired_surrogates() {
        assert!(unescape(r"\ud800").is_err());
        assert!(unescape(r"\udc00").is_err());
        assert!(unescape(r"\ud800A").is_err());
        assert!(unescape(r"\ud800\u0041").is_err());
        assert!(unescape(r"\ud800x").is_err());
    }

    #[test]
    fn test_unescape_rejects_bad_escapes() {
        assert!(unescape(r"\x").is_err());
        assert!(unescape(r"\u12").is_err());
        assert!(unescape(r"\u12G4").is_err());
        assert!(unescape("\\").is_err());
    }

    #[test]
    fn test_unescape_reports_position() {
        let err = unescape(r"ab\q").unwrap_err();
        assert_eq!(err.position().map(|p| p.offset), Some(2));
    }

    #[test]
    fn test_unescape_rejects_raw_controls_and_quotes() {
        assert!(unescape("a\nb").is_err());
        assert!(unescape("a\"b").is_err());
    }

    #[test]
    fn test_escape_then_unescape() {
        let text = "line\nbreak \"quoted\" back\\slash \u{1} é 😀";
        assert_eq!(unescape(&escape(text)).unwrap(), text);
        assert_eq!(unescape(&escape_ascii(text)).unwrap(), text);
    }
}
