//! Go string literal quoting
//!
//! Import paths are stored exactly as written in the manifest, so sorting
//! happens on the quoted form and only extraction needs to decode them.

use crate::errors::ManifestError;

/// Quote a plain path as a Go interpreted string literal
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() && (c as u32) <= 0xFFFF => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\U{:08x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode an interpreted (`"..."`) or raw (`` `...` ``) Go string literal
pub fn unquote(literal: &str) -> Result<String, ManifestError> {
    let fail = |reason: &str| ManifestError::Decode {
        literal: literal.to_string(),
        reason: reason.to_string(),
    };

    if literal.len() < 2 {
        return Err(fail("literal too short"));
    }

    let quote_char = literal.as_bytes()[0];
    if literal.as_bytes()[literal.len() - 1] != quote_char {
        return Err(fail("mismatched quotes"));
    }
    let body = &literal[1..literal.len() - 1];

    match quote_char {
        b'`' => {
            if body.contains('`') {
                return Err(fail("unexpected backquote in raw string"));
            }
            Ok(body.replace('\r', ""))
        }
        b'"' => unescape_interpreted(body).map_err(|reason| fail(&reason)),
        _ => Err(fail("not a string literal")),
    }
}

fn unescape_interpreted(body: &str) -> Result<String, String> {
    if !body.contains('\\') && !body.contains('"') && !body.contains('\n') {
        return Ok(body.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => return Err("unescaped double quote".to_string()),
            '\n' => return Err("newline in string".to_string()),
            '\\' => {
                let Some(esc) = chars.next() else {
                    return Err("trailing backslash".to_string());
                };
                match esc {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0C),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0B),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    '0'..='7' => {
                        let mut value = esc.to_digit(8).unwrap_or(0);
                        for _ in 0..2 {
                            let digit = chars
                                .next()
                                .and_then(|c| c.to_digit(8))
                                .ok_or_else(|| "invalid octal escape".to_string())?;
                            value = value * 8 + digit;
                        }
                        let byte = u8::try_from(value)
                            .map_err(|_| "octal escape out of range".to_string())?;
                        out.push(byte);
                    }
                    'x' => {
                        let value = read_hex(&mut chars, 2)?;
                        out.push(value as u8);
                    }
                    'u' | 'U' => {
                        let width = if esc == 'u' { 4 } else { 8 };
                        let value = read_hex(&mut chars, width)?;
                        let decoded = char::from_u32(value)
                            .ok_or_else(|| format!("invalid code point {:#x}", value))?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes());
                    }
                    other => return Err(format!("unknown escape sequence \\{}", other)),
                }
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(out).map_err(|_| "invalid UTF-8 in string".to_string())
}

fn read_hex(chars: &mut std::str::Chars<'_>, width: usize) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..width {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| "invalid hex escape".to_string())?;
        value = value * 16 + digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_plain_path() {
        let path = unquote("\"golang.org/x/tools/cmd/stringer\"");
        assert!(matches!(path, Ok(ref p) if p == "golang.org/x/tools/cmd/stringer"));
    }

    #[test]
    fn test_unquote_raw_string() {
        let path = unquote("`example.com/raw/tool`");
        assert!(matches!(path, Ok(ref p) if p == "example.com/raw/tool"));
    }

    #[test]
    fn test_unquote_escapes() {
        let path = unquote(r#""a\tb\x41\101é\U0001F600\\\"""#).unwrap_or_default();
        assert_eq!(path, "a\tbAA\u{e9}\u{1F600}\\\"");
    }

    #[test]
    fn test_unquote_rejects_malformed_literals() {
        for literal in [
            "\"",
            "\"unterminated",
            "'x'",
            r#""bad\q""#,
            r#""it\'s""#,
            r#""\x4""#,
            r#""\400""#,
            r#""\ud800""#,
            r#""\xff""#,
            "\"a\"b\"",
        ] {
            assert!(
                matches!(unquote(literal), Err(ManifestError::Decode { .. })),
                "expected decode error for {}",
                literal
            );
        }
    }

    #[test]
    fn test_quote_escapes_specials() {
        assert_eq!(quote("example.com/a/tool"), "\"example.com/a/tool\"");
        assert_eq!(quote("a\"b\\c\n"), r#""a\"b\\c\n""#);
        assert_eq!(quote("\u{1}"), r#""\x01""#);
    }

    #[test]
    fn test_quote_then_unquote_preserves_value() {
        let original = "example.com/\u{e9}t\u{e9}/tool\t\"x\"";
        let decoded = unquote(&quote(original)).unwrap_or_default();
        assert_eq!(decoded, original);
    }
}
