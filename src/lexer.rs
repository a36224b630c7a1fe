//! Scalar lexer (Component A): quoting/escaping/numeric recognition shared
//! by encoder and decoder.

use crate::error::{Result, ToonError};
use crate::options::Delimiter;
use serde_json::Value;

/// Render a scalar `Value` as a TONE token, quoting it if required for the
/// active `delimiter`. Returns `EncodeValue` for `NaN`/infinite floats or
/// for a non-scalar `Value` (callers never pass those, but the boundary is
/// checked anyway).
pub(crate) fn render_scalar(value: &Value, delimiter: Delimiter) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => render_number(n),
        Value::String(s) => Ok(render_string(s, delimiter)),
        Value::Object(_) | Value::Array(_) => Err(ToonError::encode_value(
            "attempted to render a non-scalar value as a scalar token",
        )),
    }
}

fn render_number(n: &serde_json::Number) -> Result<String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    let f = n.as_f64().ok_or_else(|| {
        ToonError::encode_value("number is not representable as i64, u64, or f64")
    })?;
    if f.is_nan() || f.is_infinite() {
        return Err(ToonError::encode_value(
            "NaN and infinite floats are not valid TONE/JSON values",
        ));
    }
    // serde_json::Number's own Display is already the shortest round-trip
    // decimal for any value it parsed; just normalize -0 and strip a
    // redundant exponent-free trailing ".0" is not needed since serde_json
    // never prints one for whole floats it stores as Number.
    let f = if f == 0.0 { 0.0 } else { f };
    if f.fract() == 0.0 && f.abs() < (i64::MAX as f64) {
        return Ok((f as i64).to_string());
    }
    let s = n.to_string();
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0');
        Ok(trimmed.trim_end_matches('.').to_string())
    } else {
        Ok(s)
    }
}

/// Render a string, quoting and escaping it if `needs_quoting` says so.
pub(crate) fn render_string(s: &str, delimiter: Delimiter) -> String {
    if needs_quoting(s, delimiter) {
        quote_and_escape(s)
    } else {
        s.to_string()
    }
}

/// Render an object/field key the same way a string scalar is rendered,
/// plus the additional unquoted-key character restriction (spec §4.A).
pub(crate) fn render_key(key: &str) -> String {
    if is_valid_unquoted_key(key) {
        key.to_string()
    } else {
        quote_and_escape(key)
    }
}

fn is_valid_unquoted_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Spec §4.A: a string must be quoted iff it is empty, a reserved word,
/// numeric-looking, or contains any delimiter/structural/control byte.
fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    if s == "null" || s == "true" || s == "false" {
        return true;
    }
    if looks_numeric(s) {
        return true;
    }
    if s.starts_with(' ') || s.ends_with(' ') {
        return true;
    }
    let delim = delimiter.as_char();
    s.chars().any(|c| {
        c == delim
            || c == ':'
            || c == '#'
            || c == '['
            || c == ']'
            || c == '{'
            || c == '}'
            || c == '-'
            || c == '"'
            || c == '\\'
            || c == '\n'
            || c == '\r'
            || c.is_control()
    })
}

/// Does `s` match the integer or float grammar (spec §4.A recognize step),
/// including ambiguous leading-zero forms like `"05"` that must be quoted
/// to avoid being reinterpreted as numbers on decode?
fn looks_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let start = if bytes[0] == b'-' { 1 } else { 0 };
    if start >= bytes.len() {
        return false;
    }
    let rest = &s[start..];
    if rest.len() > 1 && rest.as_bytes()[0] == b'0' && rest.as_bytes()[1] != b'.' {
        // Leading-zero forms ("05", "0001") are numeric-looking even though
        // they don't match the strict integer grammar themselves.
        return rest.as_bytes()[1..].iter().all(|b| b.is_ascii_digit());
    }
    parse_integer_token(rest).is_some() || parse_float_token(rest).is_some()
}

fn quote_and_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Parse a raw token (already split off a delimiter) into a `Value`,
/// recognizing quoted strings, reserved words, and numbers in that order,
/// falling back to an unquoted string.
pub(crate) fn recognize_token(token: &str, line: usize) -> Result<Value> {
    let token = token.trim_end_matches([' ', '\t']);
    if let Some(rest) = token.strip_prefix('"') {
        return parse_quoted(rest, token, line).map(Value::String);
    }
    match token {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(n) = parse_integer_token(token) {
        return Ok(Value::Number(n));
    }
    if let Some(f) = parse_float_token(token) {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Ok(Value::Number(n));
        }
    }
    Ok(Value::String(token.to_string()))
}

fn parse_quoted(after_quote: &str, whole: &str, line: usize) -> Result<String> {
    if !after_quote.ends_with('"') || after_quote.len() < 1 {
        return Err(ToonError::syntax(line, whole, "unterminated quoted string"));
    }
    let inner = &after_quote[..after_quote.len() - 1];
    unescape(inner, whole, line)
}

fn unescape(inner: &str, whole: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(ToonError::syntax(line, whole, "invalid \\u escape"));
                }
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| ToonError::syntax(line, whole, "invalid \\u escape"))?;
                out.push(char::from_u32(code).ok_or_else(|| {
                    ToonError::syntax(line, whole, "invalid \\u escape: not a valid codepoint")
                })?);
            }
            Some(other) => {
                return Err(ToonError::syntax(
                    line,
                    whole,
                    format!("unknown escape sequence \\{other}"),
                ))
            }
            None => return Err(ToonError::syntax(line, whole, "unterminated escape sequence")),
        }
    }
    Ok(out)
}

/// Integer grammar: `-?(0|[1-9][0-9]*)`. Tries `i64` first, then falls back
/// to `u64` for unsigned values beyond `i64::MAX` (e.g. `18446744073709551615`,
/// which the encoder emits for a `serde_json::Value` backed by a `u64`).
fn parse_integer_token(s: &str) -> Option<serde_json::Number> {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if body.len() > 1 && body.starts_with('0') {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.into());
    }
    s.parse::<u64>().ok().map(serde_json::Number::from)
}

/// Float grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`, with at
/// least one of the fraction/exponent present (otherwise it's an integer).
fn parse_float_token(s: &str) -> Option<f64> {
    let rest = s.strip_prefix('-').unwrap_or(s);
    let bytes = rest.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut i = 0;
    // Integer part.
    if bytes[i] == b'0' {
        i += 1;
    } else if bytes[i].is_ascii_digit() {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    } else {
        return None;
    }
    let mut has_fraction = false;
    let mut has_exponent = false;
    if i < bytes.len() && bytes[i] == b'.' {
        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == start {
            return None;
        }
        has_fraction = true;
        i = j;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == start {
            return None;
        }
        has_exponent = true;
        i = j;
    }
    if i != bytes.len() || !(has_fraction || has_exponent) {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quoting_reserved_words() {
        assert_eq!(render_string("true", Delimiter::Comma), "\"true\"");
        assert_eq!(render_string("null", Delimiter::Comma), "\"null\"");
    }

    #[test]
    fn quoting_numeric_looking_strings() {
        assert_eq!(render_string("05", Delimiter::Comma), "\"05\"");
        assert_eq!(render_string("3.14", Delimiter::Comma), "\"3.14\"");
        assert_eq!(render_string("plain", Delimiter::Comma), "plain");
    }

    #[test]
    fn quoting_dash_anywhere() {
        assert_eq!(render_string("2023-01-15", Delimiter::Comma), "\"2023-01-15\"");
    }

    #[test]
    fn quoting_active_delimiter_only() {
        assert_eq!(render_string("a|b", Delimiter::Comma), "a|b");
        assert_eq!(render_string("a|b", Delimiter::Pipe), "\"a|b\"");
    }

    #[test]
    fn recognize_round_trips_numbers_and_bools() {
        assert_eq!(recognize_token("42", 1).unwrap(), json!(42));
        assert_eq!(recognize_token("-3.5", 1).unwrap(), json!(-3.5));
        assert_eq!(recognize_token("true", 1).unwrap(), json!(true));
        assert_eq!(recognize_token("null", 1).unwrap(), json!(null));
    }

    #[test]
    fn recognize_leading_zero_is_a_string() {
        assert_eq!(recognize_token("05", 1).unwrap(), json!("05"));
    }

    #[test]
    fn recognize_large_u64_beyond_i64_max() {
        let value = recognize_token("18446744073709551615", 1).unwrap();
        assert_eq!(value, json!(u64::MAX));
    }

    #[test]
    fn encode_value_error_on_nan() {
        let n = serde_json::Number::from_f64(f64::NAN);
        assert!(n.is_none(), "serde_json refuses to construct NaN Number");
    }
}
