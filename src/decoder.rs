//! TONE decoder (Component F): TONE text -> value tree.

use crate::error::{Result, ToonError};
use crate::lexer::recognize_token;
use crate::lines::{split_lines, Line};
use crate::options::{Delimiter, DecodeOptions};
use serde_json::{Map, Value};

/// Decode TONE text to a JSON value.
pub fn decode(input: &str, options: &DecodeOptions) -> Result<Value> {
    options.validate()?;
    let lines = split_lines(input, options.indent)?;
    let mut decoder = Decoder {
        lines,
        options,
        pos: 0,
    };
    decoder.decode()
}

struct Decoder<'a> {
    lines: Vec<Line>,
    options: &'a DecodeOptions,
    pos: usize,
}

/// A parsed array header: declared length, active delimiter, optional
/// tabular field list, and an optional inline tail (text after the colon).
struct ArrayHeader {
    length: usize,
    delimiter: Delimiter,
    fields: Vec<String>,
}

impl<'a> Decoder<'a> {
    fn decode(&mut self) -> Result<Value> {
        if self.lines.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        if self.is_root_array() {
            self.pos = 0;
            self.decode_array_at_root()
        } else if self.lines.len() == 1 && !self.is_key_value(&self.lines[0].content) {
            let line = &self.lines[0];
            recognize_token(&line.content, line.line_num)
        } else {
            self.decode_object(0)
        }
    }

    fn is_root_array(&self) -> bool {
        // A root array header starts directly with '[' (no key); an object
        // field line always starts with a key name, never a bare bracket.
        self.lines[0].content.starts_with('[')
    }

    fn is_key_value(&self, line: &str) -> bool {
        let mut in_quotes = false;
        for ch in line.chars() {
            if ch == '"' {
                in_quotes = !in_quotes;
            } else if ch == ':' && !in_quotes {
                return true;
            }
        }
        false
    }

    fn current_line_or_last(&self) -> (usize, String) {
        if self.pos < self.lines.len() {
            (self.lines[self.pos].line_num, self.lines[self.pos].content.clone())
        } else if let Some(last) = self.lines.last() {
            (last.line_num, last.content.clone())
        } else {
            (0, String::new())
        }
    }

    /// Decode the object whose fields sit at exactly `depth`, stopping when
    /// the cursor reaches a shallower line or the end of input.
    fn decode_object(&mut self, depth: usize) -> Result<Value> {
        let mut obj = Map::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].clone();
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                return Err(ToonError::syntax(
                    line.line_num,
                    &line.content,
                    "unexpected indentation",
                ));
            }

            let (key, value_part) = self.parse_key_value(&line.content, line.line_num)?;
            self.pos += 1;

            let (actual_key, header_part) = split_array_header(&key);

            let value = if let Some(header) = header_part {
                let full = format!("{header}:{value_part}");
                self.decode_array_value(&full, depth, line.line_num)?
            } else if value_part.is_empty() {
                self.decode_bare_key_body(depth, line.line_num)?
            } else {
                recognize_token(&value_part, line.line_num)?
            };

            if obj.contains_key(&actual_key) {
                if self.options.strict {
                    return Err(ToonError::duplicate_key(line.line_num, &line.content, &actual_key));
                }
            }
            obj.insert(actual_key, value);
        }

        Ok(Value::Object(obj))
    }

    /// Resolve a bare `key:` body per the documented disambiguation: a
    /// deeper following line means a nested object; a following line at
    /// the same or shallower depth means an empty object; no following
    /// line at all means null.
    fn decode_bare_key_body(&mut self, depth: usize, _line_num: usize) -> Result<Value> {
        if self.pos < self.lines.len() {
            if self.lines[self.pos].depth > depth {
                self.decode_object(depth + 1)
            } else {
                Ok(Value::Object(Map::new()))
            }
        } else {
            Ok(Value::Null)
        }
    }

    fn decode_array_value(&mut self, header_text: &str, parent_depth: usize, line_num: usize) -> Result<Value> {
        let (header, inline_tail) = parse_array_header(header_text, line_num)?;

        if let Some(tail) = inline_tail {
            return self.decode_inline_array(&tail, header.delimiter, header.length, line_num);
        }

        if !header.fields.is_empty() {
            self.decode_tabular_array(parent_depth + 1, header.length, header.delimiter, &header.fields)
        } else {
            self.decode_list_array(parent_depth + 1, header.length)
        }
    }

    fn decode_array_at_root(&mut self) -> Result<Value> {
        let line = self.lines[0].clone();
        let (header, inline_tail) = parse_array_header(&line.content, line.line_num)?;
        self.pos = 1;

        if let Some(tail) = inline_tail {
            return self.decode_inline_array(&tail, header.delimiter, header.length, line.line_num);
        }

        if !header.fields.is_empty() {
            self.decode_tabular_array(1, header.length, header.delimiter, &header.fields)
        } else {
            self.decode_list_array(1, header.length)
        }
    }

    fn decode_inline_array(
        &self,
        values_str: &str,
        delimiter: Delimiter,
        expected_len: usize,
        line_num: usize,
    ) -> Result<Value> {
        let tokens = split_by_delimiter(values_str, delimiter);
        let (_, excerpt) = self.current_line_or_last();

        if tokens.len() != expected_len {
            if self.options.strict {
                return Err(ToonError::length_mismatch(line_num, &excerpt, expected_len, tokens.len()));
            }
        }

        let values: Result<Vec<Value>> = tokens
            .iter()
            .map(|t| recognize_token(t, line_num))
            .collect();
        let mut values = values?;
        if !self.options.strict {
            adjust_len(&mut values, expected_len, Value::Null);
        }
        Ok(Value::Array(values))
    }

    fn decode_tabular_array(
        &mut self,
        row_depth: usize,
        expected_rows: usize,
        delimiter: Delimiter,
        fields: &[String],
    ) -> Result<Value> {
        let mut arr = Vec::new();

        while self.pos < self.lines.len() && self.lines[self.pos].depth == row_depth {
            let line = self.lines[self.pos].clone();
            let mut tokens = split_by_delimiter(&line.content, delimiter);

            if tokens.len() != fields.len() {
                if self.options.strict {
                    return Err(ToonError::row_width_mismatch(
                        line.line_num,
                        &line.content,
                        fields.len(),
                        tokens.len(),
                    ));
                }
                adjust_len(&mut tokens, fields.len(), String::new());
            }

            let mut obj = Map::new();
            for (field, token) in fields.iter().zip(tokens.iter()) {
                let value = if token.is_empty() {
                    Value::Null
                } else {
                    recognize_token(token, line.line_num)?
                };
                obj.insert(field.clone(), value);
            }
            arr.push(Value::Object(obj));
            self.pos += 1;
        }

        if arr.len() != expected_rows {
            if self.options.strict {
                let (line_num, excerpt) = self.current_line_or_last();
                return Err(ToonError::length_mismatch(line_num, &excerpt, expected_rows, arr.len()));
            }
            adjust_len(&mut arr, expected_rows, Value::Null);
        }

        Ok(Value::Array(arr))
    }

    fn decode_list_array(&mut self, item_depth: usize, expected_len: usize) -> Result<Value> {
        let mut arr = Vec::new();

        while self.pos < self.lines.len() && self.lines[self.pos].depth == item_depth {
            let line = self.lines[self.pos].clone();
            if !line.content.starts_with("- ") {
                break;
            }
            let item_content = line.content[2..].to_string();
            self.pos += 1;

            let value = if item_content.starts_with('[') {
                let (header, inline_tail) = parse_array_header(&item_content, line.line_num)?;
                if let Some(tail) = inline_tail {
                    self.decode_inline_array(&tail, header.delimiter, header.length, line.line_num)?
                } else if !header.fields.is_empty() {
                    self.decode_tabular_array(item_depth + 1, header.length, header.delimiter, &header.fields)?
                } else {
                    self.decode_list_array(item_depth + 1, header.length)?
                }
            } else if self.is_key_value(&item_content) {
                let (key, value_part) = self.parse_key_value(&item_content, line.line_num)?;
                Value::Object(self.decode_list_item_object(key, value_part, item_depth, line.line_num)?)
            } else {
                recognize_token(&item_content, line.line_num)?
            };

            arr.push(value);
        }

        if arr.len() != expected_len {
            if self.options.strict {
                let (line_num, excerpt) = self.current_line_or_last();
                return Err(ToonError::length_mismatch(line_num, &excerpt, expected_len, arr.len()));
            }
            adjust_len(&mut arr, expected_len, Value::Null);
        }

        Ok(Value::Array(arr))
    }

    fn decode_list_item_object(
        &mut self,
        first_key: String,
        first_value: String,
        item_depth: usize,
        line_num: usize,
    ) -> Result<Map<String, Value>> {
        let mut obj = Map::new();

        let (actual_key, header_part) = split_array_header(&first_key);
        let value = if let Some(header) = header_part {
            let full = format!("{header}:{first_value}");
            self.decode_array_value(&full, item_depth, line_num)?
        } else if first_value.is_empty() {
            self.decode_bare_key_body(item_depth, line_num)?
        } else {
            recognize_token(&first_value, line_num)?
        };
        obj.insert(actual_key, value);

        while self.pos < self.lines.len()
            && self.lines[self.pos].depth == item_depth + 1
            && !self.lines[self.pos].content.starts_with("- ")
        {
            let line = self.lines[self.pos].clone();
            let (key, value_part) = self.parse_key_value(&line.content, line.line_num)?;
            self.pos += 1;

            let (actual_key, header_part) = split_array_header(&key);
            let value = if let Some(header) = header_part {
                let full = format!("{header}:{value_part}");
                self.decode_array_value(&full, item_depth + 1, line.line_num)?
            } else if value_part.is_empty() {
                self.decode_bare_key_body(item_depth + 1, line.line_num)?
            } else {
                recognize_token(&value_part, line.line_num)?
            };

            if obj.contains_key(&actual_key) && self.options.strict {
                return Err(ToonError::duplicate_key(line.line_num, &line.content, &actual_key));
            }
            obj.insert(actual_key, value);
        }

        Ok(obj)
    }

    /// Split `key: value?` respecting quoted colons. Always succeeds for a
    /// valid object line (`decode_object`/list-item callers already know
    /// the line contains an unquoted colon via `is_key_value`/header check).
    fn parse_key_value(&self, line: &str, line_num: usize) -> Result<(String, String)> {
        let mut in_quotes = false;
        let mut colon_pos = None;
        let chars: Vec<char> = line.chars().collect();
        for (i, &ch) in chars.iter().enumerate() {
            if ch == '"' && (i == 0 || chars[i - 1] != '\\') {
                in_quotes = !in_quotes;
            } else if ch == ':' && !in_quotes {
                colon_pos = Some(i);
                break;
            }
        }

        let pos = colon_pos.ok_or_else(|| {
            ToonError::syntax(line_num, line, "expected a key/value line with an unquoted colon")
        })?;
        let key: String = chars[..pos].iter().collect();
        let value: String = chars[pos + 1..].iter().collect();
        let key = key.trim();
        let value = value.trim();

        let unescaped_key = if key.starts_with('[') {
            key.to_string()
        } else if let Some(bracket) = key.find('[') {
            let (name, header) = key.split_at(bracket);
            format!("{}{}", unescape_key(name, line_num)?, header)
        } else {
            unescape_key(key, line_num)?
        };

        Ok((unescaped_key, value.to_string()))
    }
}

fn unescape_key(key: &str, line_num: usize) -> Result<String> {
    if key.starts_with('"') {
        unquote(key, line_num)
    } else {
        Ok(key.to_string())
    }
}

/// Split a key token into its plain name and, if present, its raw
/// `[...]...` array-header suffix (beginning at the first unquoted `[`).
fn split_array_header(key: &str) -> (String, Option<String>) {
    if let Some(idx) = key.find('[') {
        (key[..idx].to_string(), Some(key[idx..].to_string()))
    } else {
        (key.to_string(), None)
    }
}

fn parse_array_header(header: &str, line_num: usize) -> Result<(ArrayHeader, Option<String>)> {
    let bracket_end = header
        .find(']')
        .ok_or_else(|| ToonError::syntax(line_num, header, "array header missing ']'"))?;
    let bracket_content = &header[1..bracket_end];
    let bracket_content = bracket_content.strip_prefix('#').unwrap_or(bracket_content);

    let (digits, delimiter) = if let Some(stripped) = bracket_content.strip_suffix('\t') {
        (stripped, Delimiter::Tab)
    } else if let Some(stripped) = bracket_content.strip_suffix('|') {
        (stripped, Delimiter::Pipe)
    } else {
        (bracket_content, Delimiter::Comma)
    };

    let length: usize = digits
        .parse()
        .map_err(|_| ToonError::syntax(line_num, header, "invalid array header length"))?;

    let mut fields = Vec::new();
    let after_bracket = &header[bracket_end + 1..];
    let mut rest = after_bracket;
    if let Some(stripped) = after_bracket.strip_prefix('{') {
        let close = stripped
            .find('}')
            .ok_or_else(|| ToonError::syntax(line_num, header, "array header missing '}'"))?;
        let fields_str = &stripped[..close];
        fields = split_by_delimiter(fields_str, delimiter)
            .into_iter()
            .map(|f| unescape_key(&f, line_num))
            .collect::<Result<Vec<_>>>()?;
        rest = &stripped[close + 1..];
    }

    let rest = rest
        .strip_prefix(':')
        .ok_or_else(|| ToonError::syntax(line_num, header, "array header missing ':'"))?;
    let inline_tail = if rest.trim().is_empty() {
        None
    } else {
        Some(rest.trim().to_string())
    };

    Ok((
        ArrayHeader {
            length,
            delimiter,
            fields,
        },
        inline_tail,
    ))
}

fn split_by_delimiter(s: &str, delimiter: Delimiter) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let delim_char = delimiter.as_char();

    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == '\\' && in_quotes {
            current.push(ch);
            if let Some(&next_ch) = chars.peek() {
                current.push(next_ch);
                chars.next();
            }
        } else if ch == delim_char && !in_quotes {
            result.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    result.push(current.trim().to_string());
    result
}

fn unquote(s: &str, line_num: usize) -> Result<String> {
    match recognize_token(s, line_num)? {
        Value::String(s) => Ok(s),
        _ => Ok(s.to_string()),
    }
}

/// Pad with `filler` or truncate `items` to exactly `target` length
/// (non-strict repair for count/row-width mismatches).
fn adjust_len<T: Clone>(items: &mut Vec<T>, target: usize, filler: T) {
    if items.len() > target {
        items.truncate(target);
    } else {
        while items.len() < target {
            items.push(filler.clone());
        }
    }
}
