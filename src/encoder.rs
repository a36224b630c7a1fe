//! TONE encoder (Component D): value tree -> TONE text.

use crate::error::{Result, ToonError};
use crate::indent::make_indent;
use crate::lexer::{render_key, render_scalar};
use crate::options::{Delimiter, EncodeOptions};
use crate::shape::{classify, tabular_fields, ArrayShape};
use serde_json::{Map, Value};

const MAX_DEPTH: usize = 128;

/// Encode a JSON value to TONE text. Fails with `EncodeValue` on a
/// `NaN`/infinite float or on runaway recursion depth, and with `Config`
/// on an out-of-range option.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    options.validate()?;
    let mut encoder = Encoder::new(options);
    encoder.encode_root(value)?;
    Ok(encoder.output)
}

struct Encoder<'a> {
    options: &'a EncodeOptions,
    output: String,
}

impl<'a> Encoder<'a> {
    fn new(options: &'a EncodeOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn encode_root(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(obj) if obj.is_empty() => Ok(()),
            Value::Object(obj) => self.encode_object(obj, 0),
            Value::Array(arr) => self.encode_array_after_key(arr, 0, 0),
            scalar => {
                let token = render_scalar(scalar, self.options.delimiter)?;
                self.output.push_str(&token);
                Ok(())
            }
        }
    }

    fn guard_depth(&self, depth: usize) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(ToonError::encode_value(format!(
                "value nesting exceeds the maximum supported depth of {MAX_DEPTH}"
            )));
        }
        Ok(())
    }

    fn encode_object(&mut self, obj: &Map<String, Value>, depth: usize) -> Result<()> {
        self.guard_depth(depth)?;
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 || depth > 0 {
                self.output.push('\n');
            }
            self.output.push_str(&make_indent(depth, self.options.indent));
            self.output.push_str(&render_key(key));

            match value {
                Value::Object(nested) if nested.is_empty() => {
                    self.output.push(':');
                }
                Value::Object(nested) => {
                    self.output.push(':');
                    self.encode_object(nested, depth + 1)?;
                }
                Value::Array(arr) => {
                    self.encode_array_after_key(arr, depth, depth)?;
                }
                scalar => {
                    self.output.push(':');
                    self.output.push(' ');
                    let token = render_scalar(scalar, self.options.delimiter)?;
                    self.output.push_str(&token);
                }
            }
        }
        Ok(())
    }

    /// Encode an array after its key (or at the root, with no key) has
    /// already been written. `key_depth` is the depth the header line sits
    /// at; the body, if any, sits at `key_depth + 1`.
    fn encode_array_after_key(&mut self, arr: &[Value], key_depth: usize, _unused: usize) -> Result<()> {
        self.guard_depth(key_depth)?;
        let delim = self.options.delimiter;
        match classify(arr) {
            ArrayShape::Empty => {
                self.write_array_header(0, delim, None);
            }
            ArrayShape::Tabular => {
                let fields = tabular_fields(arr).expect("classify guarantees tabular_fields");
                self.write_array_header(arr.len(), delim, Some(&fields));
                for item in arr {
                    self.output.push('\n');
                    self.output.push_str(&make_indent(key_depth + 1, self.options.indent));
                    if let Value::Object(map) = item {
                        for (j, field) in fields.iter().enumerate() {
                            if j > 0 {
                                self.output.push(delim.as_char());
                            }
                            if let Some(val) = map.get(field) {
                                let token = render_scalar(val, delim)?;
                                self.output.push_str(&token);
                            }
                        }
                    }
                }
            }
            ArrayShape::InlinePrimitive => {
                self.write_array_header(arr.len(), delim, None);
                if !arr.is_empty() {
                    self.output.push(' ');
                    for (i, val) in arr.iter().enumerate() {
                        if i > 0 {
                            self.output.push(delim.as_char());
                        }
                        let token = render_scalar(val, delim)?;
                        self.output.push_str(&token);
                    }
                }
            }
            ArrayShape::List => {
                self.write_array_header(arr.len(), delim, None);
                for item in arr {
                    self.output.push('\n');
                    self.output.push_str(&make_indent(key_depth + 1, self.options.indent));
                    self.output.push_str("- ");
                    match item {
                        Value::Array(inner) => {
                            self.encode_inline_list_item(inner, key_depth + 1)?;
                        }
                        Value::Object(obj) => {
                            self.encode_object_as_list_item(obj, key_depth + 1)?;
                        }
                        scalar => {
                            let token = render_scalar(scalar, delim)?;
                            self.output.push_str(&token);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// A nested array rendered as a list item's sole content (`- [N]: ...`).
    fn encode_inline_list_item(&mut self, inner: &[Value], depth: usize) -> Result<()> {
        self.guard_depth(depth)?;
        let delim = self.options.delimiter;
        match classify(inner) {
            ArrayShape::Empty => self.write_array_header(0, delim, None),
            ArrayShape::InlinePrimitive => {
                self.write_array_header(inner.len(), delim, None);
                if !inner.is_empty() {
                    self.output.push(' ');
                    for (i, val) in inner.iter().enumerate() {
                        if i > 0 {
                            self.output.push(delim.as_char());
                        }
                        self.output.push_str(&render_scalar(val, delim)?);
                    }
                }
            }
            _ => {
                // A nested non-primitive array as a list item: fall back to
                // the general array-after-key path at the same depth, using
                // a two-deeper body to stay under the "- " marker.
                self.encode_array_after_key(inner, depth, depth)?;
            }
        }
        Ok(())
    }

    fn encode_object_as_list_item(&mut self, obj: &Map<String, Value>, depth: usize) -> Result<()> {
        self.guard_depth(depth)?;
        for (i, (key, value)) in obj.iter().enumerate() {
            let own_depth = if i == 0 { depth } else { depth + 1 };
            if i > 0 {
                self.output.push('\n');
                self.output.push_str(&make_indent(own_depth, self.options.indent));
            }
            self.output.push_str(&render_key(key));
            self.output.push(':');

            match value {
                Value::Object(nested) if nested.is_empty() => {}
                Value::Object(nested) => {
                    self.encode_object(nested, own_depth + 1)?;
                }
                Value::Array(arr) => {
                    self.encode_array_after_key(arr, own_depth, own_depth)?;
                }
                scalar => {
                    self.output.push(' ');
                    self.output.push_str(&render_scalar(scalar, self.options.delimiter)?);
                }
            }
        }
        Ok(())
    }

    fn write_array_header(&mut self, len: usize, delim: Delimiter, fields: Option<&[String]>) {
        self.output.push('[');
        if self.options.length_marker {
            self.output.push('#');
        }
        self.output.push_str(&len.to_string());
        self.output.push_str(delim.header_hint());
        self.output.push(']');
        if let Some(fields) = fields {
            self.output.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    self.output.push(delim.as_char());
                }
                self.output.push_str(&render_key(field));
            }
            self.output.push('}');
        }
        self.output.push(':');
    }
}
