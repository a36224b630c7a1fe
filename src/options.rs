//! Configuration for encode/decode (Component H: Options + defaults).

use crate::error::{Result, ToonError};

/// Minimum permitted indent step.
pub const MIN_INDENT: usize = 1;
/// Maximum permitted indent step.
pub const MAX_INDENT: usize = 8;

/// Delimiter used between array elements and tabular row fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The literal character this delimiter separates values with.
    pub(crate) fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The hint byte recorded in an array header's bracket suffix so decode
    /// can recover the delimiter without being told out of band. Comma is
    /// the default and needs no hint.
    pub(crate) fn header_hint(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Recover a delimiter from a header hint byte (the inverse of
    /// [`Delimiter::header_hint`]). Returns `None` for an unrecognized hint.
    pub(crate) fn from_hint(hint: Option<char>) -> Option<Self> {
        match hint {
            None => Some(Delimiter::Comma),
            Some('\t') => Some(Delimiter::Tab),
            Some('|') => Some(Delimiter::Pipe),
            Some(_) => None,
        }
    }
}

/// Options controlling `encode()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    /// Spaces per indentation level (1–8, default 2).
    pub indent: usize,
    /// Document-wide delimiter for arrays, tabular rows, and the quoting
    /// decisions that depend on it (default comma).
    pub delimiter: Delimiter,
    /// When set, array headers render `[#N]` instead of `[N]`. Decode-
    /// transparent: the marker is informational only.
    pub length_marker: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            delimiter: Delimiter::Comma,
            length_marker: false,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_length_marker(mut self, length_marker: bool) -> Self {
        self.length_marker = length_marker;
        self
    }

    /// Validate this configuration, returning a `Config` error for
    /// out-of-range values.
    pub fn validate(&self) -> Result<()> {
        validate_indent(self.indent)
    }
}

/// Options controlling `decode()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Spaces per indentation level; must match the producer (1–8, default 2).
    pub indent: usize,
    /// Strict mode (default true): reject length-marker and row-width
    /// disagreements instead of padding/truncating.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            strict: true,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate this configuration, returning a `Config` error for
    /// out-of-range values.
    pub fn validate(&self) -> Result<()> {
        validate_indent(self.indent)
    }
}

fn validate_indent(indent: usize) -> Result<()> {
    if (MIN_INDENT..=MAX_INDENT).contains(&indent) {
        Ok(())
    } else {
        Err(ToonError::config(format!(
            "indent must be between {MIN_INDENT} and {MAX_INDENT}, got {indent}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(EncodeOptions::default().validate().is_ok());
        assert!(DecodeOptions::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_indent_is_a_config_error() {
        let opts = EncodeOptions::new().with_indent(0);
        assert!(matches!(opts.validate(), Err(ToonError::Config { .. })));

        let opts = EncodeOptions::new().with_indent(9);
        assert!(matches!(opts.validate(), Err(ToonError::Config { .. })));
    }

    #[test]
    fn delimiter_hint_round_trips() {
        for d in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            let hint = d.header_hint().chars().next();
            assert_eq!(Delimiter::from_hint(hint), Some(d));
        }
    }
}
