//! Error taxonomy for TONE encoding and decoding (Component G: Error reporter).
//!
//! `ToonError` is a small closed set of kinds. Every variant that has a
//! source location carries an [`ErrorContext`] with a 1-based line/column,
//! a one-line excerpt of the offending text, and a deterministic remediation
//! hint so that an LLM consumer can pattern-match on the message and
//! self-correct its own output.

use thiserror::Error;

/// Line/column/excerpt/hint bundle attached to every decode-time error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// 1-based source line, or 0 when the error has no single source line
    /// (encode errors, config errors).
    pub line: usize,
    /// Best-effort 1-based column, or 0 when not applicable.
    pub column: usize,
    /// The offending line verbatim (or the last line read, for
    /// end-of-input errors), or empty when not applicable.
    pub excerpt: String,
    /// Fixed remediation hint, deterministic for a given kind/detail.
    pub hint: String,
}

impl ErrorContext {
    fn new(line: usize, column: usize, excerpt: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            line,
            column,
            excerpt: excerpt.into(),
            hint: hint.into(),
        }
    }
}

/// The closed error taxonomy (spec §7): every decode/encode failure is one
/// of six kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToonError {
    /// Encoder was asked to render a value outside the supported type set
    /// (`NaN`/infinite float, or a recursion depth beyond the cycle guard).
    #[error("encode error: {message}")]
    EncodeValue { message: String },

    /// Malformed header, bad escape, bad number, or stray trailing
    /// characters after a complete value.
    #[error("syntax error at line {}: {message}", ctx.line)]
    Syntax { message: String, ctx: ErrorContext },

    /// Indent remainder non-zero, tab used as indentation, or a depth jump
    /// greater than +1.
    #[error("indent error at line {}: {message}", ctx.line)]
    Indent { message: String, ctx: ErrorContext },

    /// Count mismatch against a declared `[N]`, tabular row-width mismatch,
    /// or duplicate object key (strict mode only).
    #[error("validation error at line {}: {message}", ctx.line)]
    Validation { message: String, ctx: ErrorContext },

    /// Input ended while a structure was still open.
    #[error("truncation error at line {}: {message}", ctx.line)]
    Truncation { message: String, ctx: ErrorContext },

    /// Out-of-range or unrecognized option.
    #[error("config error: {message}")]
    Config { message: String },
}

impl ToonError {
    /// The [`ErrorContext`] carried by this error, if any (encode/config
    /// errors have none).
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ToonError::Syntax { ctx, .. }
            | ToonError::Indent { ctx, .. }
            | ToonError::Validation { ctx, .. }
            | ToonError::Truncation { ctx, .. } => Some(ctx),
            ToonError::EncodeValue { .. } | ToonError::Config { .. } => None,
        }
    }

    pub(crate) fn encode_value(message: impl Into<String>) -> Self {
        ToonError::EncodeValue {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        ToonError::Config {
            message: message.into(),
        }
    }

    pub(crate) fn syntax(line: usize, excerpt: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        ToonError::Syntax {
            ctx: ErrorContext::new(line, 1, excerpt, hint_for_syntax(&detail)),
            message: detail,
        }
    }

    pub(crate) fn indent_remainder(line: usize, excerpt: &str, step: usize) -> Self {
        ToonError::Indent {
            message: format!("indentation is not a multiple of {step}"),
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                format!("indent must be a multiple of step {step}"),
            ),
        }
    }

    pub(crate) fn indent_tab(line: usize, excerpt: &str) -> Self {
        ToonError::Indent {
            message: "tab character used as indentation".to_string(),
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                "indentation must use spaces only, never tabs",
            ),
        }
    }

    pub(crate) fn indent_jump(line: usize, excerpt: &str, from: usize, to: usize) -> Self {
        ToonError::Indent {
            message: format!("depth jumped from {from} to {to}"),
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                "a child line may only be one indent step deeper than its parent",
            ),
        }
    }

    pub(crate) fn length_mismatch(line: usize, excerpt: &str, expected: usize, found: usize) -> Self {
        ToonError::Validation {
            message: format!("declared {expected}, found {found}"),
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                format!("header declares [{expected}] but {found} elements were read"),
            ),
        }
    }

    pub(crate) fn row_width_mismatch(line: usize, excerpt: &str, expected: usize, found: usize) -> Self {
        ToonError::Validation {
            message: format!("row has {found} fields, header declares {expected}"),
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                format!("row has {found} fields, header declares {expected}"),
            ),
        }
    }

    pub(crate) fn duplicate_key(line: usize, excerpt: &str, key: &str) -> Self {
        ToonError::Validation {
            message: format!("duplicate key \"{key}\""),
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                "remove or rename the duplicate key so each object field appears once",
            ),
        }
    }

    pub(crate) fn truncation(line: usize, excerpt: &str, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        ToonError::Truncation {
            ctx: ErrorContext::new(
                line,
                1,
                excerpt,
                format!("input ended while still expecting {expected}"),
            ),
            message: format!("input ended while still expecting {expected}"),
        }
    }
}

fn hint_for_syntax(detail: &str) -> String {
    if detail.contains("escape") {
        "use one of \\\" \\\\ \\n \\r \\t, or \\u00XX for other control bytes".to_string()
    } else if detail.contains("header") {
        "array headers look like key[N]: or key[N]{f1,f2}:".to_string()
    } else if detail.contains("trailing") {
        "remove the extra characters after the value".to_string()
    } else if detail.contains("number") {
        "numbers must not have leading zeros and must use '.'/'e' for fraction/exponent".to_string()
    } else {
        "check the line against the TONE grammar".to_string()
    }
}

pub type Result<T> = std::result::Result<T, ToonError>;
