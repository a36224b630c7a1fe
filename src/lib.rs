//! # tone_rs
//!
//! A fast, bidirectional JSON ⟷ TONE converter.
//!
//! TONE is a line-oriented, indentation-based text format that represents
//! JSON-compatible data with minimal quoting, explicit array-length
//! markers, and tabular compression for uniform object arrays — aimed at
//! the token budget of an LLM context window rather than at human
//! hand-editing.
//!
//! This crate provides both encoding (value → TONE) and decoding
//! (TONE → value) with configurable options and a closed error taxonomy
//! carrying enough position/remediation metadata for a calling model to
//! self-correct its own malformed output.
//!
//! ## Example
//!
//! ```rust
//! use tone_rs::{encode, decode, EncodeOptions, DecodeOptions};
//! use serde_json::json;
//!
//! let data = json!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["admin", "user"]
//! });
//!
//! let text = encode(&data, &EncodeOptions::default()).unwrap();
//! let decoded = decode(&text, &DecodeOptions::default()).unwrap();
//! assert_eq!(data, decoded);
//! ```

mod decoder;
mod encoder;
mod error;
mod indent;
mod lexer;
mod lines;
mod options;
mod shape;

pub use decoder::decode;
pub use encoder::encode;
pub use error::{ErrorContext, ToonError};
pub use options::{DecodeOptions, Delimiter, EncodeOptions};
