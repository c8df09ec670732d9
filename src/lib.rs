//! Decoder for a small, line-oriented subset of TOML.
//!
//! Input is read as ASCII text made of `[section]` headers and `key = value` lines, where a value
//! is a double-quoted string, `true`/`false`, or an integer written in base 2 (`0b`), 8 (`0o`),
//! 10, or 16 (`0x`). Each line either yields an [`Entry`], is skipped (blank lines and headers),
//! or yields a [`LineError`] without stopping the rest of the pass.
//!
//! ```
//! use tomlet::{Entry, decode};
//!
//! let entries = decode("[server]\nport = 0x1F90\n")
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! assert_eq!(entries, vec![Entry::new("server", "port", 8080_i64)]);
//! ```
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

pub mod ascii;
mod document;
mod error;
pub mod limits;
pub mod lines;
pub mod number;
mod parser;
mod section;

pub use document::Document;
pub use error::{LineError, NumberError, ParseError};
pub use limits::Limits;
pub use lines::{Lines, scan};
pub use parser::{Decoder, LineKind, Parser};
pub use section::{Entry, Section, Value};

/// Decodes `text` line by line with the default [`Limits`].
///
/// The result yields one item per line that is neither blank nor a section header, in source
/// order.
#[must_use]
pub fn decode(text: &str) -> Decoder<'_> {
    Decoder::new(text)
}
