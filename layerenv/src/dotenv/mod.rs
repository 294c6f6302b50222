//! `.env` file support.
//!
//! This module turns `.env`-style text into a flat string map:
//! - [`parse`] handles the line format (`KEY=VALUE`, quoting, `\n` expansion)
//! - [`config`] reads a file from disk and reports failures as [`LoadError`]
//!
//! # File Format
//!
//! ```text
//! # lines that don't look like KEY=VALUE are ignored
//! DATABASE_URL=postgres://localhost/app
//! GREETING="hello\nworld"     # double quotes expand \n
//! RAW='kept\nliteral'         # single quotes don't
//! PADDED=   trimmed
//! ```
//!
//! Note that the whole remainder of a line is the value, so the trailing
//! comments above would become part of the values.

pub mod loader;
pub mod parser;

#[cfg(test)]
mod proptests;

pub use loader::{config, DotenvConfig, Encoding, LoadError, LoadErrorKind, DEFAULT_FILE_NAME};
pub use parser::{parse, ParseOptions};
