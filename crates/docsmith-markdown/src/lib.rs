#![deny(clippy::all)]

//! Markdown serialization and lossless re-parsing of documentation metadata.
//!
//! The markdown document is the persisted, reviewable artifact of a
//! documentation build. This crate writes it ([`generate`]) and reads it back
//! ([`parse`]) into the same structured shape, so a build can start from
//! source code or from a previously generated file interchangeably:
//! `parse(generate(data)) == data` on every authoritative `*_text` field,
//! with styled trees regenerated from the text.
//!
//! The [`organize`] module groups flat per-variant type lists into exports,
//! shared by both directions.

pub mod blocks;
pub mod error;
pub mod footer;
pub mod generate;
pub mod organize;
pub mod parse;

pub use error::{MarkdownError, Result};
pub use generate::generate;
pub use organize::organize;
pub use parse::{parse, ParsedDocument};
