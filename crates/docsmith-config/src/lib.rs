#![deny(clippy::all)]

//! Configuration loading and validation for the docsmith pipeline.
//!
//! Configuration lives in `docsmith.toml`, discovered upward from the working
//! directory, with `DOCSMITH_*` environment overrides layered on top.

pub mod config;
pub mod error;

pub use config::{DemosConfig, DocsConfig, PageConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, Result};
