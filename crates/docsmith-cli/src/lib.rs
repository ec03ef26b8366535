#![deny(clippy::all)]

//! docsmith CLI library: argument parsing, logging, the extractor cache, and
//! the command implementations behind the `docsmith` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod service;

pub use error::{CliError, Result};
pub use service::ExtractorCache;
