//! Command-line interface definition for docsmith.
//!
//! Type-safe argument parsing with clap v4 derive macros.
//!
//! # Command Structure
//!
//! - `docsmith build` - Generate markdown and JSON from extractor output
//! - `docsmith check` - Verify generated markdown still matches its data
//! - `docsmith demos` - Flatten code demos into self-contained bundles

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// docsmith - TypeScript API reference docs with a lossless markdown round trip
#[derive(Parser, Debug)]
#[command(
    name = "docsmith",
    version,
    about = "Generate API reference docs from TypeScript extractor output",
    long_about = "docsmith turns the JSON output of a TypeScript API extractor into\n\
                  reviewable markdown documentation, and parses that markdown back into\n\
                  the identical structured form for the docs UI. It also bundles code\n\
                  demos into self-contained, syntax-highlighted file sets."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build markdown documentation from extractor output
    Build(BuildArgs),
    /// Parse generated markdown and report drift against regeneration
    Check(CheckArgs),
    /// Flatten demo directories into self-contained bundles
    Demos(DemosArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to docsmith.toml (discovered upward from the working directory
    /// when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to docsmith.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DemosArgs {
    /// Path to docsmith.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the bundle manifest to this file instead of the configured one
    #[arg(long)]
    pub out: Option<PathBuf>,
}
