//! docsmith - API reference documentation pipeline.
//!
//! Entry point: parses arguments, initializes logging, dispatches commands.

use clap::Parser;
use docsmith_cli::{cli, commands, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
        cli::Command::Demos(demos_args) => commands::demos_execute(demos_args).await,
    };

    result.map_err(|error| miette::miette!("{error}"))
}
