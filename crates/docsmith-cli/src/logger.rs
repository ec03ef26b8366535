//! Logging setup for the docsmith CLI.
//!
//! Structured logging via the `tracing` ecosystem: `--verbose` for debug,
//! `--quiet` for errors only, `RUST_LOG` for custom filters, and automatic
//! color handling for piped output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(
            "docsmith_cli=debug,docsmith_format=debug,docsmith_markdown=debug,docsmith_demos=debug",
        )
    } else if quiet {
        EnvFilter::new("docsmith=error,docsmith_cli=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "docsmith_cli=info,docsmith_format=info,docsmith_markdown=info,docsmith_demos=info",
            )
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && colors_supported())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether colored output should be used, honoring `NO_COLOR`/`FORCE_COLOR`.
pub fn colors_supported() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stdout().features().colors_supported()
}
