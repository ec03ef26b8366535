//! CLI error type: one enum over the library error surfaces plus the I/O the
//! commands do themselves.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] docsmith_config::ConfigError),

    #[error(transparent)]
    Markdown(#[from] docsmith_markdown::MarkdownError),

    #[error(transparent)]
    Demo(#[from] docsmith_demos::DemoError),

    #[error("failed to read '{path}': {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse extractor output '{path}': {error}")]
    ExtractorJson {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// `check` found pages whose markdown no longer matches their data.
    #[error("{message}")]
    Drift { message: String },
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }

    pub fn drift(message: impl Into<String>) -> Self {
        Self::Drift {
            message: message.into(),
        }
    }
}
