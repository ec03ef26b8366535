use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for demo bundling.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Error variants for demo bundling.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Failed to read a demo source file or directory.
    #[error("failed to read demo source '{path}': {error}")]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The demo directory has no recognizable entry point.
    #[error("no entry point found in demo directory '{path}'")]
    MissingEntry {
        /// Demo directory that was searched.
        path: PathBuf,
    },
}

impl DemoError {
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}
