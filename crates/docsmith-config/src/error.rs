use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error variants for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found.
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    /// The configuration could not be read or deserialized.
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// The configuration deserialized but fails a semantic check.
    #[error("invalid configuration: {message}")]
    Validation {
        /// What is wrong.
        message: String,
    },
}

impl ConfigError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
