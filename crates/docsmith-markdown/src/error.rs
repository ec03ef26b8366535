use thiserror::Error;

/// Result type alias for markdown serialization and parsing.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Error variants for the markdown round trip.
///
/// Individual malformed fragments inside a document are tolerated and
/// skipped; only a document that cannot be read as markdown at all is an
/// error.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// The document is not parseable markdown.
    #[error("failed to parse markdown document: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },
}

impl MarkdownError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
