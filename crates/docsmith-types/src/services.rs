//! Collaborator traits for external services the pipeline consumes.
//!
//! Markdown styling, syntax highlighting, and code pretty-printing are all
//! external concerns. The pipeline only depends on these traits; callers pick
//! the implementations and pass them in, which keeps the pure core
//! deterministic and testable.

use thiserror::Error;

use crate::styled::StyledTree;

/// Error raised by a collaborator service.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Converts markdown source into a styled tree.
pub trait MarkdownStyler {
    fn to_styled(&self, markdown: &str) -> StyledTree;
}

/// Syntax-highlights a code fragment into a styled tree.
pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str) -> StyledTree;
}

/// Pretty-prints a type body under a print-width hint.
pub trait CodeFormatter {
    fn format(&self, source: &str, print_width: usize) -> Result<String, ServiceError>;
}

/// Highlighter that produces unstyled `pre`/`code` trees.
///
/// Useful as a default and in tests; real highlighters plug in behind the
/// same trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, language: &str) -> StyledTree {
        StyledTree::code_block(code, language)
    }
}
