//! Bundle of collaborator services handed to the formatter.

use docsmith_types::{CodeFormatter, Highlighter, MarkdownStyler};

/// The external services one formatting pass uses, chosen by the caller.
#[derive(Clone, Copy)]
pub struct FormatServices<'a> {
    pub styler: &'a dyn MarkdownStyler,
    pub highlighter: &'a dyn Highlighter,
    pub printer: &'a dyn CodeFormatter,
}
