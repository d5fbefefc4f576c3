//! Error types for MDX parsing.

use thiserror::Error;

/// Structural errors in an MDX body. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MdxError {
    /// An element was opened and never closed.
    #[error("line {line}: <{name}> is never closed")]
    UnclosedElement {
        /// Element name
        name: String,
        /// Line of the opening tag
        line: usize,
    },

    /// A closing tag with no element open.
    #[error("line {line}: </{name}> has no matching opening tag")]
    UnexpectedClose {
        /// Element name
        name: String,
        /// Line of the closing tag
        line: usize,
    },

    /// A closing tag for a different element than the one open.
    #[error("line {line}: expected </{expected}>, found </{found}>")]
    MismatchedClose {
        /// Name of the innermost open element
        expected: String,
        /// Name in the closing tag
        found: String,
        /// Line of the closing tag
        line: usize,
    },

    /// An opening tag whose attributes cannot be read.
    #[error("line {line}: malformed <{name}> tag: {message}")]
    MalformedTag {
        /// Element name
        name: String,
        /// Line of the tag
        line: usize,
        /// What went wrong
        message: String,
    },
}

impl MdxError {
    /// Line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnclosedElement { line, .. }
            | Self::UnexpectedClose { line, .. }
            | Self::MismatchedClose { line, .. }
            | Self::MalformedTag { line, .. } => *line,
        }
    }
}
