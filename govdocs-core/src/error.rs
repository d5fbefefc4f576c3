//! Core error types for `govdocs`
//!
//! Content loading and frontmatter parsing errors shared across the workspace.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Frontmatter Errors
// ============================================================================

/// Errors raised while splitting a file into frontmatter and body.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// The opening `---` was never closed.
    #[error("frontmatter block opened on line 1 is never closed")]
    Unterminated,

    /// The metadata block is not valid YAML.
    #[error("invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The metadata block parsed, but not to a key/value mapping.
    #[error("frontmatter must be a key/value mapping, got {found}")]
    NotMapping {
        /// Kind of YAML value that was found instead
        found: &'static str,
    },
}

// ============================================================================
// Content Errors
// ============================================================================

/// Errors raised by the content loader.
///
/// Every variant carries the path it failed on so callers can report it
/// without extra context.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content directory could not be enumerated.
    #[error("cannot read content directory {}: {source}", path.display())]
    ReadDir {
        /// Directory that failed to open
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A single document file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    ReadFile {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A document file has malformed frontmatter.
    #[error("bad frontmatter in {}: {source}", path.display())]
    Frontmatter {
        /// File with the malformed block
        path: PathBuf,
        /// Parsing failure
        source: FrontmatterError,
    },

    /// The slug cannot name a file inside the content directory.
    #[error("invalid slug {slug:?}")]
    InvalidSlug {
        /// Rejected slug
        slug: String,
    },
}

impl ContentError {
    /// Returns `true` when the error means "no such document" rather than a
    /// broken one.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ReadFile { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::InvalidSlug { .. } => true,
            Self::ReadDir { .. } | Self::Frontmatter { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = ContentError::ReadFile {
            path: PathBuf::from("content/nope.mdx"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn bad_frontmatter_is_not_not_found() {
        let err = ContentError::Frontmatter {
            path: PathBuf::from("content/bad.mdx"),
            source: FrontmatterError::Unterminated,
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("content/bad.mdx"));
    }
}
