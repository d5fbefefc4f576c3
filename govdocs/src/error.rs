//! Error types for `govdocs`
//!
//! Every command returns [`GovDocsError`], which maps onto a process exit
//! code through [`GovDocsError::exit_code`].

use std::path::PathBuf;

use govdocs_core::ContentError;
use govdocs_mdx::MdxError;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `govdocs` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error, including a failed `check`
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, unknown keys)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (output directory not writable)
    pub const IO_ERROR: i32 = 3;

    /// Server error (bind failed, metrics listener failed)
    pub const SERVER_ERROR: i32 = 4;

    /// Content error (unreadable directory, broken frontmatter)
    pub const CONTENT_ERROR: i32 = 5;

    /// Render error (unbalanced or malformed MDX elements)
    pub const RENDER_ERROR: i32 = 6;

    /// Usage error (invalid arguments)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `govdocs` operations.
#[derive(Debug, Error)]
pub enum GovDocsError {
    /// Site configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Content directory or document could not be loaded
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A document body failed to render
    #[error("failed to render '{slug}': {source}")]
    Render {
        /// Slug of the document
        slug: String,
        /// Underlying parse error
        source: MdxError,
    },

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// `check` found problems
    #[error("check failed: {errors} error(s), {warnings} warning(s)")]
    CheckFailed {
        /// Number of errors
        errors: usize,
        /// Number of warnings
        warnings: usize,
    },

    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GovDocsError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Content(_) => ExitCode::CONTENT_ERROR,
            Self::Render { .. } => ExitCode::RENDER_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::CheckFailed { .. } => ExitCode::ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

impl From<SiteError> for GovDocsError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Content(source) => Self::Content(source),
            SiteError::Render { slug, source } => Self::Render { slug, source },
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Site configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// YAML parsing or deserialization failed
    #[error("parse error in {path}{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Site Errors
// ============================================================================

/// Errors while producing a page.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Content could not be loaded
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A document body failed to render
    #[error("failed to render '{slug}': {source}")]
    Render {
        /// Slug of the document
        slug: String,
        /// Underlying parse error
        source: MdxError,
    },
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bind address could not be parsed
    #[error("invalid bind address \"{input}\": {message}")]
    InvalidBindAddress {
        /// Address as given
        input: String,
        /// Parser message
        message: String,
    },

    /// Listener could not bind
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Server loop failed
    #[error("server error: {0}")]
    Serve(std::io::Error),

    /// Prometheus recorder or listener could not be installed
    #[error("metrics setup failed: {0}")]
    Metrics(String),
}
