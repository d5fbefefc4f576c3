//! CLI argument definitions
//!
//! All Clap derive structs for `govdocs` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

/// Default address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default output directory for `build`.
pub const DEFAULT_OUT_DIR: &str = "dist";

// ============================================================================
// Root CLI
// ============================================================================

/// Governance documentation portal rendered from MDX content.
#[derive(Parser, Debug)]
#[command(name = "govdocs", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the `.mdx` content files.
    #[arg(long, global = true, env = "GOVDOCS_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,

    /// Path to the site configuration file (default: ./govdocs.yaml if present).
    #[arg(short, long, global = true, env = "GOVDOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "GOVDOCS_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "GOVDOCS_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the portal over HTTP.
    Serve(ServeArgs),

    /// Render the portal to a static site.
    Build(BuildArgs),

    /// List documents in listing order.
    List(ListArgs),

    /// Parse and render every document and report problems.
    Check(CheckArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Command Arguments
// ============================================================================

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address as `[host:]port`.
    #[arg(long, default_value = DEFAULT_BIND, env = "GOVDOCS_BIND")]
    pub bind: String,

    /// Expose Prometheus metrics on 127.0.0.1:<port>.
    #[arg(long, env = "GOVDOCS_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output directory.
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Remove the output directory before writing.
    #[arg(long)]
    pub clean: bool,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Show the landing-page category grouping instead of the flat list.
    #[arg(long)]
    pub grouped: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: clap_complete::Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["govdocs", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("Expected ServeArgs");
        };
        // GOVDOCS_BIND may be set in the environment running the tests
        if std::env::var_os("GOVDOCS_BIND").is_none() {
            assert_eq!(args.bind, DEFAULT_BIND);
        }
    }

    #[test]
    fn test_serve_with_bind_and_metrics() {
        let cli = Cli::try_parse_from([
            "govdocs",
            "serve",
            "--bind",
            ":8080",
            "--metrics-port",
            "9090",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("Expected ServeArgs");
        };
        assert_eq!(args.bind, ":8080");
        assert_eq!(args.metrics_port, Some(9090));
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["govdocs", "build"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("Expected BuildArgs");
        };
        assert_eq!(args.out, PathBuf::from("dist"));
        assert!(!args.clean);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "govdocs",
            "list",
            "--content-dir",
            "docs",
            "--grouped",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.content_dir, Some(PathBuf::from("docs")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        let Commands::List(args) = cli.command else {
            panic!("Expected ListArgs");
        };
        assert!(args.grouped);
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["govdocs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["govdocs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["govdocs", "--color", variant, "check"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["govdocs", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_invalid_metrics_port() {
        let result = Cli::try_parse_from(["govdocs", "serve", "--metrics-port", "99999"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_strict() {
        let cli = Cli::try_parse_from(["govdocs", "check", "--strict"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("Expected CheckArgs");
        };
        assert!(args.strict);
        assert_eq!(args.format, OutputFormat::Human);
    }
}
