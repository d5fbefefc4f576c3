//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`, so `list` and `version`
//! output on stdout stays clean for piping. `GOVDOCS_LOG_LEVEL` takes an
//! `EnvFilter` directive and wins over `-v`/`-q`.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::cli::args::{Cli, ColorChoice};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "GOVDOCS_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// One line per event, colored on a terminal.
    #[default]
    Human,
    /// Newline-delimited JSON, one object per event.
    Json,
}

/// Logging choices collected from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub verbosity: u8,
    pub quiet: bool,
    pub color: ColorChoice,
}

impl LogSettings {
    #[must_use]
    pub const fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.log_format,
            verbosity: cli.verbose,
            quiet: cli.quiet,
            color: cli.color,
        }
    }

    /// Default filter directive when `GOVDOCS_LOG_LEVEL` is unset.
    ///
    /// `-q` keeps errors only; otherwise warnings by default, then
    /// `info`, `debug` and `trace` per `-v`.
    #[must_use]
    pub const fn directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Module targets are only interesting from `-vv` up.
    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.verbosity >= 2
    }

    fn ansi(&self) -> bool {
        match self.color {
            ColorChoice::Auto => {
                std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }

    fn stderr_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(self.show_target());
        match self.format {
            LogFormat::Human => layer.with_ansi(self.ansi()).boxed(),
            LogFormat::Json => layer.json().with_current_span(false).boxed(),
        }
    }
}

/// Install the global subscriber.
///
/// A second call is a no-op, so tests may call it freely.
pub fn init_logging(settings: &LogSettings) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(settings.directive()));

    let _ = tracing_subscriber::registry()
        .with(settings.stderr_layer())
        .with(filter)
        .try_init();
}
