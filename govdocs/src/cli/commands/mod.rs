//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod build;
pub mod check;
pub mod completions;
pub mod list;
pub mod serve;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::config::GovDocsConfig;
use crate::error::GovDocsError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the dispatched
/// command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), GovDocsError> {
    match cli.command {
        Commands::Completions(ref args) => {
            completions::run(args);
            return Ok(());
        }
        Commands::Version(ref args) => {
            version::run(args)?;
            return Ok(());
        }
        _ => {}
    }

    let config = GovDocsConfig::load(cli.config.as_deref())?
        .apply_overrides(cli.content_dir.as_deref());
    tracing::debug!(content_dir = %config.content_dir.display(), "configuration loaded");

    match cli.command {
        Commands::Serve(args) => serve::run(&args, &config, cancel).await,
        Commands::Build(args) => build::run(&args, &config),
        Commands::List(args) => list::run(&args, &config),
        Commands::Check(args) => check::run(&args, &config),
        Commands::Completions(_) | Commands::Version(_) => Ok(()),
    }
}
