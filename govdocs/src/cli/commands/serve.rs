//! `serve` command handler.

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::config::GovDocsConfig;
use crate::error::GovDocsError;
use crate::server;
use crate::site::{LinkStyle, Site};

/// Serve the portal over HTTP until `cancel` fires.
///
/// # Errors
///
/// Returns a server error if metrics cannot be installed, the bind address
/// is invalid, or the listener fails.
pub async fn run(
    args: &ServeArgs,
    config: &GovDocsConfig,
    cancel: CancellationToken,
) -> Result<(), GovDocsError> {
    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(port)?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    if !config.content_dir.is_dir() {
        tracing::warn!(
            content_dir = %config.content_dir.display(),
            "content directory does not exist; pages will fail until it is created"
        );
    }

    let site = Site::new(config, LinkStyle::Server);
    server::serve(site, &args.bind, cancel).await?;
    Ok(())
}
