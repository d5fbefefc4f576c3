//! Prometheus metrics for the HTTP server.
//!
//! Route labels come from a fixed set so request paths never become label
//! values.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::ServerError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Route labels the server reports under.
const KNOWN_ROUTES: [&str; 5] = ["landing", "document", "fragment", "api_documents", "healthz"];

/// Page surfaces whose render time is recorded.
const KNOWN_SURFACES: [&str; 4] = ["landing", "document", "fragment", "not_found"];

/// Sanitizes a route name for use as a metrics label.
///
/// Returns the original string when it is a known route, or `"__unknown__"`
/// otherwise.
#[must_use]
pub fn sanitize_route_label(route: &str) -> &str {
    if KNOWN_ROUTES.contains(&route) {
        route
    } else {
        "__unknown__"
    }
}

fn sanitize_surface_label(surface: &str) -> &str {
    if KNOWN_SURFACES.contains(&surface) {
        surface
    } else {
        "__unknown__"
    }
}

/// Installs the global metrics recorder with a Prometheus listener on
/// `127.0.0.1:<port>`.
///
/// # Errors
///
/// Returns [`ServerError::Metrics`] if the recorder or HTTP listener cannot
/// be installed (e.g. port already in use).
pub fn init_metrics(port: u16) -> Result<(), ServerError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }

    PrometheusBuilder::new()
        .with_http_listener(([127, 0, 0, 1], port))
        .install()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!(
        "govdocs_requests_total",
        "Total number of HTTP requests by route and status"
    );
    describe_histogram!(
        "govdocs_render_duration_ms",
        "Page render duration in milliseconds"
    );
    describe_gauge!(
        "govdocs_documents_loaded",
        "Documents found in the content directory at the last listing"
    );
}

/// Records a served request.
pub fn record_request(route: &str, status: u16) {
    counter!(
        "govdocs_requests_total",
        "route" => sanitize_route_label(route).to_owned(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Records how long a page surface took to render.
pub fn record_render_duration(surface: &str, duration: Duration) {
    histogram!("govdocs_render_duration_ms", "surface" => sanitize_surface_label(surface).to_owned())
        .record(duration.as_secs_f64() * 1000.0);
}

/// Sets the number of documents seen by the last listing.
#[allow(clippy::cast_precision_loss)]
pub fn set_documents_loaded(count: usize) {
    gauge!("govdocs_documents_loaded").set(count as f64);
}
