//! HTTP server for the docs portal.
//!
//! Every request reads the content directory afresh; page generation runs
//! on the blocking pool so filesystem reads never stall the runtime.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::ServerError;
use crate::observability::metrics;
use crate::site::Site;

// ============================================================================
// Server
// ============================================================================

/// Binds `bind` and serves `site` until `cancel` fires.
///
/// # Errors
///
/// Returns [`ServerError`] if the address is invalid, the listener cannot
/// bind, or the server loop fails.
pub async fn serve(site: Site, bind: &str, cancel: CancellationToken) -> Result<(), ServerError> {
    let addr = parse_bind_addr(bind)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    let bound_addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!(%bound_addr, "HTTP server listening");

    axum::serve(listener, build_router(Arc::new(site)))
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .map_err(ServerError::Serve)?;

    debug!("HTTP server shut down");
    Ok(())
}

// ============================================================================
// Axum Router
// ============================================================================

/// Builds the router for every portal surface.
pub fn build_router(site: Arc<Site>) -> Router {
    Router::new()
        .route("/", get(handle_landing))
        .route("/healthz", get(handle_healthz))
        .route("/api/documents", get(handle_documents))
        .route("/fragments/{slug}", get(handle_fragment))
        .route("/{slug}", get(handle_document))
        .fallback(handle_fallback)
        .with_state(site)
}

/// `GET /`
async fn handle_landing(State(site): State<Arc<Site>>) -> Response {
    let started = Instant::now();
    let response = blocking(&site, |site| match site.landing_page() {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_error(&err),
    })
    .await;
    metrics::record_render_duration("landing", started.elapsed());
    finish("landing", response)
}

/// `GET /{slug}`
async fn handle_document(State(site): State<Arc<Site>>, Path(slug): Path<String>) -> Response {
    let started = Instant::now();
    let response = blocking(&site, move |site| match site.document_page(&slug) {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => not_found(site, Some(&slug)),
        Err(err) => internal_error(&err),
    })
    .await;
    metrics::record_render_duration("document", started.elapsed());
    finish("document", response)
}

/// `GET /fragments/{slug}`
async fn handle_fragment(State(site): State<Arc<Site>>, Path(slug): Path<String>) -> Response {
    let started = Instant::now();
    let response = blocking(&site, move |site| match site.fragment(&slug) {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "document not found").into_response(),
        Err(err) => internal_error(&err),
    })
    .await;
    metrics::record_render_duration("fragment", started.elapsed());
    finish("fragment", response)
}

/// `GET /api/documents`
async fn handle_documents(State(site): State<Arc<Site>>) -> Response {
    let response = blocking(&site, |site| match site.documents() {
        Ok(documents) => Json(documents).into_response(),
        Err(err) => internal_error(&err),
    })
    .await;
    finish("api_documents", response)
}

/// `GET /healthz`
async fn handle_healthz() -> Response {
    finish("healthz", "ok".into_response())
}

/// Any other path.
async fn handle_fallback(State(site): State<Arc<Site>>) -> Response {
    let response = blocking(&site, |site| not_found(site, None)).await;
    finish("not_found", response)
}

// ============================================================================
// Helpers
// ============================================================================

/// Runs `render` on the blocking pool.
async fn blocking<F>(site: &Arc<Site>, render: F) -> Response
where
    F: FnOnce(&Site) -> Response + Send + 'static,
{
    let site = Arc::clone(site);
    match tokio::task::spawn_blocking(move || render(site.as_ref())).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "page task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn not_found(site: &Site, requested: Option<&str>) -> Response {
    let started = Instant::now();
    let page = site.not_found_page(requested);
    metrics::record_render_duration("not_found", started.elapsed());
    (StatusCode::NOT_FOUND, Html(page)).into_response()
}

fn internal_error(err: &dyn std::error::Error) -> Response {
    error!(error = %err, "failed to build page");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

fn finish(route: &str, response: Response) -> Response {
    let status = response.status().as_u16();
    metrics::record_request(route, status);
    debug!(route, status, "request served");
    response
}

/// Parses a bind address string into a socket address.
///
/// Accepts:
/// - `:8080` → `0.0.0.0:8080`
/// - `8080` → `0.0.0.0:8080`
/// - `1.2.3.4:8080` → as-is
///
/// # Errors
///
/// Returns [`ServerError::InvalidBindAddress`] if the result cannot be
/// parsed as a valid socket address.
pub fn parse_bind_addr(input: &str) -> Result<SocketAddr, ServerError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServerError::InvalidBindAddress {
            input: input.to_string(),
            message: e.to_string(),
        })
}

// ============================================================================
// Tests
// ============================================================================
