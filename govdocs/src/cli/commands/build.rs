//! `build` command handler: static site generation.
//!
//! Output layout:
//! - `index.html`
//! - `<slug>/index.html` for every valid slug
//! - `fragments/<slug>.html`
//! - `404.html`
//! - `api/documents.json`

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::cli::args::BuildArgs;
use crate::config::GovDocsConfig;
use crate::error::GovDocsError;
use crate::site::{LinkStyle, Site};

/// Render the portal into `args.out`.
///
/// # Errors
///
/// Returns an error if the content directory cannot be read, a document
/// fails to parse or render, or an output file cannot be written.
pub fn run(args: &BuildArgs, config: &GovDocsConfig) -> Result<(), GovDocsError> {
    check_output_dir(&args.out, &config.content_dir)?;

    if args.clean && args.out.exists() {
        tracing::info!(out = %args.out.display(), "removing previous output");
        fs::remove_dir_all(&args.out).map_err(|e| io_context(&args.out, "remove", e))?;
    }

    let site = Site::new(config, LinkStyle::Static);
    let pages = build_site(&site, &args.out)?;

    eprintln!("Built {pages} document pages into {}", args.out.display());
    Ok(())
}

/// Write every page of `site` under `out`, returning the number of document
/// pages written.
///
/// # Errors
///
/// See [`run`].
pub fn build_site(site: &Site, out: &Path) -> Result<usize, GovDocsError> {
    // Enumerate first: a parse failure anywhere fails the build.
    let documents = site.store().list()?;
    tracing::info!(documents = documents.len(), "building static site");

    write_file(&out.join("index.html"), &site.landing_page()?)?;

    let mut pages = 0;
    for slug in site.store().slugs()? {
        let doc = site.store().try_get(&slug)?;
        let body = site.render_body(&doc)?;
        write_file(
            &out.join(&slug).join("index.html"),
            &site.page_for(&doc, &body),
        )?;
        write_file(&out.join("fragments").join(format!("{slug}.html")), &body)?;
        tracing::debug!(slug, "wrote document");
        pages += 1;
    }

    write_file(&out.join("404.html"), &site.not_found_page(None))?;

    let summaries = site.documents()?;
    write_file(
        &out.join("api").join("documents.json"),
        &serde_json::to_string_pretty(&summaries)?,
    )?;

    Ok(pages)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Refuse an output directory that is, or contains, the content directory.
///
/// Both paths are resolved when they exist, so `./content`, symlinks and
/// parents such as `.` are caught. Otherwise the paths are compared as
/// written, ignoring `.` components.
fn check_output_dir(out: &Path, content_dir: &Path) -> Result<(), GovDocsError> {
    let overlaps = match (fs::canonicalize(out), fs::canonicalize(content_dir)) {
        (Ok(out), Ok(content)) => content.starts_with(out),
        _ => without_cur_dir(out) == without_cur_dir(content_dir),
    };
    if overlaps {
        return Err(GovDocsError::Usage(format!(
            "output directory {} would overwrite the content directory {}",
            out.display(),
            content_dir.display()
        )));
    }
    Ok(())
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Write `contents` to `path`, creating parent directories.
fn write_file(path: &Path, contents: &str) -> Result<(), GovDocsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_context(parent, "create", e))?;
    }
    fs::write(path, contents).map_err(|e| io_context(path, "write", e))?;
    Ok(())
}

fn io_context(path: &Path, action: &str, e: std::io::Error) -> GovDocsError {
    GovDocsError::Io(std::io::Error::new(
        e.kind(),
        format!("failed to {action} {}: {e}", path.display()),
    ))
}
