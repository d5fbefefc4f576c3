//! `list` command handler.

use govdocs_core::category::{group, landing_documents};
use govdocs_core::{ContentStore, Document};
use serde_json::{Value, json};

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::GovDocsConfig;
use crate::error::GovDocsError;

/// Print documents in listing order, or grouped as on the landing page.
///
/// # Errors
///
/// Returns an error if the content directory cannot be listed or JSON
/// output cannot be serialized.
pub fn run(args: &ListArgs, config: &GovDocsConfig) -> Result<(), GovDocsError> {
    let store = ContentStore::new(&config.content_dir);
    let documents = store.list()?;
    tracing::info!(documents = documents.len(), "listed content directory");

    let output = if args.grouped {
        let documents = landing_documents(documents);
        render_grouped(&documents, args.format)?
    } else {
        render_flat(&documents, args.format)?
    };
    println!("{output}");
    Ok(())
}

fn render_flat(documents: &[Document], format: OutputFormat) -> Result<String, GovDocsError> {
    match format {
        OutputFormat::Human => {
            if documents.is_empty() {
                return Ok("No documents found.".to_string());
            }
            let width = slug_width(documents.iter());
            Ok(documents
                .iter()
                .map(|doc| human_row(doc, width, ""))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        OutputFormat::Json => {
            let rows: Vec<Value> = documents.iter().map(summary).collect();
            Ok(serde_json::to_string_pretty(&rows)?)
        }
    }
}

fn render_grouped(documents: &[Document], format: OutputFormat) -> Result<String, GovDocsError> {
    let groups = group(documents);
    match format {
        OutputFormat::Human => {
            if groups.is_empty() {
                return Ok("No grouped documents.".to_string());
            }
            let width = slug_width(groups.iter().flat_map(|g| g.documents.iter().copied()));
            let mut lines = Vec::new();
            for category in &groups {
                lines.push(category.name.to_string());
                for doc in &category.documents {
                    lines.push(human_row(doc, width, "  "));
                }
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => {
            let rows: Vec<Value> = groups
                .iter()
                .map(|category| {
                    json!({
                        "category": category.name,
                        "documents": category.documents.iter().map(|doc| summary(doc)).collect::<Vec<_>>(),
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&rows)?)
        }
    }
}

fn summary(doc: &Document) -> Value {
    json!({
        "slug": doc.slug,
        "title": doc.title,
        "description": doc.description,
        "icon": doc.icon,
    })
}

fn slug_width<'a>(documents: impl Iterator<Item = &'a Document>) -> usize {
    documents.map(|doc| doc.slug.chars().count()).max().unwrap_or(0)
}

fn human_row(doc: &Document, width: usize, indent: &str) -> String {
    let mut row = format!("{indent}{:<width$}  {}", doc.slug, doc.title);
    if !doc.description.is_empty() {
        row.push_str(&format!(" ({})", doc.description));
    }
    row.trim_end().to_string()
}
