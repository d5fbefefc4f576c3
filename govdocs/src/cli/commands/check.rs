//! `check` command handler.
//!
//! Parses and renders every document without writing anything, then reports
//! render errors, render warnings, category members that match nothing and
//! documents no category mentions.

use govdocs_core::category::{landing_documents, ungrouped, unmatched_members};
use govdocs_core::{ContentStore, Document};
use govdocs_mdx::Renderer;
use serde::Serialize;

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::GovDocsConfig;
use crate::error::GovDocsError;

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Document the finding belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// 1-based body line, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable description, including the line when known.
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.slug {
            Some(slug) => write!(f, "{slug}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Outcome of checking a content directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of documents examined.
    pub documents: usize,
    /// Problems that fail the check.
    pub errors: Vec<Finding>,
    /// Problems that fail the check only in strict mode.
    pub warnings: Vec<Finding>,
    /// Slugs reachable only by direct URL.
    pub ungrouped: Vec<String>,
}

impl CheckReport {
    /// Whether the report fails the check.
    #[must_use]
    pub fn failed(&self, strict: bool) -> bool {
        !self.errors.is_empty() || (strict && !self.warnings.is_empty())
    }
}

/// Check every document in the content directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a document cannot
/// be parsed, and [`GovDocsError::CheckFailed`] when the report has errors
/// (or warnings with `--strict`).
pub fn run(args: &CheckArgs, config: &GovDocsConfig) -> Result<(), GovDocsError> {
    let store = ContentStore::new(&config.content_dir);
    let documents = store.list()?;
    let report = check_documents(documents, &Renderer::html());

    match args.format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.failed(args.strict) {
        return Err(GovDocsError::CheckFailed {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        });
    }
    Ok(())
}

/// Render every document and collect findings.
#[must_use]
pub fn check_documents(documents: Vec<Document>, renderer: &Renderer) -> CheckReport {
    let mut report = CheckReport {
        documents: documents.len(),
        ..CheckReport::default()
    };

    for doc in &documents {
        match renderer.render(&doc.body) {
            Ok(output) => {
                tracing::debug!(slug = %doc.slug, warnings = output.warnings.len(), "rendered");
                report
                    .warnings
                    .extend(output.warnings.iter().map(|warning| Finding {
                        slug: Some(doc.slug.clone()),
                        line: Some(warning.line()),
                        message: warning.to_string(),
                    }));
            }
            Err(err) => report.errors.push(Finding {
                slug: Some(doc.slug.clone()),
                line: Some(err.line()),
                message: err.to_string(),
            }),
        }
    }

    report
        .warnings
        .extend(unmatched_members(&documents).iter().map(|unmatched| Finding {
            slug: None,
            line: None,
            message: unmatched.to_string(),
        }));

    let landing = landing_documents(documents);
    report.ungrouped = ungrouped(&landing)
        .into_iter()
        .map(|doc| doc.slug.clone())
        .collect();

    report
}

fn print_human(report: &CheckReport) {
    for finding in &report.errors {
        println!("error: {finding}");
    }
    for finding in &report.warnings {
        println!("warning: {finding}");
    }
    for slug in &report.ungrouped {
        println!("info: {slug}: not in any category; reachable by direct URL only");
    }
    println!(
        "checked {} document(s): {} error(s), {} warning(s)",
        report.documents,
        report.errors.len(),
        report.warnings.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_core::content::document::parse_document;

    fn doc(slug: &str, body: &str) -> Document {
        parse_document(slug, body).unwrap()
    }

    #[test]
    fn render_error_is_an_error() {
        let report = check_documents(vec![doc("voting", "<Note>\nopen")], &Renderer::html());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].slug.as_deref(), Some("voting"));
        assert_eq!(report.errors[0].line, Some(1));
        assert!(report.failed(false));
    }

    #[test]
    fn unknown_element_is_a_warning() {
        let report = check_documents(vec![doc("voting", "<Widget>x</Widget>")], &Renderer::html());
        assert!(report.errors.is_empty());
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.slug.as_deref() == Some("voting") && w.message.contains("Widget"))
        );
        assert!(!report.failed(false));
        assert!(report.failed(true));
    }

    #[test]
    fn unmatched_members_are_warnings() {
        let report = check_documents(vec![doc("voting", "ok")], &Renderer::html());
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.slug.is_none() && w.message.contains("\"delegating\""))
        );
    }

    #[test]
    fn ungrouped_excludes_welcome() {
        let report = check_documents(
            vec![doc("welcome", "hi"), doc("faq", "q"), doc("voting", "v")],
            &Renderer::html(),
        );
        assert_eq!(report.ungrouped, ["faq"]);
        assert_eq!(report.documents, 3);
    }

    #[test]
    fn finding_display() {
        let finding = Finding {
            slug: Some("voting".to_string()),
            line: Some(4),
            message: "line 4: bad".to_string(),
        };
        assert_eq!(finding.to_string(), "voting: line 4: bad");
    }
}
