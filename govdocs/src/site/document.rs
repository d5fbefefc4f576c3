//! Document page: the title as `<h1>` followed by the rendered body.

use govdocs_core::Document;
use govdocs_mdx::escape::escape_html;

/// Main content of a document page.
#[must_use]
pub fn document(doc: &Document, body_html: &str) -> String {
    format!(
        "<article class=\"prose\" data-slug=\"{}\">\n<h1>{}</h1>\n{body_html}</article>",
        escape_html(&doc.slug),
        escape_html(&doc.title)
    )
}
