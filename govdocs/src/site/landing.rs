//! Landing page: the two-level category accordion.
//!
//! Categories and documents are `<details>` elements, so everything starts
//! collapsed. A document body is fetched from its fragment URL the first
//! time its row is opened.

use govdocs_core::{CategoryGroup, Document};
use govdocs_mdx::escape::escape_html;

use super::LinkStyle;

/// Placeholder shown until a fragment arrives.
pub const LOADING_TEXT: &str = "Loading content...";

const LAZY_LOAD_SCRIPT: &str = r#"document.querySelectorAll('.docs-document').forEach(function (row) {
  row.addEventListener('toggle', function () {
    if (!row.open || row.dataset.state) return;
    row.dataset.state = 'loading';
    var target = row.querySelector('.docs-content');
    fetch(row.dataset.fragment)
      .then(function (res) { if (!res.ok) throw new Error(res.status); return res.text(); })
      .then(function (html) { target.innerHTML = html; row.dataset.state = 'loaded'; })
      .catch(function () {
        delete row.dataset.state;
        target.innerHTML = '<p class="docs-error">Failed to load content.</p>';
      });
  });
});"#;

const CHEVRON: &str = "<span class=\"docs-chevron\" aria-hidden=\"true\">&#8250;</span>";

/// Main content of the landing page.
#[must_use]
pub fn landing(groups: &[CategoryGroup<'_>], links: LinkStyle) -> String {
    let mut sections = Vec::new();
    sections.push("<div class=\"docs-table\">".to_string());
    sections.push(
        "<div class=\"docs-head\"><span>Category</span><span>Description</span><span></span></div>"
            .to_string(),
    );

    if groups.is_empty() {
        sections.push("<p class=\"docs-empty\">No documents yet.</p>".to_string());
    }

    for group in groups {
        sections.push("<details class=\"docs-category\">".to_string());
        sections.push(format!(
            "<summary class=\"docs-row\"><span class=\"docs-name\">{}</span><span class=\"docs-description\"></span>{CHEVRON}</summary>",
            escape_html(group.name)
        ));
        for doc in &group.documents {
            sections.push(document_row(doc, links));
        }
        sections.push("</details>".to_string());
    }

    sections.push("</div>".to_string());
    sections.push(format!("<script>{LAZY_LOAD_SCRIPT}</script>"));
    sections.join("\n")
}

fn document_row(doc: &Document, links: LinkStyle) -> String {
    format!(
        "<details class=\"docs-document\" data-slug=\"{slug}\" data-fragment=\"{fragment}\">\
<summary class=\"docs-row\"><span class=\"docs-name\">{title}</span>\
<span class=\"docs-description\">{description}</span>{CHEVRON}</summary>\
<div class=\"docs-body\"><div class=\"docs-content prose\"><p class=\"docs-loading\">{LOADING_TEXT}</p></div>\
<a class=\"docs-open\" href=\"{href}\">Open page &rarr;</a></div></details>",
        slug = escape_html(&doc.slug),
        fragment = escape_html(&links.fragment_href(&doc.slug)),
        title = escape_html(&doc.title),
        description = escape_html(&doc.description),
        href = escape_html(&links.document_href(&doc.slug)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_core::content::document::parse_document;
    use govdocs_core::group;

    fn doc(slug: &str, title: &str, description: &str) -> Document {
        parse_document(
            slug,
            &format!("---\ntitle: \"{title}\"\ndescription: \"{description}\"\n---\nbody"),
        )
        .unwrap()
    }

    #[test]
    fn categories_in_declared_order_and_collapsed() {
        let docs = vec![
            doc("voting", "Voting", "How votes work"),
            doc("ENS Token", "ENS Token", "The token"),
        ];
        let html = landing(&group(&docs), LinkStyle::Server);

        let getting_started = html.find("Getting Started").unwrap();
        let voting = html.find(">Voting<").unwrap();
        assert!(getting_started < voting);
        assert!(!html.contains("<details open"));
        assert!(html.contains(LOADING_TEXT));
    }

    #[test]
    fn rows_link_fragments_with_encoded_slugs() {
        let docs = vec![doc("ENS Token", "ENS Token", "")];
        let html = landing(&group(&docs), LinkStyle::Server);
        assert!(html.contains("data-fragment=\"/fragments/ENS%20Token\""));
        assert!(html.contains("href=\"/ENS%20Token\""));

        let html = landing(&group(&docs), LinkStyle::Static);
        assert!(html.contains("data-fragment=\"/fragments/ENS%20Token.html\""));
        assert!(html.contains("href=\"/ENS%20Token/\""));
    }

    #[test]
    fn no_groups_renders_empty_state() {
        let html = landing(&[], LinkStyle::Server);
        assert!(html.contains("No documents yet."));
        assert!(html.contains("<span>Category</span>"));
    }

    #[test]
    fn untitled_document_row_has_empty_name() {
        let untitled = parse_document("voting", "no frontmatter").unwrap();
        let html = landing(&group(&[untitled]), LinkStyle::Server);
        assert!(html.contains("<span class=\"docs-name\"></span>"));
        assert!(html.contains("data-slug=\"voting\""));
    }

    #[test]
    fn description_is_escaped() {
        let docs = vec![doc("voting", "Voting", "<b>votes</b>")];
        let html = landing(&group(&docs), LinkStyle::Server);
        assert!(html.contains("&lt;b&gt;votes&lt;/b&gt;"));
    }
}
