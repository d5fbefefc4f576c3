//! Not-found page with "did you mean" suggestions.

use govdocs_mdx::escape::escape_html;

use super::LinkStyle;

/// Main content of the not-found page.
#[must_use]
pub fn not_found(requested: Option<&str>, suggestions: &[&str], links: LinkStyle) -> String {
    let mut sections = Vec::new();
    sections.push("<section class=\"not-found\">".to_string());
    sections.push("<h1>Page not found</h1>".to_string());

    match requested {
        Some(slug) => sections.push(format!(
            "<p>There is no document called <code>{}</code>.</p>",
            escape_html(slug)
        )),
        None => sections.push("<p>The page you asked for does not exist.</p>".to_string()),
    }

    if !suggestions.is_empty() {
        sections.push("<p>Did you mean:</p>".to_string());
        sections.push("<ul>".to_string());
        for slug in suggestions {
            sections.push(format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&links.document_href(slug)),
                escape_html(slug)
            ));
        }
        sections.push("</ul>".to_string());
    }

    sections.push("<p><a href=\"/\">Back to all documents</a></p>".to_string());
    sections.push("</section>".to_string());
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_suggestions() {
        let html = not_found(Some("votin"), &["voting"], LinkStyle::Server);
        assert!(html.contains("<code>votin</code>"));
        assert!(html.contains("<li><a href=\"/voting\">voting</a></li>"));
    }

    #[test]
    fn generic_without_slug() {
        let html = not_found(None, &[], LinkStyle::Static);
        assert!(html.contains("does not exist"));
        assert!(!html.contains("Did you mean"));
    }
}
