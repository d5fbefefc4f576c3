//! Page shell: document head, stylesheet and the site header.

use govdocs_mdx::escape::escape_html;

use crate::config::{HeaderLink, SiteSettings};

const STYLESHEET: &str = include_str!("style.css");

/// Wrap `main` in a complete HTML page.
///
/// `page_title` goes into `<title>` ahead of the site title; the landing
/// page passes `None` and gets the site title as its only `<h1>`.
#[must_use]
pub fn page(settings: &SiteSettings, page_title: Option<&str>, main: &str) -> String {
    let title = match page_title {
        Some(page_title) if !page_title.is_empty() => {
            format!("{} | {}", escape_html(page_title), escape_html(&settings.title))
        }
        _ => escape_html(&settings.title),
    };

    let mut lines = Vec::new();
    lines.push("<!DOCTYPE html>".to_string());
    lines.push("<html lang=\"en\">".to_string());
    lines.push("<head>".to_string());
    lines.push("<meta charset=\"utf-8\">".to_string());
    lines.push(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
    );
    lines.push(format!("<title>{title}</title>"));
    lines.push(format!(
        "<meta name=\"description\" content=\"{}\">",
        escape_html(&settings.tagline)
    ));
    lines.push(format!("<style>{STYLESHEET}</style>"));
    lines.push("</head>".to_string());
    lines.push("<body>".to_string());
    lines.push("<div class=\"site\">".to_string());
    lines.push(header(settings, page_title.is_none()));
    lines.push(format!("<main>{main}</main>"));
    lines.push("</div>".to_string());
    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    lines.join("\n")
}

fn header(settings: &SiteSettings, is_landing: bool) -> String {
    let logo = settings.logo.as_deref().map_or_else(
        || {
            let monogram: String = settings.brand.chars().take(1).collect();
            format!("<span class=\"site-monogram\">{}</span>", escape_html(&monogram))
        },
        |src| {
            format!(
                "<img src=\"{}\" alt=\"{} logo\">",
                escape_html(src),
                escape_html(&settings.brand)
            )
        },
    );

    let heading_tag = if is_landing { "h1" } else { "p" };
    let links: Vec<String> = settings.links.iter().map(header_link).collect();

    format!(
        "<header class=\"site-header\">\
<a class=\"site-home\" href=\"/\"><span class=\"site-logo\">{logo}</span>\
<span class=\"site-heading\"><span class=\"site-brand\">{brand}</span>\
<{heading_tag} class=\"site-title\">{title}</{heading_tag}>\
<span class=\"site-tagline\">{tagline}</span></span></a>\
<nav class=\"site-links\">{links}</nav></header>",
        brand = escape_html(&settings.brand),
        title = escape_html(&settings.title),
        tagline = escape_html(&settings.tagline),
        links = links.join(""),
    )
}

fn header_link(link: &HeaderLink) -> String {
    let target = if link.is_external() {
        " target=\"_blank\" rel=\"noopener noreferrer\""
    } else {
        ""
    };
    let label = escape_html(&link.label);
    let content = match link.icon.as_deref().and_then(icon_svg) {
        Some(svg) => format!("{svg}<span class=\"sr-only\">{label}</span>"),
        None => format!("<span class=\"site-link-label\">{label}</span>"),
    };
    format!(
        "<a class=\"site-link\" href=\"{}\" aria-label=\"{label}\"{target}>{content}</a>",
        escape_html(&link.href)
    )
}

/// Inline SVG for the built-in header icons.
fn icon_svg(name: &str) -> Option<&'static str> {
    let svg = match name {
        "wallet" => {
            r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M19 7V4a1 1 0 0 0-1-1H5a2 2 0 0 0 0 4h15a1 1 0 0 1 1 1v4h-3a2 2 0 0 0 0 4h3a1 1 0 0 0 1-1v-2a1 1 0 0 0-1-1"/><path d="M3 5v14a2 2 0 0 0 2 2h15a1 1 0 0 0 1-1v-4"/></svg>"#
        }
        "vote" => {
            r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="m9 12 2 2 4-4"/><path d="M5 7c0-1.1.9-2 2-2h10a2 2 0 0 1 2 2v12H5V7Z"/><path d="M22 19H2"/></svg>"#
        }
        "activity" => {
            r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M22 12h-4l-3 9L9 3l-3 9H2"/></svg>"#
        }
        "x" => {
            r#"<svg viewBox="0 0 24 24" aria-hidden="true" class="fill"><path d="M18.244 2.25h3.308l-7.227 8.26 8.502 11.24H16.17l-5.214-6.817L4.99 21.75H1.68l7.73-8.835L1.254 2.25H8.08l4.713 6.231zm-1.161 17.52h1.833L7.084 4.126H5.117z"/></svg>"#
        }
        "forum" => {
            r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M7.9 20A9 9 0 1 0 4 16.1L2 22Z"/></svg>"#
        }
        _ => return None,
    };
    Some(svg)
}
