//! Page surfaces shared by the HTTP server and the static builder.
//!
//! [`Site`] reads content on every call; nothing is cached between
//! requests.

pub mod document;
pub mod landing;
pub mod layout;
pub mod not_found;

use govdocs_core::category::{group, landing_documents};
use govdocs_core::content::frontmatter::Frontmatter;
use govdocs_core::content::slug::suggest;
use govdocs_core::{ContentError, ContentStore, Document};
use govdocs_mdx::Renderer;
use serde::Serialize;

use crate::config::{GovDocsConfig, SiteSettings};
use crate::error::SiteError;
use crate::observability::metrics;

// ============================================================================
// Links
// ============================================================================

/// How generated pages link to documents and fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Routes served by `govdocs serve`: `/<slug>`, `/fragments/<slug>`.
    Server,
    /// Files written by `govdocs build`: `/<slug>/`, `/fragments/<slug>.html`.
    Static,
}

impl LinkStyle {
    /// Href of a document page. The slug is percent-encoded.
    #[must_use]
    pub fn document_href(self, slug: &str) -> String {
        let encoded = urlencoding::encode(slug);
        match self {
            Self::Server => format!("/{encoded}"),
            Self::Static => format!("/{encoded}/"),
        }
    }

    /// Href of a document's body fragment. The slug is percent-encoded.
    #[must_use]
    pub fn fragment_href(self, slug: &str) -> String {
        let encoded = urlencoding::encode(slug);
        match self {
            Self::Server => format!("/fragments/{encoded}"),
            Self::Static => format!("/fragments/{encoded}.html"),
        }
    }
}

// ============================================================================
// Document Summaries
// ============================================================================

/// A listed document without its body, as served by `/api/documents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    /// URL slug.
    pub slug: String,
    /// Title; may be empty.
    pub title: String,
    /// Description; may be empty.
    pub description: String,
    /// Icon identifier; may be empty.
    pub icon: String,
    /// Href of the document page.
    pub href: String,
    /// Every frontmatter key, in file order.
    pub frontmatter: Frontmatter,
}

// ============================================================================
// Site
// ============================================================================

/// Content store, renderer and header settings bundled for page generation.
#[derive(Debug, Clone)]
pub struct Site {
    store: ContentStore,
    renderer: Renderer,
    settings: SiteSettings,
    links: LinkStyle,
}

impl Site {
    /// Site for a loaded configuration with the reference HTML components.
    #[must_use]
    pub fn new(config: &GovDocsConfig, links: LinkStyle) -> Self {
        Self {
            store: ContentStore::new(&config.content_dir),
            renderer: Renderer::html(),
            settings: config.site.clone(),
            links,
        }
    }

    /// Replace the renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Underlying content store.
    #[must_use]
    pub const fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Complete landing page.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Content`] when the content directory cannot be
    /// listed.
    pub fn landing_page(&self) -> Result<String, SiteError> {
        let documents = self.store.list()?;
        metrics::set_documents_loaded(documents.len());

        let documents = landing_documents(documents);
        let groups = group(&documents);
        tracing::debug!(
            documents = documents.len(),
            categories = groups.len(),
            "rendering landing page"
        );

        let main = landing::landing(&groups, self.links);
        Ok(layout::page(&self.settings, None, &main))
    }

    /// Complete page for `slug`, or `None` when no such document exists.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Render`] when the body has malformed elements.
    pub fn document_page(&self, slug: &str) -> Result<Option<String>, SiteError> {
        let Some(doc) = self.lookup(slug) else {
            return Ok(None);
        };
        let body = self.render_body(&doc)?;
        Ok(Some(self.page_for(&doc, &body)))
    }

    /// Complete page for an already rendered document body.
    #[must_use]
    pub fn page_for(&self, doc: &Document, body_html: &str) -> String {
        let main = document::document(doc, body_html);
        layout::page(&self.settings, Some(&doc.title), &main)
    }

    /// Rendered body of `slug` without the page shell.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Render`] when the body has malformed elements.
    pub fn fragment(&self, slug: &str) -> Result<Option<String>, SiteError> {
        self.lookup(slug)
            .map(|doc| self.render_body(&doc))
            .transpose()
    }

    /// Complete not-found page, suggesting slugs close to `requested`.
    #[must_use]
    pub fn not_found_page(&self, requested: Option<&str>) -> String {
        let candidates = requested
            .map(|_| self.store.slugs().unwrap_or_default())
            .unwrap_or_default();
        let suggestions = requested
            .map(|slug| suggest(slug, candidates.iter().map(String::as_str)))
            .unwrap_or_default();
        let main = not_found::not_found(requested, &suggestions, self.links);
        layout::page(&self.settings, Some("Page not found"), &main)
    }

    /// Listed documents without bodies.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when the content directory cannot be listed.
    pub fn documents(&self) -> Result<Vec<DocumentSummary>, ContentError> {
        let documents = self.store.list()?;
        metrics::set_documents_loaded(documents.len());
        Ok(documents
            .into_iter()
            .map(|doc| DocumentSummary {
                href: self.links.document_href(&doc.slug),
                slug: doc.slug,
                title: doc.title,
                description: doc.description,
                icon: doc.icon,
                frontmatter: doc.frontmatter,
            })
            .collect())
    }

    /// Render a document body, logging any render warnings.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Render`] when the body has malformed elements.
    pub fn render_body(&self, doc: &Document) -> Result<String, SiteError> {
        let output = self
            .renderer
            .render(&doc.body)
            .map_err(|source| SiteError::Render {
                slug: doc.slug.clone(),
                source,
            })?;
        for warning in &output.warnings {
            tracing::warn!(slug = %doc.slug, line = warning.line(), "{warning}");
        }
        Ok(output.html)
    }

    /// Resolve a slug the way `get` does, logging why a lookup failed.
    fn lookup(&self, slug: &str) -> Option<Document> {
        match self.store.try_get(slug) {
            Ok(doc) => Some(doc),
            Err(err) if err.is_not_found() => None,
            Err(err) => {
                tracing::debug!(slug, error = %err, "document unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdocs_core::contract::{Element, ElementKind};
    use govdocs_mdx::Components;

    fn site_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        for (name, source) in files {
            std::fs::write(dir.path().join(name), source).unwrap();
        }
        let config = GovDocsConfig::default().apply_overrides(Some(dir.path()));
        (dir, Site::new(&config, LinkStyle::Server))
    }

    #[test]
    fn custom_renderer_is_used_for_fragments() {
        let (_dir, site) = site_with(&[("voting.mdx", "<Note>Careful</Note>\n")]);
        let components = Components::html().with(ElementKind::Note, |_: &Element, children: &str| {
            format!("<aside>{children}</aside>")
        });
        let site = site.with_renderer(Renderer::new(components));
        let fragment = site.fragment("voting").unwrap().unwrap();
        assert!(fragment.contains("<aside>Careful</aside>"));
    }

    #[test]
    fn unsafe_slug_is_absent() {
        let (_dir, site) = site_with(&[("voting.mdx", "x")]);
        assert!(site.document_page("../voting").unwrap().is_none());
        assert!(site.fragment("").unwrap().is_none());
    }

    #[test]
    fn summaries_keep_frontmatter_order() {
        let (_dir, site) = site_with(&[(
            "voting.mdx",
            "---\ntitle: Voting\nzeta: 1\nalpha: 2\n---\nbody",
        )]);
        let docs = site.documents().unwrap();
        let keys: Vec<&str> = docs[0].frontmatter.keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "zeta", "alpha"]);
        assert_eq!(docs[0].href, "/voting");
    }

    #[test]
    fn not_found_suggests_close_slugs() {
        let (_dir, site) = site_with(&[("voting.mdx", "x")]);
        let page = site.not_found_page(Some("votng"));
        assert!(page.contains("<a href=\"/voting\">voting</a>"));
    }

    #[test]
    fn hrefs_encode_spaces() {
        assert_eq!(LinkStyle::Server.document_href("ENS Token"), "/ENS%20Token");
        assert_eq!(LinkStyle::Static.document_href("voting"), "/voting/");
        assert_eq!(
            LinkStyle::Server.fragment_href("security council"),
            "/fragments/security%20council"
        );
        assert_eq!(
            LinkStyle::Static.fragment_href("voting"),
            "/fragments/voting.html"
        );
    }
}
