//! The document record produced by the loader.

use serde::Serialize;

use crate::content::frontmatter::{Frontmatter, split_frontmatter, text_field};
use crate::error::FrontmatterError;

/// A single MDX document: recognized metadata, body, and the raw
/// frontmatter map.
///
/// Records are built once from the filesystem and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// URL-safe identifier, unique across the store.
    pub slug: String,
    /// Heading text from `title`; empty when absent.
    pub title: String,
    /// Short summary from `description`; empty when absent.
    pub description: String,
    /// Icon identifier from `icon`; empty when absent.
    pub icon: String,
    /// MDX body with the frontmatter block stripped.
    pub body: String,
    /// Every key from the frontmatter block, in file order.
    pub frontmatter: Frontmatter,
}

impl Document {
    /// Returns the description when it is non-empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        Some(self.description.as_str()).filter(|d| !d.is_empty())
    }

    /// Returns the icon identifier when it is non-empty.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        Some(self.icon.as_str()).filter(|i| !i.is_empty())
    }
}

/// Parse the text of one MDX file into a [`Document`] with the given slug.
///
/// This is the only parsing path; both directory enumeration and single
/// lookups go through it.
///
/// # Errors
///
/// Returns a [`FrontmatterError`] if the leading metadata block is malformed.
pub fn parse_document(slug: impl Into<String>, source: &str) -> Result<Document, FrontmatterError> {
    let (frontmatter, body) = split_frontmatter(source)?;

    Ok(Document {
        slug: slug.into(),
        title: text_field(&frontmatter, "title"),
        description: text_field(&frontmatter, "description"),
        icon: text_field(&frontmatter, "icon"),
        body: body.to_string(),
        frontmatter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_fields() {
        let doc = parse_document(
            "voting",
            "---\ntitle: Voting\ndescription: Cast your vote\nicon: check-to-slot\norder: 2\n---\nBody\n",
        )
        .unwrap();
        assert_eq!(doc.slug, "voting");
        assert_eq!(doc.title, "Voting");
        assert_eq!(doc.description(), Some("Cast your vote"));
        assert_eq!(doc.icon(), Some("check-to-slot"));
        assert_eq!(doc.body, "Body\n");
        assert_eq!(doc.frontmatter.len(), 4);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let doc = parse_document("bare", "no metadata here").unwrap();
        assert_eq!(doc.title, "");
        assert_eq!(doc.description, "");
        assert_eq!(doc.description(), None);
        assert_eq!(doc.icon(), None);
        assert_eq!(doc.body, "no metadata here");
        assert!(doc.frontmatter.is_empty());
    }

    #[test]
    fn serializes_frontmatter_as_json_object() {
        let doc = parse_document("x", "---\ntitle: X\ntags: [a]\n---\n").unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["title"], "X");
        assert_eq!(json["frontmatter"]["tags"][0], "a");
    }
}
