//! Content store access: documents, frontmatter, slugs and the loader.

pub mod document;
pub mod frontmatter;
pub mod loader;
pub mod slug;
