//! `govdocs` Core - content model and shared contracts
//!
//! This crate provides the document model, the content loader, the slug
//! override table, the landing-page category index and the render contract
//! shared across `govdocs` (CLI/server) and `govdocs-mdx` (body rendering).

pub mod category;
pub mod content;
pub mod contract;
pub mod error;

pub use category::{CATEGORIES, Category, CategoryGroup, group};
pub use content::document::Document;
pub use content::loader::ContentStore;
pub use error::{ContentError, FrontmatterError};
