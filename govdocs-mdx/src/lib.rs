//! `govdocs` MDX - body parsing and HTML rendering
//!
//! Splits MDX bodies into Markdown runs and render-contract elements, then
//! renders them to HTML with a pluggable component set. Markdown runs go
//! through `pulldown-cmark`.

pub mod components;
pub mod error;
pub mod escape;
pub mod parse;
pub mod render;

pub use components::{Component, Components};
pub use error::MdxError;
pub use parse::{ElementNode, Node, Placement, parse};
pub use render::{RenderOutput, RenderWarning, Renderer};
