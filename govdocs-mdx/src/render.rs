//! MDX to HTML rendering.
//!
//! Each element is rendered by its component and replaced in the
//! surrounding Markdown by a placeholder token. The Markdown is rendered
//! with `pulldown-cmark` and the tokens are swapped back for the element
//! HTML. Block elements get their own paragraph slot so Markdown never wraps
//! them in `<p>`.

use std::fmt;

use govdocs_core::contract::{ContractViolation, Element, ElementKind, validate_props};
use pulldown_cmark::{Options, Parser, html};

use crate::components::Components;
use crate::error::MdxError;
use crate::parse::{ElementNode, Node, Placement, parse};

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

// ============================================================================
// Output
// ============================================================================

/// Rendered HTML plus anything worth telling the author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered HTML fragment.
    pub html: String,
    /// Non-fatal problems, in document order.
    pub warnings: Vec<RenderWarning>,
}

/// A non-fatal problem found while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A capitalized element outside the contract; its children are kept.
    UnknownElement {
        /// Tag name
        name: String,
        /// Line of the opening tag
        line: usize,
    },
    /// A contract element whose props do not conform.
    Contract {
        /// Line of the opening tag
        line: usize,
        /// What is wrong
        violation: ContractViolation,
    },
    /// A contract element with no component registered.
    MissingRenderer {
        /// Element kind
        kind: ElementKind,
        /// Line of the opening tag
        line: usize,
    },
}

impl RenderWarning {
    /// Line the warning refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownElement { line, .. }
            | Self::Contract { line, .. }
            | Self::MissingRenderer { line, .. } => *line,
        }
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { name, line } => {
                write!(f, "line {line}: unknown element <{name}>, rendering its children only")
            }
            Self::Contract { line, violation } => write!(f, "line {line}: {violation}"),
            Self::MissingRenderer { kind, line } => {
                write!(f, "line {line}: no renderer registered for <{kind}>")
            }
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders MDX bodies against a component set.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    components: Components,
}

impl Renderer {
    /// Renderer using the given components.
    #[must_use]
    pub const fn new(components: Components) -> Self {
        Self { components }
    }

    /// Renderer using the reference HTML components.
    #[must_use]
    pub fn html() -> Self {
        Self::new(Components::html())
    }

    /// Registered components.
    #[must_use]
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Render an MDX body to HTML.
    ///
    /// Output is a pure function of `body` and the component set.
    ///
    /// # Errors
    ///
    /// Returns [`MdxError`] when element tags are unbalanced or malformed.
    pub fn render(&self, body: &str) -> Result<RenderOutput, MdxError> {
        let nodes = parse(body)?;
        let mut warnings = Vec::new();
        let html = self.render_nodes(&nodes, false, false, &mut warnings);
        Ok(RenderOutput { html, warnings })
    }

    fn render_nodes(
        &self,
        nodes: &[Node],
        nested: bool,
        phrasing: bool,
        warnings: &mut Vec<RenderWarning>,
    ) -> String {
        let mut source = String::new();
        let mut slots = Vec::new();

        for node in nodes {
            match node {
                Node::Markdown(text) if nested => source.push_str(&dedent(text)),
                Node::Markdown(text) => source.push_str(text),
                Node::Element(el) => {
                    let token = token(slots.len());
                    if el.placement == Placement::Block {
                        source.push_str("\n\n");
                        source.push_str(&token);
                        source.push_str("\n\n");
                    } else {
                        source.push_str(&token);
                    }
                    slots.push(self.render_element(el, warnings));
                }
            }
        }

        let mut out = markdown_to_html(&source);
        if phrasing {
            out = strip_paragraph(&out);
        }

        for (index, slot) in slots.iter().enumerate() {
            let token = token(index);
            out = out.replace(&format!("<p>{token}</p>\n"), slot);
            out = out.replace(&token, slot);
        }
        out
    }

    fn render_element(&self, el: &ElementNode, warnings: &mut Vec<RenderWarning>) -> String {
        let Some(kind) = ElementKind::from_name(&el.name) else {
            warnings.push(RenderWarning::UnknownElement {
                name: el.name.clone(),
                line: el.line,
            });
            return self.render_children(&el.children, warnings);
        };

        warnings.extend(
            validate_props(kind, &el.props)
                .into_iter()
                .map(|violation| RenderWarning::Contract {
                    line: el.line,
                    violation,
                }),
        );

        let element = Element::from_props(kind, &el.props);
        let children = self.render_children(&el.children, warnings);

        match self.components.get(kind) {
            Some(component) => component.render(&element, &children),
            None => {
                warnings.push(RenderWarning::MissingRenderer {
                    kind,
                    line: el.line,
                });
                children
            }
        }
    }

    /// Children on a single line with no block elements render as phrasing
    /// content, without a wrapping paragraph.
    fn render_children(&self, children: &[Node], warnings: &mut Vec<RenderWarning>) -> String {
        let phrasing = children.iter().all(|node| match node {
            Node::Markdown(text) => !text.contains('\n'),
            Node::Element(el) => el.placement == Placement::Inline,
        });
        self.render_nodes(children, true, phrasing, warnings)
    }
}

fn token(index: usize) -> String {
    format!("{TOKEN_OPEN}{index}{TOKEN_CLOSE}")
}

fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(source, options));
    out
}

/// Unwrap a lone `<p>...</p>`.
fn strip_paragraph(html: &str) -> String {
    let trimmed = html.trim_end();
    trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .filter(|inner| !inner.contains("<p>"))
        .map_or_else(|| trimmed.to_string(), str::to_string)
}

/// Remove the common leading indentation of every line after the first.
///
/// The first line continues an enclosing tag's line and is left alone.
fn dedent(text: &str) -> String {
    let indent = text
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    if indent == 0 {
        return text.to_string();
    }

    let mut lines = text.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        out.push_str(line.get(indent..).unwrap_or_else(|| line.trim_start()));
    }
    out
}
