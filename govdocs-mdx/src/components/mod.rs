//! Pluggable renderers for render-contract elements.
//!
//! A [`Components`] set maps each [`ElementKind`] to a [`Component`]. The
//! renderer looks up the element's kind, resolves typed props, renders the
//! children first and hands both to the component.

pub mod html;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use govdocs_core::contract::{Element, ElementKind};

/// Renders one contract element to HTML.
pub trait Component: Send + Sync {
    /// Render `element` around its already-rendered `children` HTML.
    fn render(&self, element: &Element, children: &str) -> String;
}

impl<F> Component for F
where
    F: Fn(&Element, &str) -> String + Send + Sync,
{
    fn render(&self, element: &Element, children: &str) -> String {
        self(element, children)
    }
}

/// A set of component renderers keyed by element kind.
#[derive(Clone)]
pub struct Components {
    by_kind: BTreeMap<ElementKind, Arc<dyn Component>>,
}

impl Components {
    /// A set with no renderers registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_kind: BTreeMap::new(),
        }
    }

    /// The reference HTML presentation for every contract element.
    #[must_use]
    pub fn html() -> Self {
        ElementKind::ALL
            .into_iter()
            .fold(Self::empty(), |set, kind| set.with(kind, html::HtmlComponent))
    }

    /// Register (or replace) the renderer for `kind`.
    #[must_use]
    pub fn with(mut self, kind: ElementKind, component: impl Component + 'static) -> Self {
        self.by_kind.insert(kind, Arc::new(component));
        self
    }

    /// Renderer registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: ElementKind) -> Option<&dyn Component> {
        self.by_kind.get(&kind).map(Arc::as_ref)
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::html()
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_kind.keys()).finish()
    }
}
