//! Render contract: the custom elements an MDX body may use.
//!
//! The contract fixes element names, prop names, prop types and defaults.
//! It says nothing about markup or styling; concrete renderers are supplied
//! by whoever renders the body (see `govdocs-mdx`).

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

// ============================================================================
// Element Kinds
// ============================================================================

/// Every element name the contract recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Collapsible block, collapsed initially.
    Accordion,
    /// Informational callout.
    Info,
    /// Warning callout.
    Note,
    /// Card, optionally linking somewhere.
    Card,
    /// Responsive grid of cards.
    CardGroup,
    /// Link styled as a button.
    Button,
    /// Inline text followed by a hoverable hint marker.
    Tooltip,
    /// Container of [`ElementKind::Tab`] sections.
    Tabs,
    /// One labeled section of a [`ElementKind::Tabs`] container.
    Tab,
    /// Decorative container.
    Frame,
}

impl ElementKind {
    /// All recognized kinds, in contract order.
    pub const ALL: [Self; 10] = [
        Self::Accordion,
        Self::Info,
        Self::Note,
        Self::Card,
        Self::CardGroup,
        Self::Button,
        Self::Tooltip,
        Self::Tabs,
        Self::Tab,
        Self::Frame,
    ];

    /// Tag name as written in MDX.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accordion => "Accordion",
            Self::Info => "Info",
            Self::Note => "Note",
            Self::Card => "Card",
            Self::CardGroup => "CardGroup",
            Self::Button => "Button",
            Self::Tooltip => "Tooltip",
            Self::Tabs => "Tabs",
            Self::Tab => "Tab",
            Self::Frame => "Frame",
        }
    }

    /// Resolve a tag name. Matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Prop schema for this element.
    #[must_use]
    pub const fn props(self) -> &'static [PropSpec] {
        match self {
            Self::Accordion | Self::Tab => TITLED_PROPS,
            Self::Info | Self::Note | Self::Tabs | Self::Frame => &[],
            Self::Card => CARD_PROPS,
            Self::CardGroup => CARD_GROUP_PROPS,
            Self::Button => BUTTON_PROPS,
            Self::Tooltip => TOOLTIP_PROPS,
        }
    }
}

const TITLED_PROPS: &[PropSpec] = &[PropSpec::required("title", PropKind::String)];

const CARD_PROPS: &[PropSpec] = &[
    PropSpec::required("title", PropKind::String),
    PropSpec::optional("icon", PropKind::String),
    PropSpec::optional("href", PropKind::String),
];

const CARD_GROUP_PROPS: &[PropSpec] = &[PropSpec::defaulted("cols", PropKind::Integer, "3")];

const BUTTON_PROPS: &[PropSpec] = &[
    PropSpec::required("href", PropKind::String),
    PropSpec::defaulted("variant", PropKind::Enum(ButtonVariant::NAMES), "primary"),
    PropSpec::optional("icon", PropKind::String),
];

const TOOLTIP_PROPS: &[PropSpec] = &[
    PropSpec::required("tip", PropKind::String),
    PropSpec::optional("cta", PropKind::String),
    PropSpec::optional("href", PropKind::String),
];

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Prop Schema
// ============================================================================

/// Value type a prop accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    /// Free text.
    String,
    /// Whole number.
    Integer,
    /// One of a fixed set of strings.
    Enum(&'static [&'static str]),
}

impl PropKind {
    /// Short description used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Enum(_) => "one of a fixed set of strings",
        }
    }
}

/// Declaration of a single prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropSpec {
    /// Prop name as written in MDX.
    pub name: &'static str,
    /// Accepted value type.
    pub kind: PropKind,
    /// Whether the prop must be present.
    pub required: bool,
    /// Value used when the prop is absent, rendered as text.
    pub default: Option<&'static str>,
}

impl PropSpec {
    const fn required(name: &'static str, kind: PropKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    const fn optional(name: &'static str, kind: PropKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    const fn defaulted(name: &'static str, kind: PropKind, default: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

// ============================================================================
// Prop Values
// ============================================================================

/// A prop value as written on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// `name="text"` or `name={"text"}`.
    String(String),
    /// `name={3}`.
    Integer(i64),
    /// `name={true}` or a bare `name`.
    Bool(bool),
}

impl PropValue {
    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Integer(_) | Self::Bool(_) => None,
        }
    }

    /// Short description used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Integer(_) => "an integer",
            Self::Bool(_) => "a boolean",
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Props of one element occurrence, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props(IndexMap<String, PropValue>);

impl Props {
    /// Creates an empty prop set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a prop. A repeated name keeps its first position and the last
    /// value.
    pub fn insert(&mut self, name: impl Into<String>, value: PropValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns a prop by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    /// Returns a string prop by name; other value types yield `None`.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    /// Iterates props in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of props.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no props are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn string_or_empty(&self, name: &str) -> String {
        self.get_str(name).unwrap_or_default().to_string()
    }

    fn optional_string(&self, name: &str) -> Option<String> {
        self.get_str(name).map(str::to_string)
    }
}

impl<K: Into<String>> FromIterator<(K, PropValue)> for Props {
    fn from_iter<T: IntoIterator<Item = (K, PropValue)>>(iter: T) -> Self {
        let mut props = Self::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

// ============================================================================
// Typed Elements
// ============================================================================

/// Column count used by a `CardGroup` without a valid `cols` prop.
pub const DEFAULT_CARD_GROUP_COLS: u32 = 3;

/// Marker text used by a `Tooltip` without a `cta` prop.
pub const DEFAULT_TOOLTIP_MARKER: &str = "(?)";

/// Button `icon` value that prepends a leading arrow glyph.
pub const ARROW_RIGHT_ICON: &str = "arrow-right";

/// `Accordion` props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionProps {
    /// Header text.
    pub title: String,
}

/// `Card` props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProps {
    /// Heading text.
    pub title: String,
    /// Icon identifier.
    pub icon: Option<String>,
    /// When present, the whole card links here.
    pub href: Option<String>,
}

/// `CardGroup` props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGroupProps {
    /// Grid column count, at least 1.
    pub cols: u32,
}

/// Visual weight of a `Button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Emphasized call to action.
    #[default]
    Primary,
    /// Subdued action.
    Secondary,
}

impl ButtonVariant {
    /// Accepted spellings, used by the prop schema.
    pub const NAMES: &'static [&'static str] = &["primary", "secondary"];

    /// Prop value spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl FromStr for ButtonVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(format!("unknown button variant \"{other}\"")),
        }
    }
}

/// `Button` props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonProps {
    /// Link target.
    pub href: String,
    /// Visual weight.
    pub variant: ButtonVariant,
    /// Icon identifier.
    pub icon: Option<String>,
}

impl ButtonProps {
    /// Whether a leading arrow glyph precedes the label.
    #[must_use]
    pub fn has_leading_arrow(&self) -> bool {
        self.icon.as_deref() == Some(ARROW_RIGHT_ICON)
    }
}

/// `Tooltip` props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipProps {
    /// Hint shown on hover.
    pub tip: String,
    /// Marker text; defaults to [`DEFAULT_TOOLTIP_MARKER`].
    pub cta: Option<String>,
    /// Optional link for the marker.
    pub href: Option<String>,
}

impl TooltipProps {
    /// Text of the hoverable marker.
    #[must_use]
    pub fn marker(&self) -> &str {
        self.cta
            .as_deref()
            .filter(|cta| !cta.is_empty())
            .unwrap_or(DEFAULT_TOOLTIP_MARKER)
    }
}

/// `Tab` props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabProps {
    /// Section label.
    pub title: String,
}

/// A contract element with its props resolved to typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// See [`ElementKind::Accordion`].
    Accordion(AccordionProps),
    /// See [`ElementKind::Info`].
    Info,
    /// See [`ElementKind::Note`].
    Note,
    /// See [`ElementKind::Card`].
    Card(CardProps),
    /// See [`ElementKind::CardGroup`].
    CardGroup(CardGroupProps),
    /// See [`ElementKind::Button`].
    Button(ButtonProps),
    /// See [`ElementKind::Tooltip`].
    Tooltip(TooltipProps),
    /// See [`ElementKind::Tabs`].
    Tabs,
    /// See [`ElementKind::Tab`].
    Tab(TabProps),
    /// See [`ElementKind::Frame`].
    Frame,
}

impl Element {
    /// Resolve raw props into a typed element.
    ///
    /// Resolution never fails: missing text props become empty strings and
    /// malformed enum or integer props fall back to their defaults. Use
    /// [`validate_props`] to find out what was wrong.
    #[must_use]
    pub fn from_props(kind: ElementKind, props: &Props) -> Self {
        match kind {
            ElementKind::Accordion => Self::Accordion(AccordionProps {
                title: props.string_or_empty("title"),
            }),
            ElementKind::Info => Self::Info,
            ElementKind::Note => Self::Note,
            ElementKind::Card => Self::Card(CardProps {
                title: props.string_or_empty("title"),
                icon: props.optional_string("icon"),
                href: props.optional_string("href"),
            }),
            ElementKind::CardGroup => Self::CardGroup(CardGroupProps {
                cols: parse_cols(props.get("cols")),
            }),
            ElementKind::Button => Self::Button(ButtonProps {
                href: props.string_or_empty("href"),
                variant: props
                    .get_str("variant")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_default(),
                icon: props.optional_string("icon"),
            }),
            ElementKind::Tooltip => Self::Tooltip(TooltipProps {
                tip: props.string_or_empty("tip"),
                cta: props.optional_string("cta"),
                href: props.optional_string("href"),
            }),
            ElementKind::Tabs => Self::Tabs,
            ElementKind::Tab => Self::Tab(TabProps {
                title: props.string_or_empty("title"),
            }),
            ElementKind::Frame => Self::Frame,
        }
    }

    /// Kind of this element.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Accordion(_) => ElementKind::Accordion,
            Self::Info => ElementKind::Info,
            Self::Note => ElementKind::Note,
            Self::Card(_) => ElementKind::Card,
            Self::CardGroup(_) => ElementKind::CardGroup,
            Self::Button(_) => ElementKind::Button,
            Self::Tooltip(_) => ElementKind::Tooltip,
            Self::Tabs => ElementKind::Tabs,
            Self::Tab(_) => ElementKind::Tab,
            Self::Frame => ElementKind::Frame,
        }
    }
}

fn parse_cols(value: Option<&PropValue>) -> u32 {
    let cols = match value {
        Some(PropValue::Integer(n)) => u32::try_from(*n).ok(),
        Some(PropValue::String(s)) => s.trim().parse().ok(),
        Some(PropValue::Bool(_)) | None => None,
    };
    cols.filter(|c| *c > 0).unwrap_or(DEFAULT_CARD_GROUP_COLS)
}

// ============================================================================
// Validation
// ============================================================================

/// A way an element occurrence departs from the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// A required prop is absent.
    MissingRequired {
        /// Element carrying the prop
        element: ElementKind,
        /// Missing prop name
        prop: &'static str,
    },
    /// A prop the element does not declare.
    UnknownProp {
        /// Element carrying the prop
        element: ElementKind,
        /// Undeclared prop name
        prop: String,
    },
    /// A prop value of the wrong type.
    WrongType {
        /// Element carrying the prop
        element: ElementKind,
        /// Prop name
        prop: &'static str,
        /// Type the schema declares
        expected: &'static str,
        /// Type that was written
        found: &'static str,
    },
    /// An enum prop with a value outside its set.
    InvalidChoice {
        /// Element carrying the prop
        element: ElementKind,
        /// Prop name
        prop: &'static str,
        /// Value that was written
        value: String,
        /// Accepted values
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { element, prop } => {
                write!(f, "<{element}> is missing required prop '{prop}'")
            }
            Self::UnknownProp { element, prop } => {
                write!(f, "<{element}> has unknown prop '{prop}'")
            }
            Self::WrongType {
                element,
                prop,
                expected,
                found,
            } => write!(
                f,
                "<{element}> prop '{prop}' should be {expected}, got {found}"
            ),
            Self::InvalidChoice {
                element,
                prop,
                value,
                allowed,
            } => write!(
                f,
                "<{element}> prop '{prop}' is \"{value}\", expected one of {}",
                allowed.join(", ")
            ),
        }
    }
}

/// Check one element occurrence against its schema.
///
/// Returns every violation found; an empty list means the props conform.
#[must_use]
pub fn validate_props(kind: ElementKind, props: &Props) -> Vec<ContractViolation> {
    let schema = kind.props();
    let mut violations = Vec::new();

    for spec in schema {
        match props.get(spec.name) {
            None if spec.required => violations.push(ContractViolation::MissingRequired {
                element: kind,
                prop: spec.name,
            }),
            None => {}
            Some(value) => check_value(kind, spec, value, &mut violations),
        }
    }

    for (name, _) in props.iter() {
        if !schema.iter().any(|spec| spec.name == name) {
            violations.push(ContractViolation::UnknownProp {
                element: kind,
                prop: name.to_string(),
            });
        }
    }

    violations
}

fn check_value(
    kind: ElementKind,
    spec: &PropSpec,
    value: &PropValue,
    violations: &mut Vec<ContractViolation>,
) {
    let matches_type = matches!(
        (spec.kind, value),
        (PropKind::String | PropKind::Enum(_), PropValue::String(_))
            | (PropKind::Integer, PropValue::Integer(_))
    );
    if !matches_type {
        violations.push(ContractViolation::WrongType {
            element: kind,
            prop: spec.name,
            expected: spec.kind.describe(),
            found: value.describe(),
        });
        return;
    }

    if let (PropKind::Enum(allowed), PropValue::String(s)) = (spec.kind, value) {
        if !allowed.contains(&s.as_str()) {
            violations.push(ContractViolation::InvalidChoice {
                element: kind,
                prop: spec.name,
                value: s.clone(),
                allowed,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, PropValue)]) -> Props {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn s(text: &str) -> PropValue {
        PropValue::String(text.to_string())
    }

    #[test]
    fn names_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ElementKind::from_name("card"), None);
        assert_eq!(ElementKind::from_name("Callout"), None);
    }

    #[test]
    fn card_group_defaults_to_three_columns() {
        let el = Element::from_props(ElementKind::CardGroup, &Props::new());
        assert_eq!(el, Element::CardGroup(CardGroupProps { cols: 3 }));

        let el = Element::from_props(ElementKind::CardGroup, &props(&[("cols", PropValue::Integer(2))]));
        assert_eq!(el, Element::CardGroup(CardGroupProps { cols: 2 }));

        let el = Element::from_props(ElementKind::CardGroup, &props(&[("cols", PropValue::Integer(0))]));
        assert_eq!(el, Element::CardGroup(CardGroupProps { cols: 3 }));
    }

    #[test]
    fn button_defaults() {
        let Element::Button(button) =
            Element::from_props(ElementKind::Button, &props(&[("href", s("/vote"))]))
        else {
            panic!("expected button");
        };
        assert_eq!(button.href, "/vote");
        assert_eq!(button.variant, ButtonVariant::Primary);
        assert!(!button.has_leading_arrow());
    }

    #[test]
    fn button_arrow_and_variant() {
        let Element::Button(button) = Element::from_props(
            ElementKind::Button,
            &props(&[
                ("href", s("/x")),
                ("variant", s("secondary")),
                ("icon", s("arrow-right")),
            ]),
        ) else {
            panic!("expected button");
        };
        assert_eq!(button.variant, ButtonVariant::Secondary);
        assert!(button.has_leading_arrow());
    }

    #[test]
    fn tooltip_marker_defaults() {
        let Element::Tooltip(tip) =
            Element::from_props(ElementKind::Tooltip, &props(&[("tip", s("hint"))]))
        else {
            panic!("expected tooltip");
        };
        assert_eq!(tip.marker(), "(?)");

        let Element::Tooltip(tip) = Element::from_props(
            ElementKind::Tooltip,
            &props(&[("tip", s("hint")), ("cta", s("more"))]),
        ) else {
            panic!("expected tooltip");
        };
        assert_eq!(tip.marker(), "more");
    }

    #[test]
    fn missing_title_resolves_to_empty() {
        let el = Element::from_props(ElementKind::Card, &Props::new());
        assert_eq!(
            el,
            Element::Card(CardProps {
                title: String::new(),
                icon: None,
                href: None,
            })
        );
        assert_eq!(el.kind(), ElementKind::Card);
    }

    #[test]
    fn validate_conforming_props() {
        let violations = validate_props(
            ElementKind::Card,
            &props(&[("title", s("X")), ("href", s("/y"))]),
        );
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn validate_reports_each_problem() {
        let violations = validate_props(
            ElementKind::Button,
            &props(&[
                ("variant", s("tertiary")),
                ("icon", PropValue::Integer(1)),
                ("target", s("_blank")),
            ]),
        );
        assert_eq!(violations.len(), 4);
        assert!(violations.contains(&ContractViolation::MissingRequired {
            element: ElementKind::Button,
            prop: "href",
        }));
        assert!(violations.iter().any(|v| matches!(v, ContractViolation::InvalidChoice { .. })));
        assert!(violations.iter().any(|v| matches!(v, ContractViolation::WrongType { prop: "icon", .. })));
        assert!(violations.iter().any(|v| matches!(v, ContractViolation::UnknownProp { prop, .. } if prop == "target")));
    }

    #[test]
    fn violation_messages() {
        let v = ContractViolation::MissingRequired {
            element: ElementKind::Tab,
            prop: "title",
        };
        assert_eq!(v.to_string(), "<Tab> is missing required prop 'title'");
    }

    #[test]
    fn string_cols_is_a_type_violation() {
        let violations = validate_props(ElementKind::CardGroup, &props(&[("cols", s("2"))]));
        assert!(matches!(
            violations.as_slice(),
            [ContractViolation::WrongType { prop: "cols", .. }]
        ));
    }
}
