//! Reference HTML presentation.
//!
//! Markup only; styling hooks are `mdx-*` class names picked up by the site
//! stylesheet. Every prop value is escaped before it reaches the output.

use govdocs_core::contract::{
    AccordionProps, ButtonProps, CardGroupProps, CardProps, Element, TabProps, TooltipProps,
};

use super::Component;
use crate::escape::escape_html;

/// Renders every contract element as plain HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlComponent;

impl Component for HtmlComponent {
    fn render(&self, element: &Element, children: &str) -> String {
        match element {
            Element::Accordion(props) => accordion(props, children),
            Element::Info => callout("info", children),
            Element::Note => callout("note", children),
            Element::Card(props) => card(props, children),
            Element::CardGroup(props) => card_group(*props, children),
            Element::Button(props) => button(props, children),
            Element::Tooltip(props) => tooltip(props, children),
            Element::Tabs => format!("<div class=\"mdx-tabs\">{children}</div>"),
            Element::Tab(props) => tab(props, children),
            Element::Frame => format!("<div class=\"mdx-frame\">{children}</div>"),
        }
    }
}

fn accordion(props: &AccordionProps, children: &str) -> String {
    format!(
        "<details class=\"mdx-accordion\"><summary>{}</summary><div class=\"mdx-accordion-body\">{children}</div></details>",
        escape_html(&props.title)
    )
}

fn callout(variant: &str, children: &str) -> String {
    format!("<div class=\"mdx-callout mdx-callout-{variant}\" role=\"note\">{children}</div>")
}

fn card(props: &CardProps, children: &str) -> String {
    let icon = props
        .icon
        .as_deref()
        .map(|icon| format!(" data-icon=\"{}\"", escape_html(icon)))
        .unwrap_or_default();
    let inner = format!(
        "<div class=\"mdx-card\"{icon}><h3 class=\"mdx-card-title\">{}</h3><div class=\"mdx-card-body\">{children}</div></div>",
        escape_html(&props.title)
    );

    match &props.href {
        Some(href) => format!(
            "<a class=\"mdx-card-link\" href=\"{}\">{inner}</a>",
            escape_html(href)
        ),
        None => inner,
    }
}

fn card_group(props: CardGroupProps, children: &str) -> String {
    format!(
        "<div class=\"mdx-card-group\" style=\"--mdx-cols: {}\">{children}</div>",
        props.cols
    )
}

fn button(props: &ButtonProps, children: &str) -> String {
    let arrow = if props.has_leading_arrow() {
        "<span class=\"mdx-button-icon\" aria-hidden=\"true\">&rarr;</span>"
    } else {
        ""
    };
    format!(
        "<a class=\"mdx-button mdx-button-{}\" href=\"{}\">{arrow}{children}</a>",
        props.variant.as_str(),
        escape_html(&props.href)
    )
}

fn tooltip(props: &TooltipProps, children: &str) -> String {
    let tip = escape_html(&props.tip);
    let marker = escape_html(props.marker());
    let marker = match &props.href {
        Some(href) => format!(
            "<a class=\"mdx-tooltip-marker\" href=\"{}\" title=\"{tip}\">{marker}</a>",
            escape_html(href)
        ),
        None => format!("<span class=\"mdx-tooltip-marker\" title=\"{tip}\">{marker}</span>"),
    };
    format!("<span class=\"mdx-tooltip\">{children}{marker}</span>")
}

fn tab(props: &TabProps, children: &str) -> String {
    format!(
        "<section class=\"mdx-tab\"><h3 class=\"mdx-tab-title\">{}</h3>{children}</section>",
        escape_html(&props.title)
    )
}
