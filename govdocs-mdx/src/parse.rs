//! MDX body parsing.
//!
//! A body is split into a tree of Markdown runs and elements. Only
//! capitalized tags are elements; lowercase tags are ordinary inline HTML
//! and stay inside the Markdown text. Tags inside fenced code blocks, code
//! spans and after a backslash are literal.

use std::sync::LazyLock;

use govdocs_core::contract::{PropValue, Props};
use regex::Regex;

use crate::error::MdxError;

/// Top-level ESM statements (`import`/`export`) occupy whole lines and are
/// dropped from the body. They only count at the start of a block; the same
/// words continuing a paragraph are text.
static ESM_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:import|export)\s").expect("valid regex"));

// ============================================================================
// Tree
// ============================================================================

/// One node of a parsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Markdown source, rendered as-is.
    Markdown(String),
    /// A capitalized element with its props and children.
    Element(ElementNode),
}

/// Whether an element sits on its own lines or inside running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The element's tags start and end their lines.
    Block,
    /// The element shares a line with surrounding text.
    Inline,
}

/// An element occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Tag name as written.
    pub name: String,
    /// Props in source order.
    pub props: Props,
    /// Child nodes; empty for self-closing tags.
    pub children: Vec<Node>,
    /// Block or inline placement.
    pub placement: Placement,
    /// 1-based line of the opening tag.
    pub line: usize,
}

/// Parse an MDX body into nodes.
///
/// # Errors
///
/// Returns [`MdxError`] for unclosed, unmatched or malformed element tags.
pub fn parse(source: &str) -> Result<Vec<Node>, MdxError> {
    Parser::new(source).run()
}

// ============================================================================
// Parser
// ============================================================================

struct OpenElement {
    name: String,
    props: Props,
    line: usize,
    starts_line: bool,
    children: Vec<Node>,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    line_starts: Vec<usize>,
    text: String,
    stack: Vec<OpenElement>,
    root: Vec<Node>,
    after_esm: bool,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            src,
            pos: 0,
            line_starts,
            text: String::new(),
            stack: Vec::new(),
            root: Vec::new(),
            after_esm: false,
        }
    }

    fn run(mut self) -> Result<Vec<Node>, MdxError> {
        let src = self.src;
        while self.pos < src.len() {
            let rest = &src[self.pos..];

            if self.at_line_start() {
                if self.stack.is_empty() && self.opens_block() && ESM_LINE_RE.is_match(rest) {
                    self.pos += line_len(rest);
                    self.after_esm = true;
                    continue;
                }
                self.after_esm = false;
                if let Some(len) = fenced_block_len(rest) {
                    self.copy(len);
                    continue;
                }
            }

            match rest.as_bytes()[0] {
                b'\\' => self.copy(1 + rest[1..].chars().next().map_or(0, char::len_utf8)),
                b'`' => self.copy(code_span_len(rest)),
                b'{' if rest.starts_with("{/*") => match rest.find("*/}") {
                    Some(end) => self.pos += end + 3,
                    None => self.copy(1),
                },
                b'<' => self.tag(rest)?,
                _ => self.copy(rest.chars().next().map_or(1, char::len_utf8)),
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(MdxError::UnclosedElement {
                name: open.name,
                line: open.line,
            });
        }

        self.flush();
        Ok(self.root)
    }

    /// Handle a `<` at the current position: an element tag, or a literal.
    fn tag(&mut self, rest: &'a str) -> Result<(), MdxError> {
        let line = self.line_of(self.pos);

        if let Some(after) = rest.strip_prefix("</") {
            if let Some(name) = component_name(after) {
                let tail = &after[name.len()..];
                let gap = tail.len() - tail.trim_start().len();
                if tail[gap..].starts_with('>') {
                    let end = self.pos + 2 + name.len() + gap + 1;
                    self.close(name, line, end)?;
                    self.pos = end;
                    return Ok(());
                }
            }
            self.copy(1);
            return Ok(());
        }

        let Some(name) = component_name(&rest[1..]) else {
            self.copy(1);
            return Ok(());
        };
        let after_name = &rest[1 + name.len()..];
        if !after_name
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
        {
            self.copy(1);
            return Ok(());
        }

        let (props, consumed, self_closing) =
            parse_attributes(after_name).map_err(|message| MdxError::MalformedTag {
                name: name.to_string(),
                line,
                message,
            })?;

        let starts_line = self.starts_line(self.pos);
        let end = self.pos + 1 + name.len() + consumed;
        self.flush();

        if self_closing {
            let placement = placement(starts_line, self.ends_line(end));
            self.push_node(Node::Element(ElementNode {
                name: name.to_string(),
                props,
                children: Vec::new(),
                placement,
                line,
            }));
        } else {
            self.stack.push(OpenElement {
                name: name.to_string(),
                props,
                line,
                starts_line,
                children: Vec::new(),
            });
        }

        self.pos = end;
        Ok(())
    }

    fn close(&mut self, name: &str, line: usize, end: usize) -> Result<(), MdxError> {
        self.flush();

        let Some(open) = self.stack.pop() else {
            return Err(MdxError::UnexpectedClose {
                name: name.to_string(),
                line,
            });
        };
        if open.name != name {
            return Err(MdxError::MismatchedClose {
                expected: open.name,
                found: name.to_string(),
                line,
            });
        }

        let placement = placement(open.starts_line, self.ends_line(end));
        self.push_node(Node::Element(ElementNode {
            name: open.name,
            props: open.props,
            children: open.children,
            placement,
            line: open.line,
        }));
        Ok(())
    }

    fn copy(&mut self, len: usize) {
        let end = (self.pos + len).min(self.src.len());
        self.text.push_str(&self.src[self.pos..end]);
        self.pos = end;
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.push_node(Node::Markdown(text));
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.root.push(node),
        }
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.src.as_bytes()[self.pos - 1] == b'\n'
    }

    /// At a line start that begins a block: the start of the body, after a
    /// blank line, or right after a dropped ESM line.
    fn opens_block(&self) -> bool {
        self.after_esm
            || self.pos == 0
            || self.src[..self.pos - 1]
                .rsplit('\n')
                .next()
                .is_some_and(|prev| prev.trim().is_empty())
    }

    fn line_of(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= pos)
    }

    /// Only whitespace between the previous newline and `pos`.
    fn starts_line(&self, pos: usize) -> bool {
        self.src[..pos]
            .rsplit('\n')
            .next()
            .is_some_and(|prefix| prefix.trim().is_empty())
    }

    /// Only whitespace between `pos` and the next newline.
    fn ends_line(&self, pos: usize) -> bool {
        self.src[pos..]
            .split('\n')
            .next()
            .is_some_and(|suffix| suffix.trim().is_empty())
    }
}

const fn placement(starts_line: bool, ends_line: bool) -> Placement {
    if starts_line && ends_line {
        Placement::Block
    } else {
        Placement::Inline
    }
}

// ============================================================================
// Lexical helpers
// ============================================================================

/// Length of the line at the start of `rest`, including its newline.
fn line_len(rest: &str) -> usize {
    rest.find('\n').map_or(rest.len(), |i| i + 1)
}

/// A capitalized tag name at the start of `s`.
fn component_name(s: &str) -> Option<&str> {
    if !s.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let len = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(s.len());
    Some(&s[..len])
}

/// Length of a fenced code block starting at `rest`, if one opens here.
///
/// An unclosed fence runs to the end of the input.
fn fenced_block_len(rest: &str) -> Option<usize> {
    let first = &rest[..line_len(rest)];
    let opener = first.trim_start();
    let fence_char = opener.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let fence_len = opener.chars().take_while(|c| *c == fence_char).count();
    if fence_len < 3 {
        return None;
    }

    let mut offset = first.len();
    while offset < rest.len() {
        let line = &rest[offset..offset + line_len(&rest[offset..])];
        offset += line.len();
        let trimmed = line.trim();
        if trimmed.len() >= fence_len && trimmed.chars().all(|c| c == fence_char) {
            return Some(offset);
        }
    }
    Some(rest.len())
}

/// Length of a code span starting at `rest`, or of the bare backtick run if
/// it is never closed.
fn code_span_len(rest: &str) -> usize {
    let ticks = rest.bytes().take_while(|b| *b == b'`').count();
    let mut i = ticks;
    while let Some(found) = rest[i..].find('`') {
        let start = i + found;
        let run = rest[start..].bytes().take_while(|b| *b == b'`').count();
        if run == ticks {
            return start + run;
        }
        i = start + run;
    }
    ticks
}

/// Parse tag attributes up to and including `>` or `/>`.
///
/// Returns the props, the number of bytes consumed, and whether the tag
/// was self-closing.
fn parse_attributes(s: &str) -> Result<(Props, usize, bool), String> {
    let mut props = Props::new();
    let mut i = 0;

    loop {
        i = skip_whitespace(s, i);
        let rest = &s[i..];
        if rest.is_empty() {
            return Err("tag is never closed with '>'".to_string());
        }
        if rest.starts_with("/>") {
            return Ok((props, i + 2, true));
        }
        if rest.starts_with('>') {
            return Ok((props, i + 1, false));
        }

        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')))
            .unwrap_or(rest.len());
        if name_len == 0 {
            let found = rest.chars().next().unwrap_or(' ');
            return Err(format!("unexpected '{found}' where a prop name was expected"));
        }
        let name = &rest[..name_len];
        i += name_len;

        let after_name = skip_whitespace(s, i);
        if s[after_name..].starts_with('=') {
            i = skip_whitespace(s, after_name + 1);
            let (value, len) =
                parse_value(&s[i..]).map_err(|message| format!("prop '{name}': {message}"))?;
            props.insert(name, value);
            i += len;
        } else {
            props.insert(name, PropValue::Bool(true));
            i = after_name;
        }
    }
}

fn skip_whitespace(s: &str, from: usize) -> usize {
    let rest = &s[from..];
    from + (rest.len() - rest.trim_start().len())
}

/// Parse a prop value: a quoted string or a braced expression.
fn parse_value(s: &str) -> Result<(PropValue, usize), String> {
    match s.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let end = s[1..]
                .find(quote)
                .ok_or_else(|| "string value is never closed".to_string())?;
            Ok((PropValue::String(s[1..=end].to_string()), end + 2))
        }
        Some('{') => {
            let close = matching_brace(s).ok_or_else(|| "expression is never closed".to_string())?;
            let value = expression_value(s[1..close].trim())?;
            Ok((value, close + 1))
        }
        _ => Err("expected a quoted string or a {expression}".to_string()),
    }
}

/// Byte index of the `}` closing the `{` at the start of `s`.
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => in_string = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Literal expressions accepted inside `{...}`: strings, integers, booleans.
fn expression_value(expr: &str) -> Result<PropValue, String> {
    let quoted = ['"', '\'', '`'].into_iter().find_map(|q| {
        expr.strip_prefix(q)
            .and_then(|inner| inner.strip_suffix(q))
    });
    if let Some(inner) = quoted.filter(|_| expr.len() >= 2) {
        return Ok(PropValue::String(inner.to_string()));
    }

    match expr {
        "true" => Ok(PropValue::Bool(true)),
        "false" => Ok(PropValue::Bool(false)),
        _ => expr
            .parse::<i64>()
            .map(PropValue::Integer)
            .map_err(|_| format!("unsupported expression {{{expr}}}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(nodes: &[Node], index: usize) -> &ElementNode {
        match &nodes[index] {
            Node::Element(el) => el,
            Node::Markdown(text) => panic!("expected element, got markdown {text:?}"),
        }
    }

    #[test]
    fn plain_markdown_is_one_run() {
        let nodes = parse("# Title\n\nSome *text*.\n").unwrap();
        assert_eq!(nodes, vec![Node::Markdown("# Title\n\nSome *text*.\n".into())]);
    }

    #[test]
    fn card_with_props_and_children() {
        let nodes = parse(r#"<Card title="X" href="/y">Z</Card>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let card = element(&nodes, 0);
        assert_eq!(card.name, "Card");
        assert_eq!(card.props.get_str("title"), Some("X"));
        assert_eq!(card.props.get_str("href"), Some("/y"));
        assert_eq!(card.children, vec![Node::Markdown("Z".into())]);
        assert_eq!(card.placement, Placement::Block);
        assert_eq!(card.line, 1);
    }

    #[test]
    fn nested_elements() {
        let src = "<CardGroup cols={2}>\n  <Card title=\"A\">a</Card>\n  <Card title='B' />\n</CardGroup>\n";
        let nodes = parse(src).unwrap();
        let group = element(&nodes, 0);
        assert_eq!(group.props.get("cols"), Some(&PropValue::Integer(2)));
        let cards: Vec<&ElementNode> = group
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Element(el) => Some(el),
                Node::Markdown(_) => None,
            })
            .collect();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].line, 2);
        assert_eq!(cards[1].props.get_str("title"), Some("B"));
        assert!(cards[1].children.is_empty());
        assert!(cards.iter().all(|c| c.placement == Placement::Block));
    }

    #[test]
    fn inline_element_in_sentence() {
        let nodes = parse("The <Tooltip tip=\"Decentralized org\">DAO</Tooltip> votes.").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], Node::Markdown("The ".into()));
        assert_eq!(element(&nodes, 1).placement, Placement::Inline);
        assert_eq!(nodes[2], Node::Markdown(" votes.".into()));
    }

    #[test]
    fn element_at_line_start_followed_by_text_is_inline() {
        let nodes = parse("<Tooltip tip=\"x\">DAO</Tooltip> is great").unwrap();
        assert_eq!(element(&nodes, 0).placement, Placement::Inline);
    }

    #[test]
    fn expression_props() {
        let nodes = parse("<Button href={\"/go\"} external={true} weight={-1} disabled />").unwrap();
        let button = element(&nodes, 0);
        assert_eq!(button.props.get_str("href"), Some("/go"));
        assert_eq!(button.props.get("external"), Some(&PropValue::Bool(true)));
        assert_eq!(button.props.get("weight"), Some(&PropValue::Integer(-1)));
        assert_eq!(button.props.get("disabled"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn lowercase_html_stays_markdown() {
        let src = "<div class=\"x\">raw</div> and <br/>";
        assert_eq!(parse(src).unwrap(), vec![Node::Markdown(src.into())]);
    }

    #[test]
    fn tags_in_code_are_literal() {
        let src = "```mdx\n<Card title=\"x\">\n```\n\nUse `<Info>` for notes.\n";
        assert_eq!(parse(src).unwrap(), vec![Node::Markdown(src.into())]);
    }

    #[test]
    fn escaped_angle_is_literal() {
        let src = "a \\<Info> b";
        assert_eq!(parse(src).unwrap(), vec![Node::Markdown(src.into())]);
    }

    #[test]
    fn esm_and_comments_are_dropped() {
        let src = "import { X } from './x'\nexport const meta = {}\n\nHello {/* hidden */}world\n";
        assert_eq!(parse(src).unwrap(), vec![Node::Markdown("\nHello world\n".into())]);
    }

    #[test]
    fn esm_words_inside_a_paragraph_are_text() {
        let src = "Delegates can vote on what to\nimport from the old charter.\n";
        assert_eq!(parse(src).unwrap(), vec![Node::Markdown(src.into())]);
    }

    #[test]
    fn esm_after_blank_line_is_dropped() {
        let src = "Intro\n\nexport const x = 1\nOutro\n";
        assert_eq!(
            parse(src).unwrap(),
            vec![Node::Markdown("Intro\n\nOutro\n".into())]
        );
    }

    #[test]
    fn unclosed_element() {
        let err = parse("text\n<Info>\nnever closed").unwrap_err();
        assert_eq!(
            err,
            MdxError::UnclosedElement {
                name: "Info".into(),
                line: 2
            }
        );
    }

    #[test]
    fn unexpected_close() {
        let err = parse("a\n\nb</Note>").unwrap_err();
        assert!(matches!(err, MdxError::UnexpectedClose { line: 3, .. }));
    }

    #[test]
    fn mismatched_close() {
        let err = parse("<Tabs><Tab title=\"a\">x</Tabs>").unwrap_err();
        assert_eq!(
            err,
            MdxError::MismatchedClose {
                expected: "Tab".into(),
                found: "Tabs".into(),
                line: 1
            }
        );
    }

    #[test]
    fn malformed_attributes() {
        let err = parse("<Card title=\"x>").unwrap_err();
        assert!(matches!(err, MdxError::MalformedTag { .. }));

        let err = parse("<Card icon={<Icon />}>x</Card>").unwrap_err();
        assert!(err.to_string().contains("unsupported expression"));
    }

    #[test]
    fn capitalized_word_after_angle_without_tag_shape_is_literal() {
        let src = "a <B+ grade";
        assert_eq!(parse(src).unwrap(), vec![Node::Markdown(src.into())]);
    }

    #[test]
    fn code_span_lengths() {
        assert_eq!(code_span_len("`a` rest"), 3);
        assert_eq!(code_span_len("``a ` b`` rest"), 9);
        assert_eq!(code_span_len("``never"), 2);
    }

    #[test]
    fn unicode_text_is_preserved() {
        let src = "Délégation — <Info>ℹ️ info</Info> ✓";
        let nodes = parse(src).unwrap();
        assert_eq!(nodes[0], Node::Markdown("Délégation — ".into()));
        assert_eq!(nodes[2], Node::Markdown(" ✓".into()));
    }
}
