//! YAML frontmatter extraction for MDX documents.
//!
//! A document may open with a block fenced by `---` lines. The block is
//! parsed as a YAML mapping; everything after the closing fence is the body.

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::FrontmatterError;

/// Frontmatter key/value map, in file order.
pub type Frontmatter = IndexMap<String, Value>;

/// Fence line that opens and closes a frontmatter block.
const FENCE: &str = "---";

/// Split `source` into its parsed frontmatter map and the remaining body.
///
/// A file that does not open with a fence line has an empty map and the
/// whole text as body. A leading UTF-8 BOM and CRLF line endings are
/// tolerated.
///
/// # Errors
///
/// Returns [`FrontmatterError::Unterminated`] if the opening fence is never
/// closed, [`FrontmatterError::Yaml`] if the block is not valid YAML, and
/// [`FrontmatterError::NotMapping`] if it parses to something other than a
/// mapping.
pub fn split_frontmatter(source: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some((first, mut rest_start)) = next_line(source, 0) else {
        return Ok((Frontmatter::new(), source));
    };
    if !is_fence(first) {
        return Ok((Frontmatter::new(), source));
    }

    let yaml_start = rest_start;
    while let Some((line, next)) = next_line(source, rest_start) {
        if is_fence(line) {
            let yaml = &source[yaml_start..rest_start];
            let body = &source[next..];
            return Ok((parse_block(yaml)?, body));
        }
        rest_start = next;
    }

    Err(FrontmatterError::Unterminated)
}

/// Returns the line starting at `start` (without its terminator) and the
/// offset of the following line, or `None` once `start` is past the end.
fn next_line(source: &str, start: usize) -> Option<(&str, usize)> {
    if start >= source.len() {
        return None;
    }
    let rest = &source[start..];
    Some(rest.find('\n').map_or((rest, source.len()), |i| {
        (&rest[..i], start + i + 1)
    }))
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

/// Parse the text between the fences into an ordered map.
fn parse_block(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Null => Ok(Frontmatter::new()),
        Value::Mapping(mapping) => Ok(mapping
            .into_iter()
            .filter_map(|(key, value)| scalar_key(&key).map(|k| (k, value)))
            .collect()),
        other => Err(FrontmatterError::NotMapping {
            found: value_kind(&other),
        }),
    }
}

/// Top-level keys are kept when they are scalars; nested structures as keys
/// have no meaningful string form and are dropped.
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Read a frontmatter field as display text.
///
/// Strings are returned as-is, numbers and booleans are stringified, and
/// anything else (missing, null, sequences, mappings) yields an empty string.
#[must_use]
pub fn text_field(frontmatter: &Frontmatter, key: &str) -> String {
    match frontmatter.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_frontmatter() {
        let src = "---\ntitle: Voting\ndescription: How votes work\n---\n# Voting\n\nBody";
        let (fm, body) = split_frontmatter(src).unwrap();
        assert_eq!(text_field(&fm, "title"), "Voting");
        assert_eq!(text_field(&fm, "description"), "How votes work");
        assert_eq!(body, "# Voting\n\nBody");
    }

    #[test]
    fn no_frontmatter_is_all_body() {
        let src = "# Just markdown\n\n---\n\nwith a rule";
        let (fm, body) = split_frontmatter(src).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, src);
    }

    #[test]
    fn empty_file() {
        let (fm, body) = split_frontmatter("").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "");
    }

    #[test]
    fn empty_block() {
        let (fm, body) = split_frontmatter("---\n---\nhello").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "hello");
    }

    #[test]
    fn crlf_and_bom() {
        let src = "\u{feff}---\r\ntitle: ENS Token\r\n---\r\nBody text\r\n";
        let (fm, body) = split_frontmatter(src).unwrap();
        assert_eq!(text_field(&fm, "title"), "ENS Token");
        assert_eq!(body, "Body text\r\n");
    }

    #[test]
    fn closing_fence_at_eof() {
        let (fm, body) = split_frontmatter("---\ntitle: x\n---").unwrap();
        assert_eq!(text_field(&fm, "title"), "x");
        assert_eq!(body, "");
    }

    #[test]
    fn unterminated_block() {
        let err = split_frontmatter("---\ntitle: x\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }

    #[test]
    fn invalid_yaml() {
        let err = split_frontmatter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn scalar_block_is_not_mapping() {
        let err = split_frontmatter("---\njust a string\n---\n").unwrap_err();
        assert!(matches!(
            err,
            FrontmatterError::NotMapping { found: "a string" }
        ));
    }

    #[test]
    fn preserves_key_order_and_extra_keys() {
        let src = "---\nzeta: 1\ntitle: T\nalpha: [a, b]\n---\n";
        let (fm, _) = split_frontmatter(src).unwrap();
        let keys: Vec<&str> = fm.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "title", "alpha"]);
        assert!(matches!(fm.get("alpha"), Some(Value::Sequence(_))));
    }

    #[test]
    fn text_field_coerces_scalars() {
        let (fm, _) = split_frontmatter("---\ntitle: 2024\nicon: true\nlist: [1]\n---\n").unwrap();
        assert_eq!(text_field(&fm, "title"), "2024");
        assert_eq!(text_field(&fm, "icon"), "true");
        assert_eq!(text_field(&fm, "list"), "");
        assert_eq!(text_field(&fm, "missing"), "");
    }

    #[test]
    fn fence_with_trailing_spaces() {
        let (fm, body) = split_frontmatter("---  \ntitle: x\n---   \nbody").unwrap();
        assert_eq!(text_field(&fm, "title"), "x");
        assert_eq!(body, "body");
    }
}
