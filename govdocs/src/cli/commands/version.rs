//! Version information display
//!
//! Prints the version and the built-in content tables in human or JSON
//! format.

use std::fmt::Write as _;

use govdocs_core::CATEGORIES;
use govdocs_core::contract::ElementKind;
use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::GovDocsError;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version information.
///
/// # Errors
///
/// Returns [`GovDocsError::Json`] if JSON output cannot be serialized.
pub fn run(args: &VersionArgs) -> Result<(), GovDocsError> {
    match args.format {
        OutputFormat::Human => print!("{}", render_human()),
        OutputFormat::Json => {
            let info = json!({
                "name": NAME,
                "version": VERSION,
                "categories": CATEGORIES.iter().map(|c| c.name).collect::<Vec<_>>(),
                "elements": ElementKind::ALL.iter().map(|k| k.name()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}

/// Version line followed by the category and element tables.
fn render_human() -> String {
    let mut out = format!("{NAME} {VERSION}\n\nCategories:\n");
    for category in CATEGORIES {
        let _ = writeln!(out, "  {:<16} {}", category.name, category.members.join(", "));
    }

    out.push_str("\nElements:\n");
    for kind in ElementKind::ALL {
        let props: Vec<String> = kind
            .props()
            .iter()
            .map(|prop| {
                if prop.required {
                    prop.name.to_string()
                } else {
                    format!("{}?", prop.name)
                }
            })
            .collect();
        let row = format!("  {:<16} {}", kind.name(), props.join(", "));
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_output_lists_tables() {
        let text = render_human();
        assert!(text.starts_with(&format!("{NAME} {VERSION}\n")));
        assert!(text.contains("Categories:\n  Getting Started  index, ENS Token"));
        assert!(text.contains("Elements:\n  Accordion        title\n"));
        assert_eq!(
            text.lines().filter(|l| l.starts_with("  ")).count(),
            CATEGORIES.len() + ElementKind::ALL.len()
        );
    }

    #[test]
    fn optional_props_are_marked() {
        let text = render_human();
        let card = text.lines().find(|l| l.trim_start().starts_with("Card ")).unwrap();
        assert!(card.contains("title"));
        assert!(card.contains("href?"));
    }
}
