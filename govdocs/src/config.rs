//! Site configuration.
//!
//! Layering, lowest to highest: built-in defaults, the YAML config file,
//! environment variables, command-line flags. Environment variables and
//! flags for the same setting are merged by clap before they reach
//! [`GovDocsConfig::apply_overrides`].

use std::path::{Path, PathBuf};

use govdocs_core::content::loader::DEFAULT_CONTENT_DIR;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "govdocs.yaml";

/// Largest config file accepted, in bytes.
const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

// ============================================================================
// Schema
// ============================================================================

/// Root of `govdocs.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GovDocsConfig {
    /// Directory holding the `.mdx` files, relative to the working
    /// directory.
    pub content_dir: PathBuf,
    /// Header and branding.
    pub site: SiteSettings,
}

impl Default for GovDocsConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            site: SiteSettings::default(),
        }
    }
}

/// Header text, logo and action links shown on every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Small label above the title.
    pub brand: String,
    /// Main heading.
    pub title: String,
    /// Line under the heading.
    pub tagline: String,
    /// Logo image URL; a monogram of `brand` is shown when absent.
    pub logo: Option<String>,
    /// Header action links, in display order.
    pub links: Vec<HeaderLink>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            brand: "ENS DAO".to_string(),
            title: "Governance Docs".to_string(),
            tagline: "Learn about ENS DAO and how to participate in its governance.".to_string(),
            logo: None,
            links: vec![
                HeaderLink::new("ENS Wallets", "https://enswallets.xyz", "wallet"),
                HeaderLink::new("Vote on Tally", "https://www.tally.xyz/gov/ens", "vote"),
                HeaderLink::new("Voting Power", "https://votingpower.xyz", "activity"),
                HeaderLink::new("Follow on X", "https://x.com/ens_dao", "x"),
                HeaderLink::new("Forum", "https://discuss.ens.domains", "forum"),
            ],
        }
    }
}

/// One header action link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderLink {
    /// Accessible label; shown as text when there is no icon.
    pub label: String,
    /// Link target.
    pub href: String,
    /// Icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
    /// Open in a new tab. Defaults to `true` for absolute `http(s)` URLs.
    #[serde(default)]
    pub external: Option<bool>,
}

impl HeaderLink {
    fn new(label: &str, href: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            icon: Some(icon.to_string()),
            external: None,
        }
    }

    /// Whether the link opens in a new tab.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.external
            .unwrap_or_else(|| self.href.starts_with("https://") || self.href.starts_with("http://"))
    }
}

// ============================================================================
// Loading
// ============================================================================

impl GovDocsConfig {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and built-in defaults are
    /// used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is too large,
    /// is not valid YAML, has unknown keys or fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        Self::from_file(&path)
    }

    /// Read and validate a config file.
    ///
    /// # Errors
    ///
    /// See [`GovDocsConfig::load`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size = std::fs::metadata(path).map_err(read_error)?.len();
        if size > MAX_CONFIG_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{size} bytes"),
                expected: format!("at most {MAX_CONFIG_SIZE} bytes"),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(read_error)?;
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
        tracing::info!(config = %path.display(), "loading site configuration");
        Self::from_yaml(raw, path)
    }

    /// Parse configuration text. `path` is used in error messages only.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid YAML or unknown keys and
    /// [`ConfigError::InvalidValue`] for failed validation.
    pub fn from_yaml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line (or environment) overrides.
    #[must_use]
    pub fn apply_overrides(mut self, content_dir: Option<&Path>) -> Self {
        if let Some(dir) = content_dir {
            self.content_dir = dir.to_path_buf();
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.content_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "content_dir".to_string(),
                value: String::new(),
                expected: "a directory path".to_string(),
            });
        }

        for (index, link) in self.site.links.iter().enumerate() {
            if link.label.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("site.links[{index}].label"),
                    value: link.label.clone(),
                    expected: "a non-empty label".to_string(),
                });
            }
            if link.href.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("site.links[{index}].href"),
                    value: link.href.clone(),
                    expected: "a non-empty URL".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<GovDocsConfig, ConfigError> {
        GovDocsConfig::from_yaml(raw, Path::new("govdocs.yaml"))
    }

    #[test]
    fn defaults_match_portal_header() {
        let config = GovDocsConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.site.brand, "ENS DAO");
        assert_eq!(config.site.title, "Governance Docs");
        assert_eq!(config.site.links.len(), 5);
        assert!(config.site.links.iter().all(HeaderLink::is_external));
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse("").unwrap(), GovDocsConfig::default());
        assert_eq!(parse("  \n").unwrap(), GovDocsConfig::default());
    }

    #[test]
    fn partial_site_keeps_other_defaults() {
        let config = parse("site:\n  title: Handbook\n").unwrap();
        assert_eq!(config.site.title, "Handbook");
        assert_eq!(config.site.brand, "ENS DAO");
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn custom_links() {
        let config = parse(
            "content_dir: docs\nsite:\n  links:\n    - label: Home\n      href: /\n    - label: Forum\n      href: https://discuss.ens.domains\n      icon: forum\n",
        )
        .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("docs"));
        assert_eq!(config.site.links.len(), 2);
        assert!(!config.site.links[0].is_external());
        assert!(config.site.links[1].is_external());
        assert_eq!(config.site.links[1].icon.as_deref(), Some("forum"));
    }

    #[test]
    fn explicit_external_wins() {
        let config =
            parse("site:\n  links:\n    - label: Docs\n      href: https://x.y\n      external: false\n")
                .unwrap();
        assert!(!config.site.links[0].is_external());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("sitee:\n  title: x\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
        assert!(err.to_string().contains("sitee"));
    }

    #[test]
    fn empty_link_label_is_rejected() {
        let err = parse("site:\n  links:\n    - label: ''\n      href: /x\n").unwrap_err();
        assert!(err.to_string().contains("site.links[0].label"));
    }

    #[test]
    fn override_content_dir() {
        let config = GovDocsConfig::default().apply_overrides(Some(Path::new("/srv/docs")));
        assert_eq!(config.content_dir, PathBuf::from("/srv/docs"));
        let config = GovDocsConfig::default().apply_overrides(None);
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = GovDocsConfig::load(Some(Path::new("/nonexistent/govdocs.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn reads_file_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yaml");
        std::fs::write(&path, "\u{feff}site:\n  brand: Test\n").unwrap();
        let config = GovDocsConfig::from_file(&path).unwrap();
        assert_eq!(config.site.brand, "Test");
    }
}
