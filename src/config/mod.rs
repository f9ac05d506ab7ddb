//! Site configuration management for `egret.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/     # Configuration section definitions
//! │   ├── site     # [site]
//! │   ├── theme    # [theme]
//! │   ├── feed     # [feed]
//! │   ├── links    # [[links]] / [[social]]
//! │   └── widgets  # [widgets]
//! ├── types/       # Utility types
//! │   ├── error    # ConfigError, ConfigDiagnostics
//! │   ├── field    # FieldPath
//! │   └── handle   # Global config handle
//! └── mod.rs       # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                       |
//! |--------------|-----------------------------------------------|
//! | `[site]`     | Identity, locale, content root, pagination    |
//! | `[theme]`    | Theme selection                               |
//! | `[feed]`     | Syndication outputs (Atom/RSS)                |
//! | `[[links]]`  | Blogroll links, in display order              |
//! | `[[social]]` | Social icon links, in display order           |
//! | `[widgets]`  | Third-party embed identifiers                 |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{
    EnabledFeed, FeedConfig, FeedFormat, LINKS, Link, SOCIAL, SiteInfoConfig, ThemeConfig,
    WidgetsConfig, validate_links,
};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing egret.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site identity, locale and pagination
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Theme selection
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Feed outputs
    #[serde(default)]
    pub feed: FeedConfig,

    /// Blogroll links, in display order
    #[serde(default)]
    pub links: Vec<Link>,

    /// Social icon links, in display order
    #[serde(default)]
    pub social: Vec<Link>,

    /// Third-party widget identifiers
    #[serde(default)]
    pub widgets: WidgetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteInfoConfig::default(),
            theme: ThemeConfig::default(),
            feed: FeedConfig::default(),
            links: Vec::new(),
            social: Vec::new(),
            widgets: WidgetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// The project root is determined by the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        // Validate config existence (skip for init)
        if !cli.is_init() && !exists {
            log!(
                "error";
                "Config file '{}' not found. Run 'egret init' to create a new site.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        // Load or create default config
        let mut config = if exists && !cli.is_init() {
            debug!("config"; "using {}", config_path.display());
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        // Set paths
        config.config_path = config_path;
        config.finalize(cli);

        // Full validation (skip for init: no config file yet)
        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir()
            .map_err(|err| ConfigError::Io(PathBuf::from("."), err))?;

        match &cli.command {
            Commands::Init {
                name: Some(name), ..
            } => {
                let path = cwd.join(name).join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            Commands::Init { name: None, .. } => {
                let path = cwd.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => {
                // Search upward from cwd
                match find_config_file(&cli.config) {
                    Some(path) => Ok((path, true)),
                    None => Ok((cwd.join(&cli.config), false)),
                }
            }
        }
    }

    /// Finalize configuration after loading.
    ///
    /// Resolves the project root; `site.content` stays relative and is
    /// resolved on demand via [`Self::content_dir`].
    fn finalize(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init {
                name: Some(name), ..
            } => std::env::current_dir().unwrap_or_default().join(name),
            Commands::Init { name: None, .. } => std::env::current_dir().unwrap_or_default(),
            _ => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        self.set_root(&crate::utils::path::normalize_path(&root));
        self.config_path = crate::utils::path::normalize_path(&self.config_path);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub(crate) fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (egret.toml) since it's always at site root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Join a path with the root directory.
    ///
    /// Shorthand for `config.get_root().join(path)`.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute path to the content directory.
    pub fn content_dir(&self) -> PathBuf {
        self.root_join(&self.site.content)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors across sections and returns them
    /// at once. Warnings are printed but do not fail the load.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        // Validate each section
        self.site.validate(self.feed.any_enabled(), &mut diag);
        self.theme.validate(&mut diag);
        self.feed.validate(&mut diag);
        validate_links(LINKS, &self.links, &mut diag);
        validate_links(SOCIAL, &self.social, &mut diag);
        self.widgets.validate(&mut diag);

        // Print collected warnings (grouped display)
        diag.print_warnings();

        // Return all collected errors
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[site]` section.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\nname = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// A config carrying every section, mirroring a real blog setup.
    const FULL_CONFIG: &str = r#"[site]
author = "pybites"
name = "PyBites"
title = "PyBites"
subtitle = "Sharing our Py learning, one bite at a time."
url = "http://pybit.es"
content = "content"
timezone = "Europe/Paris"
language = "en"
pagination = 10

[theme]
name = "Flex"

[feed]
all_atom = "feeds/all.atom.xml"

[[links]]
name = "Github"
url = "https://github.com/pybites"

[[links]]
name = "FB Group"
url = "https://www.facebook.com/groups/1305028816183522/"

[widgets]
twitter = "pybites"
addthis = "ra-5859c6a67eb6254d"
disqus = "http-pybit-es"
"#;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<SiteConfig, _> = toml::from_str("[site\nname = \"My Blog\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = SiteConfig::parse_with_ignored("[site]\nname = \"A\"\nname = \"B\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        // Default root is empty PathBuf, set during config loading
        assert_eq!(config.get_root(), Path::new(""));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
        assert_eq!(config.content_dir(), PathBuf::from("/custom/path/content"));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.name, "");
        assert_eq!(config.site.pagination, 10);
        assert_eq!(config.theme.name, "default");
        assert!(!config.feed.any_enabled());
        assert!(config.links.is_empty());
        assert!(config.social.is_empty());
    }

    #[test]
    fn test_full_config_parses_without_unknown_fields() {
        let (config, ignored) = SiteConfig::parse_with_ignored(FULL_CONFIG).unwrap();
        assert!(ignored.is_empty(), "unknown fields: {ignored:?}");

        assert_eq!(config.site.author, "pybites");
        assert_eq!(config.site.name, "PyBites");
        assert_eq!(config.site.url.as_deref(), Some("http://pybit.es"));
        assert_eq!(config.site.timezone, "Europe/Paris");
        assert_eq!(config.theme.name, "Flex");
        assert_eq!(config.feed.enabled().len(), 1);
        assert_eq!(config.links[0].name, "Github");
        assert_eq!(config.links[1].name, "FB Group");
        assert_eq!(config.widgets.disqus.as_deref(), Some("http-pybit-es"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nname = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.site.name, "Test");

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_unknown_field_inside_known_section_detected() {
        let content = "[site]\nname = \"Test\"\nsitename = \"typo\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f.contains("sitename")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\nname = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_load_is_idempotent() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("egret.toml");
        fs::write(&path, FULL_CONFIG).unwrap();

        let first = SiteConfig::from_path(&path).unwrap();
        let second = SiteConfig::from_path(&path).unwrap();

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("egret.toml");
        fs::write(
            &path,
            r#"[site]
name = "Broken"
timezone = "Mars/Olympus_Mons"
pagination = 0

[feed]
all_atom = "/absolute/feed.xml"
"#,
        )
        .unwrap();

        let mut config = SiteConfig::from_path(&path).unwrap();
        config.config_path = path;
        config.set_root(temp.path());

        let err = config.validate().unwrap_err();
        let diag = match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(diag)) => diag,
            other => panic!("expected diagnostics, got {other:?}"),
        };

        // timezone + pagination + missing url for feed + absolute feed path
        assert_eq!(diag.len(), 4);
    }

    #[test]
    fn test_validate_accepts_full_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("egret.toml");
        fs::write(&path, FULL_CONFIG).unwrap();

        let mut config = SiteConfig::from_path(&path).unwrap();
        config.config_path = path;
        config.set_root(temp.path());

        config.validate().unwrap();
    }
}
