//! `[feed]` configuration.
//!
//! Each key names the output path for one syndication document, relative
//! to the generator's output directory. A key left unset disables that
//! feed, so an empty `[feed]` section produces no feeds at all.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! all_atom = "feeds/all.atom.xml"
//! author_rss = "feeds/{author}.rss.xml"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// Atom 1.0 format (default).
    #[default]
    Atom,
    /// RSS 2.0 format.
    Rss,
}

impl std::fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Atom => write!(f, "atom"),
            Self::Rss => write!(f, "rss"),
        }
    }
}

/// A feed the generator will emit, resolved from one `[feed]` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledFeed<'a> {
    /// Config key that switched this feed on.
    pub key: FieldPath,
    /// Output path relative to the output directory.
    pub path: &'a Path,
    /// Syndication format of the document.
    pub format: FeedFormat,
}

/// Per-scope feed outputs: whole site, per category, per translation,
/// per author. Paths may contain `{slug}`, `{lang}` or `{author}`
/// placeholders, expanded by the generator per emitted document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "feed")]
pub struct FeedConfig {
    /// Atom feed covering every article on the site.
    #[config(example = "feeds/all.atom.xml")]
    pub all_atom: Option<PathBuf>,

    /// Atom feed per category.
    #[config(example = "feeds/{slug}.atom.xml")]
    pub category_atom: Option<PathBuf>,

    /// Atom feed per translation language.
    #[config(example = "feeds/all-{lang}.atom.xml")]
    pub translation_atom: Option<PathBuf>,

    /// Atom feed per author.
    #[config(example = "feeds/{author}.atom.xml")]
    pub author_atom: Option<PathBuf>,

    /// RSS feed per author.
    #[config(example = "feeds/{author}.rss.xml")]
    pub author_rss: Option<PathBuf>,
}

impl FeedConfig {
    /// All configured feeds, in declaration order.
    pub fn enabled(&self) -> Vec<EnabledFeed<'_>> {
        self.slots()
            .into_iter()
            .filter_map(|(key, path, format)| {
                path.as_deref().map(|path| EnabledFeed { key, path, format })
            })
            .collect()
    }

    /// True if at least one feed output is configured.
    pub fn any_enabled(&self) -> bool {
        self.slots().iter().any(|(_, path, _)| path.is_some())
    }

    fn slots(&self) -> [(FieldPath, &Option<PathBuf>, FeedFormat); 5] {
        [
            (Self::FIELDS.all_atom, &self.all_atom, FeedFormat::Atom),
            (Self::FIELDS.category_atom, &self.category_atom, FeedFormat::Atom),
            (Self::FIELDS.translation_atom, &self.translation_atom, FeedFormat::Atom),
            (Self::FIELDS.author_atom, &self.author_atom, FeedFormat::Atom),
            (Self::FIELDS.author_rss, &self.author_rss, FeedFormat::Rss),
        ]
    }

    /// Validate feed output paths.
    ///
    /// # Checks
    /// - Configured paths must be non-empty and relative
    /// - Paths must not escape the output directory via `..`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, path, _) in self.slots() {
            if let Some(path) = path {
                validate_output_path(field, path, diag);
            }
        }
    }
}

fn validate_output_path(field: FieldPath, path: &Path, diag: &mut ConfigDiagnostics) {
    if path.as_os_str().is_empty() {
        diag.error_with_hint(
            field,
            "must not be empty",
            "remove the key to disable this feed",
        );
        return;
    }

    if path.is_absolute() {
        diag.error_with_hint(
            field,
            "must be a relative path",
            "feed paths are resolved inside the output directory, e.g. \"feeds/all.atom.xml\"",
        );
    }

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        diag.error(field, "must not contain `..` components");
    }

    if !path.extension().is_some_and(|ext| ext == "xml") {
        diag.warn(field, "does not end in `.xml`; feed readers expect an XML document");
    }
}
