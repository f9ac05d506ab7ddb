//! `[site]` configuration.
//!
//! Site identity and locale settings. Every value here ends up in page
//! metadata, feed headers, or listing pagination.

use macros::Config;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

/// Site metadata injected into every rendered page and feed header.
/// For custom fields, use `[site.extra]`; themes can read them by name.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site")]
pub struct SiteInfoConfig {
    /// Default author attributed on pages without their own byline.
    pub author: String,

    /// Site name, rendered in the header and in feed titles.
    pub name: String,

    /// Browser/tab title. Falls back to `name` when empty.
    pub title: String,

    /// Tagline rendered under the site name.
    pub subtitle: String,

    /// Absolute base URL used for canonical links and feed URLs.
    /// Leave unset for local preview builds with relative links.
    #[config(example = "https://example.com")]
    pub url: Option<String>,

    /// Rewrite document links as relative paths instead of absolute URLs.
    pub relative_urls: bool,

    /// Directory the generator scans for source content,
    /// relative to the project root.
    #[config(default = "content")]
    pub content: PathBuf,

    /// IANA timezone used when rendering timestamps.
    #[config(default = "UTC")]
    pub timezone: String,

    /// BCP 47 language tag used for locale-aware rendering.
    #[config(default = "en")]
    pub language: String,

    /// Number of articles per listing page.
    #[config(default = "10")]
    pub pagination: u32,

    /// Custom fields themes can read by name.
    #[serde(default)]
    #[config(skip)]
    pub extra: FxHashMap<String, toml::Value>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            name: String::new(),
            title: String::new(),
            subtitle: String::new(),
            url: None,
            relative_urls: false,
            content: "content".into(),
            timezone: "UTC".into(),
            language: "en".into(),
            pagination: 10,
            extra: FxHashMap::default(),
        }
    }
}

impl SiteInfoConfig {
    /// Browser title, falling back to the site name when unset.
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `feed_enabled`, `url` must be set
    /// - `url` must be a valid absolute URL with an http(s) scheme
    /// - `content` must be a relative path inside the project
    /// - `timezone` must name an IANA tzdb entry
    /// - `language` must be a valid BCP 47 tag
    /// - `pagination` must be at least 1
    pub fn validate(&self, feed_enabled: bool, diag: &mut crate::config::ConfigDiagnostics) {
        // Feeds embed absolute entry URLs, so they require url
        if feed_enabled && self.url.is_none() {
            diag.error_with_hint(
                Self::FIELDS.url,
                format!(
                    "feed outputs are configured but {} is not set",
                    Self::FIELDS.url
                ),
                format!("set {}, e.g.: \"https://example.com\"", Self::FIELDS.url),
            );
        }

        // URL format check using url crate for strict validation
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    // Must be http or https
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    // Must have a valid host
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        self.validate_content_path(diag);
        self.validate_locale(diag);

        if self.pagination == 0 {
            diag.error_with_hint(
                Self::FIELDS.pagination,
                "must be at least 1",
                "set the number of articles per listing page, e.g. 10",
            );
        }

        if self.name.is_empty() {
            diag.warn(
                Self::FIELDS.name,
                "is empty; pages and feeds will carry no site name",
            );
        }
    }

    /// The content directory must stay inside the project root.
    fn validate_content_path(&self, diag: &mut crate::config::ConfigDiagnostics) {
        if self.content.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.content,
                "must not be empty",
                "remove the key to use the default of \"content\"",
            );
            return;
        }

        if self.content.is_absolute() {
            diag.error_with_hint(
                Self::FIELDS.content,
                "must be relative to the project root",
                "use a directory inside the project, e.g. \"content\"",
            );
        }

        if self
            .content
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            diag.error(
                Self::FIELDS.content,
                "must not contain `..` components",
            );
        }
    }

    /// Timezone and language are checked against their standard registries.
    fn validate_locale(&self, diag: &mut crate::config::ConfigDiagnostics) {
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            diag.error_with_hint(
                Self::FIELDS.timezone,
                format!("'{}' is not a known IANA timezone", self.timezone),
                "use a tzdb name like \"Europe/Paris\" or \"UTC\"",
            );
        }

        match language_tags::LanguageTag::parse(&self.language) {
            Ok(tag) => {
                if !tag.is_valid() {
                    diag.error_with_hint(
                        Self::FIELDS.language,
                        format!("'{}' is not a valid BCP 47 language tag", self.language),
                        "use a tag like \"en\", \"fr\" or \"pt-BR\"",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::FIELDS.language,
                    format!("invalid language tag: {e}"),
                    "use a tag like \"en\", \"fr\" or \"pt-BR\"",
                );
            }
        }
    }
}
