//! `[[links]]` and `[[social]]` configuration.
//!
//! Both are ordered lists of labelled URLs. Declaration order is display
//! order. `[[links]]` is the blogroll rendered as a navigation widget;
//! `[[social]]` feeds the social icon row and ships commented out in the
//! generated template.
//!
//! # Example
//!
//! ```toml
//! [[links]]
//! name = "Github"
//! url = "https://github.com/pybites"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Field path for the blogroll list.
pub const LINKS: FieldPath = FieldPath::new("links");

/// Field path for the social icon list.
pub const SOCIAL: FieldPath = FieldPath::new("social");

/// A labelled external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Label rendered for the link.
    pub name: String,
    /// Absolute target URL.
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Validate one link list.
///
/// # Checks
/// - Every entry has a non-empty label
/// - Every URL parses as an absolute http(s) URL
///
/// Duplicate labels are reported as warnings; the generator renders
/// them all, which is usually a copy-paste mistake.
pub fn validate_links(field: FieldPath, links: &[Link], diag: &mut ConfigDiagnostics) {
    for (i, link) in links.iter().enumerate() {
        let n = i + 1;

        if link.name.trim().is_empty() {
            diag.error_with_hint(
                field,
                format!("entry {n} has an empty name"),
                "every link needs a label to render",
            );
        }

        match url::Url::parse(&link.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error(
                        field,
                        format!(
                            "entry {n} ('{}'): scheme '{}' not supported, must be http or https",
                            link.name,
                            parsed.scheme()
                        ),
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    field,
                    format!("entry {n} ('{}'): invalid URL: {e}", link.name),
                    "use an absolute URL like \"https://example.com\"",
                );
            }
        }

        if links[..i].iter().any(|other| other.name == link.name) {
            diag.warn(field, format!("duplicate link name '{}'", link.name));
        }
    }
}
