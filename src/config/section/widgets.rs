//! `[widgets]` configuration for third-party embeds.
//!
//! Each key is an opaque identifier passed through to an embed script.
//! A widget is only rendered when its identifier is present.

use crate::config::{ConfigDiagnostics, FieldPath};
use macros::Config;
use serde::{Deserialize, Serialize};

/// Third-party widget identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Config, PartialEq, Eq)]
#[serde(default)]
#[config(section = "widgets")]
pub struct WidgetsConfig {
    /// Twitter handle for the follow button and card metadata.
    #[config(example = "pybites")]
    pub twitter: Option<String>,

    /// AddThis profile id for the sharing toolbar.
    #[config(example = "ra-5859c6a67eb6254d")]
    pub addthis: Option<String>,

    /// Disqus shortname for the comment thread embed.
    #[config(example = "http-pybit-es")]
    pub disqus: Option<String>,
}

impl WidgetsConfig {
    /// Configured widgets, in declaration order.
    pub fn enabled(&self) -> Vec<(FieldPath, &str)> {
        self.slots()
            .into_iter()
            .filter_map(|(field, id)| id.as_deref().map(|id| (field, id)))
            .collect()
    }

    fn slots(&self) -> [(FieldPath, &Option<String>); 3] {
        [
            (Self::FIELDS.twitter, &self.twitter),
            (Self::FIELDS.addthis, &self.addthis),
            (Self::FIELDS.disqus, &self.disqus),
        ]
    }

    /// Validate widget identifiers. Present values must not be blank.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, id) in self.slots() {
            if let Some(id) = id
                && id.trim().is_empty()
            {
                diag.error_with_hint(
                    field,
                    "must not be blank",
                    "remove the key to disable this widget",
                );
            }
        }

        // The handle is inserted into profile URLs, where "@" breaks the link
        if let Some(handle) = &self.twitter
            && handle.starts_with('@')
        {
            diag.warn(Self::FIELDS.twitter, "drop the leading '@' from the handle");
        }
    }
}
