//! `[theme]` section configuration.
//!
//! Selects the rendering theme by name. Whether the name resolves to an
//! installed theme is the renderer's concern, not checked here.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};

/// Theme selection.
#[derive(Debug, Clone, Serialize, Deserialize, Config, PartialEq, Eq)]
#[serde(default)]
#[config(section = "theme")]
pub struct ThemeConfig {
    /// Name of the theme applied when rendering.
    #[config(default = "default")]
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "default".into(),
        }
    }
}

impl ThemeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.name,
                "must not be empty",
                "remove the key to use the default theme",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.theme.name, "default");
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config("[theme]\nname = \"Flex\"");
        assert_eq!(config.theme.name, "Flex");
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let config = test_parse_config("[theme]\nname = \" \"");
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field.as_str(), "theme.name");
    }
}
