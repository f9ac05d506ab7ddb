//! Configuration file generation.
//!
//! Creates egret.toml and ignore files for new sites.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::section::{FeedConfig, SiteInfoConfig, ThemeConfig, WidgetsConfig};

/// Default config filename
const CONFIG_FILE: &str = "egret.toml";

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default output directory, ignored in new sites
const OUTPUT_DIR: &str = "/output/";

/// Commented blogroll example. Entries keep the order they are written in.
const LINKS_TEMPLATE: &str = "\
# Blogroll links, shown in the order written here.
# [[links]]
# name = \"Github\"
# url = \"https://github.com/example\"
";

/// Commented social example. The list stays disabled until uncommented.
const SOCIAL_TEMPLATE: &str = "\
# Social accounts (currently unused by themes).
# [[social]]
# name = \"Twitter\"
# url = \"https://twitter.com/example\"
";

/// Generate egret.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = String::new();

    // Header
    out.push_str(&format!(
        "# Egret configuration file (v{})\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("# https://github.com/egret-ssg/egret\n\n");

    // [site] section
    out.push_str(&SiteInfoConfig::template_with_header());
    out.push('\n');

    // [theme] section
    out.push_str(&ThemeConfig::template_with_header());
    out.push('\n');

    // [feed] section
    out.push_str(&FeedConfig::template_with_header());
    out.push('\n');

    // [[links]] and [[social]] arrays
    out.push_str(LINKS_TEMPLATE);
    out.push('\n');
    out.push_str(SOCIAL_TEMPLATE);
    out.push('\n');

    // [widgets] section
    out.push_str(&WidgetsConfig::template_with_header());

    out
}

/// Write default egret.toml configuration
pub fn write_config(root: &Path) -> Result<()> {
    let content = generate_config_template();

    let path = root.join(CONFIG_FILE);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Write .gitignore and .ignore files with standard patterns
///
/// Patterns include:
/// - Output directory (`/output/`)
/// - OS-specific files (`.DS_Store`)
pub fn write_ignore_files(root: &Path) -> Result<()> {
    let patterns = [OUTPUT_DIR, ".DS_Store"];
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_write_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path()).unwrap();

        let config_path = temp.path().join("egret.toml");
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[site]"));
        assert!(content.contains("[feed]"));
        assert!(content.contains("[widgets]"));
    }

    #[test]
    fn test_write_ignore_files() {
        let temp = TempDir::new().unwrap();
        write_ignore_files(temp.path()).unwrap();

        let gitignore = temp.path().join(".gitignore");
        assert!(gitignore.exists());

        let content = fs::read_to_string(&gitignore).unwrap();
        assert!(content.contains("/output/"));
        assert!(content.contains(".DS_Store"));
    }

    #[test]
    fn test_ignore_files_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        fs::write(&gitignore, "custom content").unwrap();

        write_ignore_files(temp.path()).unwrap();

        let content = fs::read_to_string(&gitignore).unwrap();
        assert_eq!(content, "custom content");
    }

    #[test]
    fn test_template_parses_cleanly() {
        let template = generate_config_template();
        let (config, ignored) = SiteConfig::parse_with_ignored(&template).unwrap();

        assert!(ignored.is_empty(), "template has unknown keys: {ignored:?}");
        assert_eq!(config.site.pagination, 10);
        assert_eq!(config.theme.name, "default");
        assert!(!config.feed.any_enabled());
        assert!(config.links.is_empty());
    }
}
