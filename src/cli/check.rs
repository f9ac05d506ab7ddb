//! Configuration check command.
//!
//! The config is fully validated during load, so reaching this point
//! means it passed. This command prints a summary of what the generator
//! will build from it.

use crate::config::{SiteConfig, cfg};
use crate::utils::{plural_count, plural_s};
use crate::{debug, log};
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config = cfg();

    log!("check"; "{} is valid", config.config_path.display());
    debug!("check"; "project root: {}", config.get_root().display());

    for (label, value) in summary_lines(&config) {
        println!("{:<10} {}", label.dimmed(), value);
    }

    let content_dir = config.content_dir();
    if !content_dir.exists() {
        log!(
            "warning";
            "content directory '{}' does not exist yet",
            config.site.content.display()
        );
    }

    Ok(())
}

/// Build the summary rows shown after a successful check.
fn summary_lines(config: &SiteConfig) -> Vec<(&'static str, String)> {
    let site = &config.site;

    let name = if site.name.is_empty() {
        "(unnamed)".to_string()
    } else if site.author.is_empty() {
        site.name.clone()
    } else {
        format!("{} by {}", site.name, site.author)
    };

    let url = match &site.url {
        Some(url) if site.relative_urls => format!("{url} (relative links)"),
        Some(url) => url.clone(),
        None => "(not set, local preview only)".to_string(),
    };

    let feeds = if config.feed.any_enabled() {
        config
            .feed
            .enabled()
            .iter()
            .map(|feed| format!("{} ({})", feed.key.as_str(), feed.format))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "none".to_string()
    };

    let links = format!(
        "{}, {} social",
        plural_count(config.links.len(), "link"),
        config.social.len()
    );

    let widgets = if config.widgets.enabled().is_empty() {
        "none".to_string()
    } else {
        config
            .widgets
            .enabled()
            .iter()
            .map(|(field, _)| short_name(field.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        ("site", name),
        ("url", url),
        ("content", site.content.display().to_string()),
        ("theme", config.theme.name.clone()),
        ("locale", format!("{} ({})", site.language, site.timezone)),
        ("feeds", feeds),
        ("links", links),
        ("widgets", widgets),
        (
            "paging",
            format!(
                "{} article{} per page",
                site.pagination,
                plural_s(site.pagination as usize)
            ),
        ),
    ]
}

/// Last segment of a dotted field path (`widgets.disqus` -> `disqus`).
fn short_name(path: &str) -> String {
    path.rsplit('.').next().unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn row<'a>(lines: &'a [(&'static str, String)], label: &str) -> &'a str {
        lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing row '{label}'"))
    }

    #[test]
    fn test_summary_defaults() {
        let config = test_parse_config("");
        let lines = summary_lines(&config);

        assert_eq!(row(&lines, "site"), "Test");
        assert_eq!(row(&lines, "url"), "(not set, local preview only)");
        assert_eq!(row(&lines, "theme"), "default");
        assert_eq!(row(&lines, "locale"), "en (UTC)");
        assert_eq!(row(&lines, "feeds"), "none");
        assert_eq!(row(&lines, "links"), "0 links, 0 social");
        assert_eq!(row(&lines, "widgets"), "none");
        assert_eq!(row(&lines, "paging"), "10 articles per page");
    }

    #[test]
    fn test_summary_full_site() {
        let config = test_parse_config(
            r#"author = "pybites"
url = "http://pybit.es"
timezone = "Europe/Paris"

[feed]
all_atom = "feeds/all.atom.xml"
author_rss = "feeds/{author}.rss.xml"

[[links]]
name = "Github"
url = "https://github.com/pybites"

[widgets]
disqus = "http-pybit-es"
"#,
        );
        let lines = summary_lines(&config);

        assert_eq!(row(&lines, "site"), "Test by pybites");
        assert_eq!(row(&lines, "url"), "http://pybit.es");
        assert_eq!(row(&lines, "locale"), "en (Europe/Paris)");
        assert_eq!(
            row(&lines, "feeds"),
            "feed.all_atom (atom), feed.author_rss (rss)"
        );
        assert_eq!(row(&lines, "links"), "1 link, 0 social");
        assert_eq!(row(&lines, "widgets"), "disqus");
    }

    #[test]
    fn test_summary_single_article_page() {
        let config = test_parse_config("pagination = 1");
        let lines = summary_lines(&config);
        assert_eq!(row(&lines, "paging"), "1 article per page");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("widgets.disqus"), "disqus");
        assert_eq!(short_name("links"), "links");
    }
}
