//! Print the resolved configuration.
//!
//! Outputs JSON by default, TOML with `--toml`. The key surface matches
//! egret.toml: unset optional keys are omitted rather than shown as null.

use std::fs;
use std::io::Write;

use anyhow::{Result, bail};
use serde_json::{Map, Value as JsonValue};
use toml::Value as TomlValue;

use crate::cli::args::ShowArgs;
use crate::config::{SiteConfig, cfg};
use crate::log;

pub fn run(args: &ShowArgs) -> Result<()> {
    let config = cfg();
    let formatted = render(&config, args)?;

    // Output to file or stdout
    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{}", formatted)?;
        log!("show"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

fn render(config: &SiteConfig, args: &ShowArgs) -> Result<String> {
    let sections = select_sections(config, args)?;
    if args.toml {
        render_toml(&sections)
    } else {
        render_json(&sections, args.pretty)
    }
}

/// Config sections in display order, as TOML values.
///
/// TOML values have no null, so unset optional keys disappear here.
fn all_sections(config: &SiteConfig) -> Result<Vec<(&'static str, TomlValue)>> {
    Ok(vec![
        ("site", TomlValue::try_from(&config.site)?),
        ("theme", TomlValue::try_from(&config.theme)?),
        ("feed", TomlValue::try_from(&config.feed)?),
        ("links", TomlValue::try_from(&config.links)?),
        ("social", TomlValue::try_from(&config.social)?),
        ("widgets", TomlValue::try_from(&config.widgets)?),
    ])
}

/// Apply --fields and --filter-empty to the section list.
fn select_sections(config: &SiteConfig, args: &ShowArgs) -> Result<Vec<(&'static str, TomlValue)>> {
    let mut sections = all_sections(config)?;

    if let Some(ref fields) = args.fields {
        let mut selected = Vec::new();
        for field in fields {
            match sections.iter().find(|(name, _)| name == field) {
                Some(entry) => selected.push(entry.clone()),
                None => {
                    let known: Vec<_> = sections.iter().map(|(name, _)| *name).collect();
                    bail!(
                        "unknown section '{}', expected one of: {}",
                        field,
                        known.join(", ")
                    );
                }
            }
        }
        sections = selected;
    }

    if args.filter_empty {
        for (_, value) in &mut sections {
            if let TomlValue::Table(table) = value {
                table.retain(|_, v| !is_empty_value(v));
            }
        }
        sections.retain(|(_, value)| !is_empty_value(value));
    }

    Ok(sections)
}

/// Check if a TOML value is considered "empty" ("", [], or {})
fn is_empty_value(value: &TomlValue) -> bool {
    match value {
        TomlValue::String(s) => s.is_empty(),
        TomlValue::Array(arr) => arr.is_empty(),
        TomlValue::Table(table) => table.is_empty(),
        _ => false,
    }
}

fn render_json(sections: &[(&'static str, TomlValue)], pretty: bool) -> Result<String> {
    let mut obj = Map::new();
    for (name, value) in sections {
        obj.insert((*name).to_string(), serde_json::to_value(value)?);
    }

    let json = JsonValue::Object(obj);
    Ok(if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    })
}

/// Render sections as one TOML document.
///
/// A bare `key = value` after a table header belongs to that table, so
/// empty link lists must come before the first `[section]` header.
/// Serializing one combined table applies that ordering to the whole
/// document.
fn render_toml(sections: &[(&'static str, TomlValue)]) -> Result<String> {
    let mut root = toml::map::Map::new();
    for (name, value) in sections {
        root.insert((*name).to_string(), value.clone());
    }
    Ok(toml::to_string_pretty(&TomlValue::Table(root))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn default_args() -> ShowArgs {
        ShowArgs {
            toml: false,
            pretty: false,
            filter_empty: false,
            fields: None,
            output: None,
        }
    }

    #[test]
    fn test_render_json_includes_all_sections() {
        let config = test_parse_config("");
        let out = render(&config, &default_args()).unwrap();

        let json: JsonValue = serde_json::from_str(&out).unwrap();
        assert_eq!(json["site"]["name"], "Test");
        assert_eq!(json["site"]["pagination"], 10);
        assert_eq!(json["theme"]["name"], "default");
        assert!(json["links"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_render_omits_unset_optional_keys() {
        let config = test_parse_config("");
        let out = render(&config, &default_args()).unwrap();

        let json: JsonValue = serde_json::from_str(&out).unwrap();
        assert!(json["site"].get("url").is_none());
        assert!(json["widgets"].get("disqus").is_none());
    }

    #[test]
    fn test_render_fields_filter() {
        let config = test_parse_config("");
        let mut args = default_args();
        args.fields = Some(vec!["theme".into(), "site".into()]);

        let out = render(&config, &args).unwrap();
        let json: JsonValue = serde_json::from_str(&out).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("theme"));
        assert!(obj.contains_key("site"));
        assert!(!obj.contains_key("feed"));
    }

    #[test]
    fn test_render_unknown_field_fails() {
        let config = test_parse_config("");
        let mut args = default_args();
        args.fields = Some(vec!["paginate".into()]);

        let err = render(&config, &args).unwrap_err();
        assert!(err.to_string().contains("unknown section"));
    }

    #[test]
    fn test_render_toml_round_trips() {
        let config = test_parse_config(
            "url = \"https://pybit.es\"\n\n[[links]]\nname = \"Github\"\nurl = \"https://github.com/pybites\"",
        );
        let mut args = default_args();
        args.toml = true;

        let out = render(&config, &args).unwrap();
        let (reparsed, ignored) = SiteConfig::parse_with_ignored(&out).unwrap();
        assert!(ignored.is_empty(), "round-trip produced unknown fields: {ignored:?}");
        assert_eq!(reparsed.site.url, config.site.url);
        assert_eq!(reparsed.links, config.links);
        // The empty list must stay a root key, not a key of links[0]
        assert!(reparsed.social.is_empty());
    }

    #[test]
    fn test_render_toml_emits_empty_lists_before_headers() {
        let config = test_parse_config("");
        let mut args = default_args();
        args.toml = true;

        let out = render(&config, &args).unwrap();
        let (reparsed, ignored) = SiteConfig::parse_with_ignored(&out).unwrap();
        assert!(ignored.is_empty(), "round-trip produced unknown fields: {ignored:?}");
        assert!(reparsed.links.is_empty());
        assert!(reparsed.social.is_empty());
        assert!(!reparsed.feed.any_enabled());
    }

    #[test]
    fn test_render_keeps_declaration_order_within_sections() {
        let config = test_parse_config("");
        let out = render(&config, &default_args()).unwrap();

        let json: JsonValue = serde_json::from_str(&out).unwrap();
        let keys: Vec<&str> = json["site"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "author",
                "name",
                "title",
                "subtitle",
                "relative_urls",
                "content",
                "timezone",
                "language",
                "pagination",
                "extra",
            ]
        );

        let mut args = default_args();
        args.toml = true;
        let out = render(&config, &args).unwrap();
        let timezone = out.find("timezone").unwrap();
        let language = out.find("language").unwrap();
        assert!(timezone < language, "keys must keep declaration order:\n{out}");
    }

    #[test]
    fn test_render_filter_empty_drops_empty_sections() {
        let config = test_parse_config("");
        let mut args = default_args();
        args.filter_empty = true;

        let out = render(&config, &args).unwrap();
        let json: JsonValue = serde_json::from_str(&out).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("site"));
        assert!(obj.contains_key("theme"));
        assert!(!obj.contains_key("feed"));
        assert!(!obj.contains_key("links"));
        assert!(!obj.contains_key("widgets"));
    }
}
