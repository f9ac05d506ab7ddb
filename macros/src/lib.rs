//! Proc macros for egret.
//!
//! # Config derive macro
//!
//! Generates field path accessors and a commented TOML template for a
//! configuration section struct.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "site")]
//! /// Site metadata.
//! pub struct SiteInfoConfig {
//!     /// Author attributed on generated pages.
//!     pub author: String,
//!
//!     /// Absolute site URL.
//!     #[config(example = "https://example.com")]
//!     pub url: Option<String>,
//!
//!     /// Internal field.
//!     #[config(skip)]
//!     pub extra: FxHashMap<String, toml::Value>,
//! }
//!
//! // Generates:
//! // - SiteInfoConfig::FIELDS.author -> FieldPath("site.author")
//! // - SiteInfoConfig::template() -> TOML body with comments
//! // - SiteInfoConfig::template_with_header() -> with `[section]` header
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - TOML section path (inferred from the
//!   struct name when absent: `SiteInfoConfig` → `site_info`)
//!
//! Field-level:
//! - `#[config(skip)]` - Skip from FIELDS and template (internal use)
//! - `#[config(name = "x")]` - Custom TOML field name
//! - `#[config(default = "x")]` - Literal default value in template
//! - `#[config(example = "x")]` - Example value for commented-out optionals

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS and template().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
