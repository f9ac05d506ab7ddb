//! Configuration section definitions.
//!
//! Each module corresponds to a section in `egret.toml`:
//!
//! | Module    | TOML Section            | Purpose                          |
//! |-----------|-------------------------|----------------------------------|
//! | `site`    | `[site]`                | Identity, locale, content root   |
//! | `theme`   | `[theme]`               | Theme selection                  |
//! | `feed`    | `[feed]`                | Syndication outputs              |
//! | `links`   | `[[links]]`/`[[social]]`| Blogroll and social icon lists   |
//! | `widgets` | `[widgets]`             | Third-party embed identifiers    |

mod feed;
mod links;
mod site;
mod theme;
mod widgets;

// Re-export section configs
pub use feed::{EnabledFeed, FeedConfig, FeedFormat};
pub use links::{LINKS, Link, SOCIAL, validate_links};
pub use site::SiteInfoConfig;
pub use theme::ThemeConfig;
pub use widgets::WidgetsConfig;
