//! Knihovka: a Zellij plugin for browsing a book-catalog server.
//!
//! Knihovka is a terminal client for a Calibre-style catalog API. It
//! provides:
//! - Book and author listings fetched over plain HTTP GET (JSON)
//! - Debounced text search with substring match highlighting
//! - Derived series and author drill-down navigation with scroll-position
//!   memory
//! - Progressive (grow-the-slice) list loading with an end-of-list trigger
//! - Light/dark theming with TOML theme files
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action dispatching               │
//! │  - List search + progressive loading                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────────────┐
//! │ UI Layer      │   │ API Layer (api/)      │
//! │ (ui/)         │   │ - Typed queries       │
//! │ - Rendering   │   │ - Response decoding   │
//! │ - Theming     │   │ - Query cache + dedup │
//! │ - Components  │   │                       │
//! └───────────────┘   └───────────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Book/Author models, series grouping (domain/)    │
//! │  - Errors, Czech localization (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/knihovka.wasm" {
//!         api_base "http://localhost:8083/api"
//!         recent_limit "9"
//!         theme "dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Event flow
//!
//! 1. **Plugin load** (`main.rs`): parse configuration, initialize tracing,
//!    create [`AppState`](app::AppState), subscribe to events, request
//!    `WebAccess`
//! 2. **Permission grant**: dispatch the initial fetches (counts, recent
//!    books) through the cache-aware query layer
//! 3. **Fetch completion**: `WebRequestResult` events carry the originating
//!    query in their context map; decoded payloads fill the state slots
//! 4. **Rendering**: compute a view model from state, render components
//!    (header, search, table, detail pane, footer)
//! 5. **Input**: keys map to events; debounce/load-more/restore run on host
//!    timeouts resolved by the app-side timer queue

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Page, SearchFocus};
pub use domain::{Author, Book, KnihovkaError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Values are provided via Zellij's KDL layout configuration and passed to
/// the plugin during initialization.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog API.
    ///
    /// Default: `http://localhost:8083/api`
    pub api_base: String,

    /// Number of recent books shown on the landing page.
    ///
    /// Default: 9
    pub recent_limit: u32,

    /// Initial theme variant, `"light"` (default) or `"dark"`.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// The custom theme replaces the dark slot of the light/dark pair and
    /// becomes the startup variant. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8083/api".to_string(),
            recent_limit: 9,
            theme: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. Typed values are extracted with fallback
    /// defaults; a malformed `recent_limit` falls back to 9.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use knihovka::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "http://books.local/api".to_string());
    /// map.insert("recent_limit".to_string(), "12".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base, "http://books.local/api");
    /// assert_eq!(config.recent_limit, 12);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_base = config
            .get("api_base")
            .map(|base| base.trim().to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or(defaults.api_base);

        let recent_limit = config
            .get("recent_limit")
            .and_then(|limit| limit.parse::<u32>().ok())
            .unwrap_or(defaults.recent_limit);

        Self {
            api_base,
            recent_limit,
            theme: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the application state from configuration.
///
/// Resolves the theme pair (built-in `light`/`dark`, with an optional custom
/// file replacing the dark slot) and the starting variant, and builds an
/// [`AppState`](app::AppState) ready for event processing. Data slots start
/// empty; the first fetches go out once the host grants permissions.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base = %config.api_base, "initializing knihovka plugin");

    let light = Theme::from_name("light").unwrap_or_default();
    let mut dark = Theme::from_name("dark").unwrap_or_default();
    let mut dark_mode = config.theme.as_deref() == Some("dark");

    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => {
                dark = theme;
                dark_mode = true;
            }
            Err(e) => {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme file, using built-ins");
            }
        }
    }

    AppState::new(
        config.api_base.clone(),
        config.recent_limit,
        light,
        dark,
        dark_mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_zellij_applies_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.api_base, "http://localhost:8083/api");
        assert_eq!(config.recent_limit, 9);
        assert!(config.theme.is_none());
    }

    #[test]
    fn malformed_recent_limit_falls_back() {
        let mut map = BTreeMap::new();
        map.insert("recent_limit".to_string(), "many".to_string());
        assert_eq!(Config::from_zellij(&map).recent_limit, 9);
    }

    #[test]
    fn initialize_honors_theme_variant() {
        let config = Config {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme().name, "dark");

        let state = initialize(&Config::default());
        assert_eq!(state.theme().name, "light");
    }
}
