//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Knihovka library and
//! the Zellij plugin system. It implements the `ZellijPlugin` trait, maps
//! host events to library events, and executes the actions the event handler
//! returns.
//!
//! # Plugin lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create the app state,
//!    request permissions, subscribe to events
//! 2. **Permission grant**: dispatch the initial catalog fetches
//! 3. **Update**: translate Zellij events to library events, delegate to
//!    `handle_event`, execute returned actions
//! 4. **Render**: delegate to the library rendering layer
//!
//! # Host facilities used
//!
//! - `web_request`: HTTP GETs against the catalog API; the originating query
//!   rides the request context map and is recovered from the
//!   `WebRequestResult` event
//! - `set_timeout`: anonymous single-shot timeouts backing the debounce,
//!   load-more and scroll-restore timers (identity lives in the app-side
//!   timer queue)
//! - `run_command`: opens download links with `xdg-open`
//!
//! # Keybindings
//!
//! Normal mode: `j`/`k` move, `Enter` select/expand, `a` author detail,
//! `s` series detail, `Esc` back, `/` search, `m` load more, `d` download,
//! `o`/`r` authors sort, `1`/`2`/`3` pages, `t` theme toggle, `q` quit.
//! Search mode: type to filter, `Enter` to the results, `Esc` leaves search.
//! `Ctrl+n`/`Ctrl+p` move in every mode.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use knihovka::api::{decode, Query};
use knihovka::app::{handle_event, Action, Event as AppEvent, InputMode, SearchFocus};
use knihovka::{AppState, Config};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: knihovka::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing, builds the application
    /// state, requests permissions and subscribes to events. The initial
    /// fetches wait for the permission grant.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        knihovka::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        self.app = knihovka::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates host events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if the
    /// UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => AppEvent::Tick {
                now_ms: chrono::Utc::now().timestamp_millis(),
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - requesting initial data");
                    AppEvent::PermissionsGranted
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - plugin cannot reach the catalog");
                    return false;
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI by delegating to the library renderer.
    fn render(&mut self, rows: usize, cols: usize) {
        knihovka::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Short name of a Zellij event for logging.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events, keyed off the input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<AppEvent> {
        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(AppEvent::CursorDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(AppEvent::CursorUp);
        }

        match self.app.input_mode {
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => AppEvent::CursorDown,
                BareKey::Up | BareKey::Char('k') => AppEvent::CursorUp,
                BareKey::Enter => AppEvent::SelectEntry,
                BareKey::Esc => AppEvent::Back,
                BareKey::Char('/') => AppEvent::SearchMode,
                BareKey::Char('q') => AppEvent::CloseFocus,
                BareKey::Char('a') => AppEvent::OpenAuthorOfSelected,
                BareKey::Char('s') => AppEvent::OpenSeriesOfSelected,
                BareKey::Char('m') => AppEvent::LoadMore,
                BareKey::Char('d') => AppEvent::DownloadSelected,
                BareKey::Char('t') => AppEvent::ToggleTheme,
                BareKey::Char('o') => AppEvent::ToggleSortKey,
                BareKey::Char('r') => AppEvent::ToggleSortOrder,
                BareKey::Char('1') => AppEvent::ShowHome,
                BareKey::Char('2') => AppEvent::ShowBooks,
                BareKey::Char('3') => AppEvent::ShowAuthors,
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Esc => AppEvent::ExitSearch,
                BareKey::Enter => AppEvent::FocusResults,
                BareKey::Backspace => AppEvent::Backspace,
                BareKey::Down => AppEvent::CursorDown,
                BareKey::Up => AppEvent::CursorUp,
                BareKey::Char(c) => AppEvent::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Esc => AppEvent::ExitSearch,
                BareKey::Enter => AppEvent::SelectEntry,
                BareKey::Down | BareKey::Char('j') => AppEvent::CursorDown,
                BareKey::Up | BareKey::Char('k') => AppEvent::CursorUp,
                BareKey::Char('/') => AppEvent::FocusSearchBar,
                _ => return None,
            }),
        }
    }

    /// Maps a completed `web_request` back to the query that caused it.
    ///
    /// Results without this plugin's context key are ignored; the decode
    /// error path carries the displayable message into the event.
    fn map_web_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<AppEvent> {
        let query = Query::from_context(context)?;
        tracing::debug!(query = query.label(), status, "web request completed");

        let result = decode(&query, status, body).map_err(|e| e.to_string());
        Some(AppEvent::QueryCompleted { query, result })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::Fetch(query) => {
                let url = query.url(&self.app.api_base);
                tracing::debug!(query = query.label(), url = %url, "dispatching fetch");
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    query.to_context(),
                );
            }
            Action::StartTimer { delay_ms } => {
                set_timeout(*delay_ms as f64 / 1000.0);
            }
            Action::OpenDownload { url } => {
                tracing::debug!(url = %url, "opening download in system handler");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
