//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the bookshelf library and the Zellij plugin API.
//! Everything that touches `zellij_tile` lives here: the library only sees
//! its own [`Event`]s and answers with [`Action`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, open the shelf, request
//!    `WebAccess`, subscribe to events
//! 2. **Update**: Translate the Zellij event, delegate to `handle_event`,
//!    execute the returned actions
//! 3. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → mode-dependent key events (see below)
//! - `Timer` → `Event::Timer`; the library knows what each deadline was for
//! - `WebRequestResult` → `Event::SearchResponse`, matched by the request
//!   token carried in the context map
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! In search mode:
//! - Printable keys: Type
//! - `Backspace`: Delete last character
//! - `Ctrl+u`: Clear query
//! - `Down`/`Ctrl+n`, `Up`/`Ctrl+p`: Move through suggestions
//! - `Enter`: Save highlighted suggestion, or submit
//! - `Esc`: Close suggestions, then focus the shelf
//! - `Tab`: Focus the shelf
//!
//! In shelf mode:
//! - `j`/`Down`, `k`/`Up`: Move card focus
//! - `n`/`PageDown`, `p`/`PageUp`: Change page
//! - `1`-`9`: Jump to page
//! - `Left`/`Right`: Hover stars
//! - `Enter`: Rate
//! - `d`/`x`: Delete focused book
//! - `/`/`Tab`: Back to search
//! - `q`/`Esc`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookshelf::search::RequestToken;
use bookshelf::{handle_event, Action, Config, Event, InputMode};

/// Context key carrying the request token through `web_request`.
const REQUEST_TOKEN_KEY: &str = "request_token";

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: bookshelf::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookshelf::initialize_in_memory(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests `WebAccess` for the search endpoint.
    ///
    /// # Subscriptions
    ///
    /// - `Key`: Keyboard input
    /// - `Timer`: Debounce, request timeout and toast expiry wake-ups
    /// - `WebRequestResult`: Search responses
    /// - `PermissionRequestResult`: Answer to the permission prompt
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookshelf::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(?config, "parsed configuration");
        self.app = bookshelf::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!(saved_books = self.app.store.len(), "plugin load complete");
    }

    /// Handles incoming Zellij events. Returns `true` to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event, chrono::Utc::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        let ctrl = key.key_modifiers.contains(&KeyModifier::Ctrl);
        match self.app.input_mode {
            InputMode::Search => Self::map_search_key(key.bare_key, ctrl),
            InputMode::Shelf => Self::map_shelf_key(key.bare_key, ctrl),
        }
    }

    fn map_search_key(key: BareKey, ctrl: bool) -> Option<Event> {
        if ctrl {
            return match key {
                BareKey::Char('u') => Some(Event::ClearQuery),
                BareKey::Char('n') => Some(Event::HighlightNext),
                BareKey::Char('p') => Some(Event::HighlightPrev),
                _ => None,
            };
        }

        Some(match key {
            BareKey::Down => Event::HighlightNext,
            BareKey::Up => Event::HighlightPrev,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Tab => Event::FocusShelf,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_shelf_key(key: BareKey, ctrl: bool) -> Option<Event> {
        if ctrl {
            return None;
        }

        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::FocusNext,
            BareKey::Up | BareKey::Char('k') => Event::FocusPrev,
            BareKey::PageDown | BareKey::Char('n') => Event::NextPage,
            BareKey::PageUp | BareKey::Char('p') => Event::PrevPage,
            BareKey::Char(c @ '1'..='9') => Event::GoToPage(c.to_digit(10).map_or(1, |d| d as usize)),
            BareKey::Right => Event::StarNext,
            BareKey::Left => Event::StarPrev,
            BareKey::Enter => Event::Rate,
            BareKey::Char('d' | 'x') => Event::DeleteFocused,
            BareKey::Char('/') | BareKey::Tab => Event::FocusSearch,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a web request result back to the search it answers.
    ///
    /// Results without a readable token were not sent by the search layer
    /// and are dropped.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(token) = context
            .get(REQUEST_TOKEN_KEY)
            .and_then(|raw| raw.parse::<u64>().ok())
        else {
            tracing::warn!(status, "web request result without a request token");
            return None;
        };

        tracing::debug!(status, token, body_len = body.len(), "web request result");
        Some(Event::SearchResponse {
            token: RequestToken(token),
            status,
            body,
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::StartTimer { seconds } => set_timeout(*seconds),
            Action::Fetch { token, url } => {
                let mut context = BTreeMap::new();
                context.insert(REQUEST_TOKEN_KEY.to_string(), token.0.to_string());
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
        }
    }
}
