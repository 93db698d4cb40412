//! Bookshelf: A Zellij plugin for finding books and keeping a reading shelf.
//!
//! Bookshelf provides:
//! - Search-as-you-type against the Open Library search API, debounced and
//!   with stale responses dropped
//! - A persistent shelf of saved books, paginated nine to a page
//! - Per-card star ratings driven from the keyboard
//! - Short-lived notifications for adds, removals and failures

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, timers, notifications            │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search (search│   │ Shelf (shelf/)│   │ UI Layer (ui/)│
//! │ + api/)       │   │ - Selection   │   │ - Rendering   │
//! │ - Debounce    │   │ - Pagination  │   │ - Theming     │
//! │ - Tokens      │   │ - Ratings     │   │ - Components  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - Key-value backends, book list store (storage/)   │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Book model, notices, errors (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a local OTLP file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookshelf.wasm" {
//!         debounce_ms "300"
//!         page_size "9"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookshelf::storage::{BookStore, MemoryStorage};
//! use bookshelf::{handle_event, Action, AppState, Config, Event, Theme};
//!
//! let store = BookStore::load(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(&Config::default(), store, Theme::default());
//!
//! let now = chrono::Utc::now();
//! let (_, actions) = handle_event(&mut state, &Event::Char('d'), now)?;
//! assert!(matches!(actions[..], [Action::StartTimer { .. }]));
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod shelf;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{BookSummary, BookshelfError, Result, SavedBook};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use storage::{BookStore, JsonFileStorage, KeyValueStore, MemoryStorage};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every value is optional. Unparseable or zero numbers fall back to the
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Quiet period after the last keystroke before searching. Default: 300
    pub debounce_ms: u64,

    /// Cards per shelf page. Default: 9
    pub page_size: usize,

    /// Search results shown under the box. Default: 5
    pub max_results: usize,

    /// Stars per rating row. Default: 5
    pub total_stars: usize,

    /// Seconds before an unanswered search fails. Default: 10
    pub request_timeout_secs: u64,

    /// Seconds a notification stays visible. Default: 3
    pub notification_secs: u64,

    /// Search API base URL.
    pub search_endpoint: String,

    /// Shelf file; `~` maps to `/host`. Defaults to
    /// [`infrastructure::storage_file`].
    pub storage_file: Option<String>,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter directive, e.g. `debug`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            page_size: shelf::DEFAULT_PAGE_SIZE,
            max_results: 5,
            total_stars: shelf::DEFAULT_TOTAL_STARS,
            request_timeout_secs: 10,
            notification_secs: 3,
            search_endpoint: api::DEFAULT_SEARCH_ENDPOINT.to_string(),
            storage_file: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "12".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 12);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            debounce_ms: positive(config, "debounce_ms", defaults.debounce_ms),
            page_size: positive(config, "page_size", defaults.page_size),
            max_results: positive(config, "max_results", defaults.max_results),
            total_stars: positive(config, "total_stars", defaults.total_stars),
            request_timeout_secs: positive(config, "request_timeout_secs", defaults.request_timeout_secs),
            notification_secs: positive(config, "notification_secs", defaults.notification_secs),
            search_endpoint: text("search_endpoint").unwrap_or(defaults.search_endpoint),
            storage_file: text("storage_file").map(|path| infrastructure::expand_tilde(&path)),
            theme_name: text("theme"),
            theme_file: text("theme_file").map(|path| infrastructure::expand_tilde(&path)),
            trace_level: text("trace_level"),
        }
    }

    /// Where the shelf is persisted.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.storage_file
            .as_ref()
            .map_or_else(infrastructure::storage_file, PathBuf::from)
    }
}

/// Parses `key` as a non-zero number, falling back to `default`.
fn positive<T>(config: &BTreeMap<String, String>, key: &str, default: T) -> T
where
    T: FromStr + PartialEq + Default,
{
    match config.get(key).map(|raw| raw.trim().parse::<T>()) {
        Some(Ok(value)) if value != T::default() => value,
        Some(_) => {
            tracing::warn!(key, "invalid configuration value, using default");
            default
        }
        None => default,
    }
}

/// Builds the application state from configuration.
///
/// Opens the shelf file, loads the saved list and resolves the theme. When
/// the file cannot be opened the shelf lives in memory for this session and
/// the failure is logged.
///
/// # Example
///
/// ```rust
/// use bookshelf::{initialize, Config};
///
/// let dir = std::env::temp_dir().join("bookshelf-doc");
/// let config = Config {
///     storage_file: Some(dir.join("shelf.json").display().to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "catppuccin-mocha");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing bookshelf plugin");

    let path = config.storage_path();
    let backend: Box<dyn KeyValueStore> = match JsonFileStorage::open(path.clone()) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::error!(path = ?path, error = %e, "failed to open shelf file, keeping shelf in memory");
            Box::new(MemoryStorage::new())
        }
    };

    build_state(config, backend)
}

/// Builds the application state with an in-memory shelf.
///
/// Touches no files; the plugin holds this until `load` has the real
/// configuration.
///
/// ```rust
/// use bookshelf::{initialize_in_memory, Config};
///
/// let state = initialize_in_memory(&Config::default());
/// assert!(state.store.is_empty());
/// ```
#[must_use]
pub fn initialize_in_memory(config: &Config) -> AppState {
    build_state(config, Box::new(MemoryStorage::new()))
}

fn build_state(config: &Config, backend: Box<dyn KeyValueStore>) -> AppState {
    let store = BookStore::load(backend);
    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());

    AppState::new(config, store, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::STORAGE_KEY;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_option() {
        let config = Config::from_zellij(&map(&[
            ("debounce_ms", "150"),
            ("page_size", "6"),
            ("max_results", "8"),
            ("total_stars", "10"),
            ("request_timeout_secs", "4"),
            ("notification_secs", "2"),
            ("search_endpoint", "http://localhost:8080/search.json"),
            ("storage_file", "~/shelf.json"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "/etc/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.page_size, 6);
        assert_eq!(config.max_results, 8);
        assert_eq!(config.total_stars, 10);
        assert_eq!(config.request_timeout_secs, 4);
        assert_eq!(config.notification_secs, 2);
        assert_eq!(config.search_endpoint, "http://localhost:8080/search.json");
        assert_eq!(config.storage_file.as_deref(), Some("/host/shelf.json"));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/etc/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_and_garbage_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("page_size", "0"),
            ("total_stars", "-3"),
            ("debounce_ms", "fast"),
            ("search_endpoint", "   "),
        ]));

        let defaults = Config::default();
        assert_eq!(config.page_size, defaults.page_size);
        assert_eq!(config.total_stars, defaults.total_stars);
        assert_eq!(config.debounce_ms, defaults.debounce_ms);
        assert_eq!(config.search_endpoint, defaults.search_endpoint);
    }

    #[test]
    fn storage_path_defaults_to_data_dir() {
        assert_eq!(Config::default().storage_path(), infrastructure::storage_file());
    }

    #[test]
    fn initialize_loads_saved_shelf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local-storage.json");

        {
            let mut storage = JsonFileStorage::open(path.clone()).unwrap();
            storage
                .set_item(STORAGE_KEY, r#"[{"title":"Emma","author_name":["Jane Austen"],"key":"/works/OL66562W"}]"#)
                .unwrap();
        }

        let config = Config {
            storage_file: Some(path.display().to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);

        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.books()[0].title, "Emma");
        assert_eq!(state.theme.name, "catppuccin-latte");
    }

    #[test]
    fn unopenable_storage_falls_back_to_memory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config {
            storage_file: Some(file.path().join("shelf.json").display().to_string()),
            ..Default::default()
        };

        let state = initialize(&config);
        assert!(state.store.is_empty());
    }

    #[test]
    fn in_memory_state_writes_nowhere() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf.json");
        let config = Config {
            storage_file: Some(path.display().to_string()),
            ..Default::default()
        };

        let mut state = initialize_in_memory(&config);
        state
            .store
            .mutate(|books| books.push(BookSummary::new("Emma", "/works/OL66562W")))
            .unwrap();

        assert_eq!(state.store.len(), 1);
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
