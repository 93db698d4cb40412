//! Application state and view model computation.
//!
//! [`AppState`] owns everything the plugin knows: the persisted shelf, the
//! search session, the input mode, the shelf cursor and page, per-card
//! ratings, the visible toast and the pending timers. The event handler
//! mutates it; the renderer reads it through [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```
//! use bookshelf::app::AppState;
//! use bookshelf::storage::{BookStore, MemoryStorage};
//! use bookshelf::{Config, Theme};
//!
//! let store = BookStore::load(Box::new(MemoryStorage::new()));
//! let state = AppState::new(&Config::default(), store, Theme::default());
//! let vm = state.compute_viewmodel(24, 80);
//! assert_eq!(vm.empty_state.map(|e| e.message), Some("No Books Added".to_string()));
//! ```

use super::modes::InputMode;
use super::notification::Notifications;
use super::timers::{TimerKind, TimerQueue};
use super::Action;
use crate::domain::{Notice, SavedBook};
use crate::search::SearchController;
use crate::shelf::{total_pages, Pager, RatingState};
use crate::storage::BookStore;
use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BookCard, EmptyState, FooterInfo, HeaderInfo, PagerInfo, SearchBarInfo, SuggestionItem, ToastInfo,
    UIViewModel,
};
use crate::Config;
use chrono::{DateTime, Duration, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashMap;

/// Message shown in place of cards when the shelf is empty.
pub const EMPTY_SHELF_MESSAGE: &str = "No Books Added";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Saved books, mirrored to durable storage.
    pub store: BookStore,

    /// Query, suggestions, loading and error state.
    pub search: SearchController,

    /// Which part of the UI receives keys.
    pub input_mode: InputMode,

    /// Suggestion cursor. `None` means Enter submits the query instead of
    /// selecting a suggestion.
    pub highlighted: Option<usize>,

    /// Current shelf page.
    pub pager: Pager,

    /// Focused card, as a slot on the current page.
    pub focused: usize,

    /// Ratings of cards on the current page, keyed by slot.
    ///
    /// Dropped whenever the page changes.
    pub ratings: HashMap<usize, RatingState>,

    /// Visible toast.
    pub notifications: Notifications,

    /// Pending debounce, timeout and toast deadlines.
    pub timers: TimerQueue,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Quiet period before a query is sent.
    pub debounce: Duration,

    /// Deadline for a search request.
    pub request_timeout: Duration,

    /// How long a toast stays visible.
    pub notification_ttl: Duration,

    /// Stars per card.
    pub total_stars: usize,
}

impl AppState {
    /// Creates the state for a freshly loaded plugin.
    ///
    /// # Parameters
    ///
    /// * `config` - Parsed plugin configuration
    /// * `store` - The already-loaded shelf
    /// * `theme` - Color scheme
    #[must_use]
    pub fn new(config: &Config, store: BookStore, theme: Theme) -> Self {
        Self {
            store,
            search: SearchController::new(config.search_endpoint.clone(), config.max_results),
            input_mode: InputMode::Search,
            highlighted: None,
            pager: Pager::new(config.page_size),
            focused: 0,
            ratings: HashMap::new(),
            notifications: Notifications::default(),
            timers: TimerQueue::new(),
            theme,
            debounce: duration_ms(config.debounce_ms),
            request_timeout: duration_ms(config.request_timeout_secs.saturating_mul(1000)),
            notification_ttl: duration_ms(config.notification_secs.saturating_mul(1000)),
            total_stars: config.total_stars,
        }
    }

    /// Books on the current page.
    #[must_use]
    pub fn visible_books(&self) -> &[SavedBook] {
        self.pager.slice(self.store.books())
    }

    /// The focused card's book, if the page has any.
    #[must_use]
    pub fn focused_book(&self) -> Option<&SavedBook> {
        self.visible_books().get(self.focused)
    }

    /// The highlighted suggestion, if any.
    ///
    /// Always `None` while a request is loading.
    #[must_use]
    pub fn highlighted_result(&self) -> Option<&SavedBook> {
        if self.search.session().loading {
            return None;
        }
        self.highlighted
            .and_then(|index| self.search.session().results.get(index))
    }

    /// Number of suggestions the cursor can move over.
    fn selectable_results(&self) -> usize {
        let session = self.search.session();
        if session.loading {
            0
        } else {
            session.results.len()
        }
    }

    /// Moves the suggestion cursor down, wrapping to the top.
    pub fn highlight_next(&mut self) {
        let count = self.selectable_results();
        if count == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % count));
    }

    /// Moves the suggestion cursor up, wrapping to the bottom.
    pub fn highlight_prev(&mut self) {
        let count = self.selectable_results();
        if count == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }

    /// Moves card focus down within the page, wrapping.
    ///
    /// The card losing focus counts as the pointer leaving its stars.
    pub fn focus_next(&mut self) {
        let count = self.visible_books().len();
        if count == 0 {
            return;
        }
        self.leave_focused_rating();
        self.focused = (self.focused + 1) % count;
    }

    /// Moves card focus up within the page, wrapping.
    pub fn focus_prev(&mut self) {
        let count = self.visible_books().len();
        if count == 0 {
            return;
        }
        self.leave_focused_rating();
        self.focused = if self.focused == 0 { count - 1 } else { self.focused - 1 };
    }

    /// Rating of the card in `slot`; unrated if it has none yet.
    #[must_use]
    pub fn rating(&self, slot: usize) -> RatingState {
        self.ratings
            .get(&slot)
            .copied()
            .unwrap_or_else(|| RatingState::new(self.total_stars))
    }

    /// Mutable rating of the focused card, created on first use.
    pub fn focused_rating_mut(&mut self) -> Option<&mut RatingState> {
        if self.focused_book().is_none() {
            return None;
        }
        let total_stars = self.total_stars;
        Some(
            self.ratings
                .entry(self.focused)
                .or_insert_with(|| RatingState::new(total_stars)),
        )
    }

    /// Applies a page move. Ratings and focus reset when the page changes.
    ///
    /// Returns whether the page changed.
    pub fn change_page(&mut self, turn: impl FnOnce(&mut Pager, usize) -> bool) -> bool {
        let len = self.store.len();
        if turn(&mut self.pager, len) {
            tracing::debug!(page = self.pager.page(), "shelf page changed");
            self.ratings.clear();
            self.focused = 0;
            true
        } else {
            false
        }
    }

    /// Keeps page and focus valid after the shelf shrank.
    pub fn clamp_shelf_cursor(&mut self) {
        if self.pager.clamp(self.store.len()) {
            self.ratings.clear();
            self.focused = 0;
        }
        let count = self.visible_books().len();
        self.focused = self.focused.min(count.saturating_sub(1));
    }

    /// Shows `notice` as a toast and arms its expiry.
    ///
    /// # Returns
    ///
    /// The timer action the host must execute.
    pub fn notify(&mut self, notice: Notice, now: DateTime<Utc>) -> Action {
        let id = self.notifications.show(notice, now + self.notification_ttl);
        let seconds = self
            .timers
            .schedule(now, self.notification_ttl, TimerKind::NotificationExpiry { id });
        Action::StartTimer { seconds }
    }

    /// Keys leave the shelf: the focused card's star hover reverts.
    pub fn leave_shelf(&mut self) {
        self.leave_focused_rating();
    }

    fn leave_focused_rating(&mut self) {
        if let Some(rating) = self.ratings.get_mut(&self.focused) {
            rating.leave();
        }
    }

    /// Computes a renderable view model.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    ///
    /// Suggestions are hidden while a request is in flight. Cards that do not
    /// fit in `rows` are left out; the page itself is unchanged.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let session = self.search.session();
        let suggestions = if session.loading {
            vec![]
        } else {
            self.compute_suggestions(cols)
        };

        let cards = self.compute_cards(rows.saturating_sub(CHROME_ROWS + suggestions.len() * 2));

        let total = total_pages(self.store.len(), self.pager.page_size());
        let (pager, empty_state) = if total == 0 {
            (
                None,
                Some(EmptyState {
                    message: EMPTY_SHELF_MESSAGE.to_string(),
                    subtitle: "Search for a book and press Enter to save it".to_string(),
                }),
            )
        } else {
            (
                Some(PagerInfo {
                    current: self.pager.page(),
                    total,
                }),
                None,
            )
        };

        UIViewModel {
            header: HeaderInfo {
                title: format!(" Bookshelf ({}) ", self.store.len()),
            },
            search_bar: SearchBarInfo {
                query: session.query.clone(),
                is_active: self.input_mode == InputMode::Search,
                loading: session.loading,
                error: session.error.clone(),
            },
            suggestions,
            cards,
            pager,
            empty_state,
            toast: self.notifications.current().map(|toast| ToastInfo {
                message: toast.notice.message.clone(),
                is_error: toast.notice.is_error(),
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_suggestions(&self, cols: usize) -> Vec<SuggestionItem> {
        let session = self.search.session();
        let query = session.query.trim();
        let matcher = if query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        let max_title = cols.saturating_sub(SUGGESTION_INDENT).max(8);

        session
            .results
            .iter()
            .enumerate()
            .map(|(index, book)| {
                let title = fit(&book.title, max_title);
                let highlight_ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| highlight_ranges(&title, query, m));
                SuggestionItem {
                    title,
                    author_line: book.authors.join(", "),
                    cover_url: book.cover_url(),
                    is_highlighted: self.input_mode == InputMode::Search && self.highlighted == Some(index),
                    highlight_ranges,
                }
            })
            .collect()
    }

    fn compute_cards(&self, available_rows: usize) -> Vec<BookCard> {
        let max_cards = (available_rows / CARD_ROWS).max(1);
        let shelf_active = self.input_mode == InputMode::Shelf;
        let first = card_window_start(self.focused, max_cards);

        self.visible_books()
            .iter()
            .enumerate()
            .skip(first)
            .take(max_cards)
            .map(|(slot, book)| {
                let rating = self.rating(slot);
                BookCard {
                    number: self.pager.absolute_index(slot) + 1,
                    title: book.title.clone(),
                    author_line: book.author_line(),
                    year_label: book.year_label(),
                    cover_url: book.cover_url(),
                    is_focused: shelf_active && slot == self.focused,
                    stars: (0..rating.total_stars()).map(|i| rating.is_filled(i)).collect(),
                    hovered_star: rating.hovered(),
                    rating_caption: rating.caption(),
                }
            })
            .collect()
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => {
                "Type to search  Up/Down: highlight  Enter: add  Ctrl+u: clear  Esc: close  Tab: shelf"
            }
            InputMode::Shelf => {
                "j/k: focus  n/p: page  Left/Right: stars  Enter: rate  d: delete  /: search  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Header, borders, search bar, status line, pager and footer.
const CHROME_ROWS: usize = 12;

/// Lines per card: title, author and year, stars, cover.
const CARD_ROWS: usize = 4;

const SUGGESTION_INDENT: usize = 10;

/// Longest delay any timer is armed for: one day.
const MAX_DELAY_MS: u64 = 86_400_000;

fn duration_ms(ms: u64) -> Duration {
    Duration::milliseconds(i64::try_from(ms.min(MAX_DELAY_MS)).unwrap_or_default())
}

/// First slot drawn when only `max_cards` fit, keeping `focused` on screen.
const fn card_window_start(focused: usize, max_cards: usize) -> usize {
    if focused < max_cards {
        0
    } else {
        focused + 1 - max_cards
    }
}

/// Character ranges of `text` matched by `query`, merged into runs.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
