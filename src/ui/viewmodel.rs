//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel` and
//! consumed by the renderer. They carry display-ready strings and flags only:
//! author lines are already joined, cover URLs already resolved, star fills
//! already decided.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Query input with its loading and error indicators.
    pub search_bar: SearchBarInfo,

    /// Suggestions under the search bar. Empty while loading.
    pub suggestions: Vec<SuggestionItem>,

    /// Cards on the current shelf page.
    pub cards: Vec<BookCard>,

    /// Page controls; `None` when the shelf is empty.
    pub pager: Option<PagerInfo>,

    /// Shown instead of cards when the shelf is empty.
    pub empty_state: Option<EmptyState>,

    /// Visible toast, if any.
    pub toast: Option<ToastInfo>,

    /// Keybinding hints for the current mode.
    pub footer: FooterInfo,
}

/// Title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, padded for centering by the renderer.
    pub title: String,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Query text as typed.
    pub query: String,
    /// Whether keys currently go to the search bar.
    pub is_active: bool,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Error from the latest failed request.
    pub error: Option<String>,
}

/// One search suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    /// Book title.
    pub title: String,
    /// Joined author names.
    pub author_line: String,
    /// Cover image URL (or the placeholder).
    pub cover_url: String,
    /// Whether the suggestion cursor is on this row.
    pub is_highlighted: bool,
    /// Title character ranges matching the query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// One saved book on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    /// Position on the page, 1-based for display.
    pub number: usize,
    /// Book title.
    pub title: String,
    /// Joined author names or "Unknown Author".
    pub author_line: String,
    /// First publish year, blank when unknown.
    pub year_label: String,
    /// Cover image URL (or the placeholder).
    pub cover_url: String,
    /// Whether shelf focus is on this card.
    pub is_focused: bool,
    /// Fill state of each star, left to right.
    pub stars: Vec<bool>,
    /// Star under the keyboard pointer, if any.
    pub hovered_star: Option<usize>,
    /// e.g. "3 of 5 stars".
    pub rating_caption: String,
}

/// Page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerInfo {
    /// Current page, 1-based.
    pub current: usize,
    /// Total pages, at least 1.
    pub total: usize,
}

/// Empty-shelf message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,
    /// Hint below the message.
    pub subtitle: String,
}

/// A toast ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    /// Text.
    pub message: String,
    /// Draw with the error color.
    pub is_error: bool,
}

/// Footer hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
