//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point from the plugin shim. It takes a
//! library [`Event`] (keys already interpreted for the current mode, host
//! timers and HTTP results already decoded), mutates [`AppState`], and returns
//! whether to re-render plus the [`Action`]s the host must perform.
//!
//! # Flow
//!
//! ```text
//! Char ──► SearchController::on_query_change ──► Debounce timer
//! Timer ─► TimerQueue::drain_due ─┬─ Debounce ───────► Fetch + RequestTimeout timer
//!                                 ├─ RequestTimeout ─► "Search timed out"
//!                                 └─ NotificationExpiry ─► hide toast
//! SearchResponse ─► parse ─► SearchController::on_settled (stale tokens dropped)
//! Enter ─► on_result_selected ─► BookStore::mutate ─► toast
//! Delete ─► on_delete_requested ─► BookStore::mutate ─► toast
//! ```
//!
//! # Example
//!
//! ```
//! use bookshelf::app::{handle_event, AppState, Event};
//! use bookshelf::storage::{BookStore, MemoryStorage};
//! use bookshelf::{Config, Theme};
//!
//! let store = BookStore::load(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(&Config::default(), store, Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Char('d'), chrono::Utc::now())?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

use super::modes::InputMode;
use super::timers::TimerKind;
use super::{Action, AppState};
use crate::api::parse_search_response;
use crate::domain::error::Result;
use crate::domain::{BookSummary, Notice};
use crate::search::{QueryChange, RequestToken};
use crate::shelf::{on_delete_requested, on_result_selected};
use chrono::{DateTime, Utc};

/// Shown when the user declines web access.
pub const WEB_ACCESS_DENIED_MESSAGE: &str = "Web access denied: search is unavailable";

/// Events after the shim has interpreted host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Empties the query.
    ClearQuery,
    /// Moves the suggestion cursor down.
    HighlightNext,
    /// Moves the suggestion cursor up.
    HighlightPrev,
    /// Enter in search mode: selects the highlighted suggestion, or submits.
    ///
    /// Submitting with nothing highlighted clears the query and suggestions.
    Submit,
    /// Closes the suggestions; with none open, moves to the shelf.
    Escape,
    /// Gives keys to the shelf.
    FocusShelf,
    /// Gives keys to the search bar.
    FocusSearch,

    /// Moves card focus down.
    FocusNext,
    /// Moves card focus up.
    FocusPrev,
    /// Shows the next page.
    NextPage,
    /// Shows the previous page.
    PrevPage,
    /// Jumps to a page (1-indexed).
    GoToPage(usize),
    /// Hovers the next star on the focused card.
    StarNext,
    /// Hovers the previous star on the focused card.
    StarPrev,
    /// Clicks the hovered star on the focused card.
    Rate,
    /// Deletes every saved entry sharing the focused card's identifier.
    DeleteFocused,
    /// Hides the plugin.
    CloseFocus,

    /// A host timer fired.
    Timer,
    /// A search request settled at the HTTP level.
    SearchResponse {
        /// Token the request was sent with.
        token: RequestToken,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },
    /// The user answered the permission prompt.
    PermissionsResult {
        /// Whether web access was granted.
        granted: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
/// * `now` - Current wall-clock time, used for every timer deadline
///
/// # Returns
///
/// `(should_render, actions)`.
///
/// # Errors
///
/// Reserved for failures the plugin cannot recover from locally. Storage and
/// network failures are reported to the user as toasts or search errors and
/// never surface here.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event, now: DateTime<Utc>) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let mut query = state.search.query().to_string();
            query.push(*c);
            Ok((true, change_query(state, query, now)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search || state.search.query().is_empty() {
                return Ok((false, vec![]));
            }
            let mut query = state.search.query().to_string();
            query.pop();
            Ok((true, change_query(state, query, now)))
        }
        Event::ClearQuery => {
            if state.search.query().is_empty() {
                return Ok((false, vec![]));
            }
            Ok((true, change_query(state, String::new(), now)))
        }
        Event::HighlightNext => {
            state.highlight_next();
            Ok((true, vec![]))
        }
        Event::HighlightPrev => {
            state.highlight_prev();
            Ok((true, vec![]))
        }
        Event::Submit => {
            let Some(book) = state.highlighted_result().cloned() else {
                tracing::debug!(query = %state.search.query(), "query submitted without a highlighted result");
                state.search.clear();
                state.highlighted = None;
                return Ok((true, vec![]));
            };

            state.highlighted = None;
            let notice = on_result_selected(&mut state.store, &mut state.search, book);
            Ok((true, vec![state.notify(notice, now)]))
        }
        Event::Escape => {
            if state.input_mode == InputMode::Search && !state.search.session().results.is_empty() {
                state.search.close_results();
                state.highlighted = None;
            } else {
                state.input_mode = InputMode::Shelf;
            }
            Ok((true, vec![]))
        }
        Event::FocusShelf => {
            state.input_mode = InputMode::Shelf;
            state.highlighted = None;
            Ok((true, vec![]))
        }
        Event::FocusSearch => {
            state.leave_shelf();
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::FocusNext => {
            state.focus_next();
            Ok((true, vec![]))
        }
        Event::FocusPrev => {
            state.focus_prev();
            Ok((true, vec![]))
        }
        Event::NextPage => Ok((state.change_page(|pager, len| pager.next(len)), vec![])),
        Event::PrevPage => Ok((state.change_page(|pager, len| pager.prev(len)), vec![])),
        Event::GoToPage(page) => Ok((state.change_page(|pager, len| pager.go_to(*page, len)), vec![])),
        Event::StarNext | Event::StarPrev => {
            let Some(rating) = state.focused_rating_mut() else {
                return Ok((false, vec![]));
            };
            if *event == Event::StarNext {
                rating.hover_next();
            } else {
                rating.hover_prev();
            }
            Ok((true, vec![]))
        }
        Event::Rate => {
            let rated = state.focused_rating_mut().is_some_and(|rating| rating.click_hovered());
            Ok((rated, vec![]))
        }
        Event::DeleteFocused => {
            let identifier = state
                .focused_book()
                .and_then(|book| book.identifier.clone());
            let Some(notice) = on_delete_requested(&mut state.store, identifier.as_deref()) else {
                return Ok((false, vec![]));
            };
            state.clamp_shelf_cursor();
            Ok((true, vec![state.notify(notice, now)]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Timer => Ok(fire_due_timers(state, now)),
        Event::SearchResponse { token, status, body } => {
            let outcome = parse_search_response(*status, body, state.search.max_results())
                .map_err(|e| e.to_string());
            Ok((settle(state, *token, outcome), vec![]))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!("web access granted");
                Ok((false, vec![]))
            } else {
                tracing::warn!("web access denied, search requests will fail");
                let action = state.notify(Notice::error(WEB_ACCESS_DENIED_MESSAGE), now);
                Ok((true, vec![action]))
            }
        }
    }
}

fn change_query(state: &mut AppState, query: String, now: DateTime<Utc>) -> Vec<Action> {
    state.highlighted = None;
    match state.search.on_query_change(query) {
        QueryChange::Cleared => vec![],
        QueryChange::Debounce { revision } => {
            let seconds = state
                .timers
                .schedule(now, state.debounce, TimerKind::Debounce { revision });
            vec![Action::StartTimer { seconds }]
        }
    }
}

fn settle(state: &mut AppState, token: RequestToken, outcome: std::result::Result<Vec<BookSummary>, String>) -> bool {
    let changed = state.search.on_settled(token, outcome);
    if changed {
        state.highlighted = None;
    }
    changed
}

fn fire_due_timers(state: &mut AppState, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    let due = state.timers.drain_due(now);
    let mut render = false;
    let mut actions = vec![];

    if due.is_empty() {
        // Woken early; re-arm for whatever is next so it is not lost.
        if let Some(seconds) = state.timers.seconds_until_next(now) {
            actions.push(Action::StartTimer { seconds });
        }
        return (false, actions);
    }

    for kind in due {
        tracing::trace!(kind = ?kind, "timer due");
        match kind {
            TimerKind::Debounce { revision } => {
                if let Some(request) = state.search.on_debounce_elapsed(revision) {
                    let seconds = state.timers.schedule(
                        now,
                        state.request_timeout,
                        TimerKind::RequestTimeout { token: request.token },
                    );
                    actions.push(Action::Fetch {
                        token: request.token,
                        url: request.url,
                    });
                    actions.push(Action::StartTimer { seconds });
                    render = true;
                }
            }
            TimerKind::RequestTimeout { token } => {
                render |= state.search.on_timeout(token);
            }
            TimerKind::NotificationExpiry { id } => {
                render |= state.notifications.expire(id);
            }
        }
    }

    (render, actions)
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ClearQuery => "ClearQuery",
        Event::HighlightNext => "HighlightNext",
        Event::HighlightPrev => "HighlightPrev",
        Event::Submit => "Submit",
        Event::Escape => "Escape",
        Event::FocusShelf => "FocusShelf",
        Event::FocusSearch => "FocusSearch",
        Event::FocusNext => "FocusNext",
        Event::FocusPrev => "FocusPrev",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::GoToPage(_) => "GoToPage",
        Event::StarNext => "StarNext",
        Event::StarPrev => "StarPrev",
        Event::Rate => "Rate",
        Event::DeleteFocused => "DeleteFocused",
        Event::CloseFocus => "CloseFocus",
        Event::Timer => "Timer",
        Event::SearchResponse { .. } => "SearchResponse",
        Event::PermissionsResult { .. } => "PermissionsResult",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FETCH_FAILED_MESSAGE, TIMED_OUT_MESSAGE};
    use crate::shelf::{BOOK_ADDED_MESSAGE, BOOK_REMOVED_MESSAGE};
    use crate::storage::{BookStore, MemoryStorage, STORAGE_KEY};
    use crate::ui::Theme;
    use crate::Config;
    use chrono::{Duration, TimeZone};

    const DUNE_BODY: &str = r#"{"docs":[
        {"title":"Dune","author_name":["Frank Herbert"],"cover_i":11481354,"first_publish_year":1965,"key":"/works/OL893415W"},
        {"title":"Dune Messiah","author_name":["Frank Herbert"],"first_publish_year":1969,"key":"/works/OL893502W"}
    ]}"#;

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    fn new_state() -> AppState {
        let store = BookStore::load(Box::new(MemoryStorage::new()));
        AppState::new(&Config::default(), store, Theme::default())
    }

    fn send(state: &mut AppState, event: Event, now: DateTime<Utc>) -> (bool, Vec<Action>) {
        handle_event(state, &event, now).unwrap()
    }

    fn type_query(state: &mut AppState, text: &str, now: DateTime<Utc>) {
        for c in text.chars() {
            send(state, Event::Char(c), now);
        }
    }

    fn fetches(actions: &[Action]) -> Vec<(RequestToken, String)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Fetch { token, url } => Some((*token, url.clone())),
                _ => None,
            })
            .collect()
    }

    fn search_dune(state: &mut AppState) -> RequestToken {
        type_query(state, "dune", t(0));
        let (_, actions) = send(state, Event::Timer, t(300));
        let token = fetches(&actions)[0].0;
        send(
            state,
            Event::SearchResponse {
                token,
                status: 200,
                body: DUNE_BODY.as_bytes().to_vec(),
            },
            t(400),
        );
        token
    }

    #[test]
    fn typing_arms_one_debounce_per_keystroke() {
        let mut state = new_state();
        let (render, actions) = send(&mut state, Event::Char('d'), t(0));
        assert!(render);
        assert_eq!(actions, vec![Action::StartTimer { seconds: 0.3 }]);
    }

    #[test]
    fn one_request_after_quiet_period() {
        let mut state = new_state();
        send(&mut state, Event::Char('d'), t(0));
        send(&mut state, Event::Char('u'), t(100));
        send(&mut state, Event::Char('n'), t(200));

        let (_, early) = send(&mut state, Event::Timer, t(300));
        assert!(fetches(&early).is_empty());

        send(&mut state, Event::Timer, t(400));
        let (render, actions) = send(&mut state, Event::Timer, t(500));
        let issued = fetches(&actions);
        assert!(render);
        assert_eq!(issued.len(), 1);
        assert!(issued[0].1.contains("q=dun&"));
        assert!(state.search.session().loading);
    }

    #[test]
    fn whitespace_query_never_fetches() {
        let mut state = new_state();
        let (_, actions) = send(&mut state, Event::Char(' '), t(0));
        assert!(actions.is_empty());
        let (_, actions) = send(&mut state, Event::Timer, t(1_000));
        assert!(fetches(&actions).is_empty());
    }

    #[test]
    fn response_fills_suggestions() {
        let mut state = new_state();
        search_dune(&mut state);

        let vm = state.compute_viewmodel(40, 100);
        let titles: Vec<&str> = vm.suggestions.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Dune Messiah"]);
        assert_eq!(vm.suggestions[0].highlight_ranges, vec![(0, 4)]);
        assert!(!vm.search_bar.loading);
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut state = new_state();
        type_query(&mut state, "du", t(0));
        let (_, actions) = send(&mut state, Event::Timer, t(300));
        let stale = fetches(&actions)[0].0;

        send(&mut state, Event::Char('n'), t(350));
        assert!(!state.search.session().loading);

        let (render, _) = send(
            &mut state,
            Event::SearchResponse {
                token: stale,
                status: 200,
                body: DUNE_BODY.as_bytes().to_vec(),
            },
            t(400),
        );
        assert!(!render);
        assert!(state.search.session().results.is_empty());
    }

    #[test]
    fn http_error_shows_fetch_failure() {
        let mut state = new_state();
        type_query(&mut state, "dune", t(0));
        let (_, actions) = send(&mut state, Event::Timer, t(300));
        let token = fetches(&actions)[0].0;

        send(
            &mut state,
            Event::SearchResponse {
                token,
                status: 503,
                body: vec![],
            },
            t(400),
        );

        assert_eq!(state.search.session().error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!state.search.session().loading);
    }

    #[test]
    fn hung_request_times_out() {
        let mut state = new_state();
        type_query(&mut state, "dune", t(0));
        let (_, actions) = send(&mut state, Event::Timer, t(300));
        assert!(actions.contains(&Action::StartTimer { seconds: 10.0 }));

        let (render, _) = send(&mut state, Event::Timer, t(300) + Duration::seconds(10));
        assert!(render);
        assert_eq!(state.search.session().error.as_deref(), Some(TIMED_OUT_MESSAGE));
    }

    #[test]
    fn enter_on_highlight_saves_book() {
        let mut state = new_state();
        search_dune(&mut state);

        send(&mut state, Event::HighlightNext, t(500));
        let (render, actions) = send(&mut state, Event::Submit, t(500));

        assert!(render);
        assert_eq!(actions, vec![Action::StartTimer { seconds: 3.0 }]);
        assert_eq!(state.store.books()[0].title, "Dune");
        assert_eq!(state.search.query(), "");
        assert!(state.search.session().results.is_empty());

        let raw = state.store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("/works/OL893415W"));

        let vm = state.compute_viewmodel(40, 100);
        assert_eq!(vm.toast.map(|t| t.message), Some(BOOK_ADDED_MESSAGE.to_string()));
    }

    #[test]
    fn enter_without_highlight_clears_search() {
        let mut state = new_state();
        search_dune(&mut state);

        send(&mut state, Event::Submit, t(500));

        assert!(state.store.is_empty());
        assert_eq!(state.search.query(), "");
        assert!(state.search.session().results.is_empty());
    }

    #[test]
    fn escape_closes_suggestions_then_moves_to_shelf() {
        let mut state = new_state();
        search_dune(&mut state);

        send(&mut state, Event::Escape, t(500));
        assert_eq!(state.input_mode, InputMode::Search);
        assert_eq!(state.search.query(), "dune");
        assert!(state.search.session().results.is_empty());

        send(&mut state, Event::Escape, t(500));
        assert_eq!(state.input_mode, InputMode::Shelf);
    }

    #[test]
    fn toast_expires() {
        let mut state = new_state();
        search_dune(&mut state);
        send(&mut state, Event::HighlightNext, t(500));
        send(&mut state, Event::Submit, t(500));

        let (render, _) = send(&mut state, Event::Timer, t(3_500));
        assert!(render);
        assert!(state.notifications.current().is_none());
    }

    #[test]
    fn delete_focused_removes_duplicates_and_clamps_page() {
        let mut state = new_state();
        state
            .store
            .mutate(|books| {
                for i in 0..9 {
                    books.push(BookSummary::new(format!("Book {i}"), format!("/works/{i}")));
                }
                books.push(BookSummary::new("Dup A", "/works/dup"));
            })
            .unwrap();
        state
            .store
            .mutate(|books| books.insert(0, BookSummary::new("Dup B", "/works/dup")))
            .unwrap();
        send(&mut state, Event::FocusShelf, t(0));
        send(&mut state, Event::NextPage, t(0));
        assert_eq!(state.pager.page(), 2);

        send(&mut state, Event::PrevPage, t(0));
        let (render, actions) = send(&mut state, Event::DeleteFocused, t(0));

        assert!(render);
        assert_eq!(actions.len(), 1);
        assert_eq!(state.store.len(), 9);
        assert!(state.store.books().iter().all(|b| !b.has_identifier("/works/dup")));
        assert_eq!(
            state.notifications.current().map(|t| t.notice.message.as_str()),
            Some(BOOK_REMOVED_MESSAGE)
        );
    }

    #[test]
    fn delete_on_empty_shelf_is_silent() {
        let mut state = new_state();
        send(&mut state, Event::FocusShelf, t(0));
        let (render, actions) = send(&mut state, Event::DeleteFocused, t(0));
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn star_keys_hover_and_rate_focused_card() {
        let mut state = new_state();
        state
            .store
            .mutate(|books| books.push(BookSummary::new("Emma", "/works/OL1W")))
            .unwrap();
        send(&mut state, Event::FocusShelf, t(0));

        send(&mut state, Event::StarNext, t(0));
        send(&mut state, Event::StarNext, t(0));
        send(&mut state, Event::StarNext, t(0));
        send(&mut state, Event::Rate, t(0));

        let vm = state.compute_viewmodel(40, 80);
        assert_eq!(vm.cards[0].rating_caption, "3 of 5 stars");
        assert_eq!(vm.cards[0].stars, vec![true, true, true, false, false]);
    }

    #[test]
    fn denied_permission_shows_error() {
        let mut state = new_state();
        let (render, actions) = send(&mut state, Event::PermissionsResult { granted: false }, t(0));
        assert!(render);
        assert_eq!(actions.len(), 1);
        assert!(state.notifications.current().unwrap().notice.is_error());
    }

    #[test]
    fn early_wakeup_rearms() {
        let mut state = new_state();
        send(&mut state, Event::Char('d'), t(0));
        let (render, actions) = send(&mut state, Event::Timer, t(100));
        assert!(!render);
        assert_eq!(actions, vec![Action::StartTimer { seconds: 0.2 }]);
    }

    #[test]
    fn keys_for_other_mode_are_ignored() {
        let mut state = new_state();
        send(&mut state, Event::FocusShelf, t(0));
        let (render, actions) = send(&mut state, Event::Char('x'), t(0));
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.search.query(), "");
    }

    #[test]
    fn enter_while_loading_ignores_hidden_results() {
        let mut state = new_state();
        search_dune(&mut state);

        type_query(&mut state, " messiah", t(500));
        send(&mut state, Event::Timer, t(800));
        assert!(state.search.session().loading);
        assert!(state.compute_viewmodel(40, 100).suggestions.is_empty());

        send(&mut state, Event::HighlightNext, t(900));
        assert_eq!(state.highlighted, None);
        send(&mut state, Event::Submit, t(900));

        assert!(state.store.is_empty());
    }

    #[test]
    fn delete_only_reaches_drawn_cards() {
        let mut state = new_state();
        state
            .store
            .mutate(|books| {
                for i in 0..9 {
                    books.push(BookSummary::new(format!("Book {i}"), format!("/works/{i}")));
                }
            })
            .unwrap();
        send(&mut state, Event::FocusShelf, t(0));
        for _ in 0..6 {
            send(&mut state, Event::FocusNext, t(0));
        }

        let vm = state.compute_viewmodel(24, 80);
        let drawn_focus: Vec<String> = vm.cards.iter().filter(|c| c.is_focused).map(|c| c.title.clone()).collect();
        assert_eq!(drawn_focus, vec!["Book 6".to_string()]);

        send(&mut state, Event::DeleteFocused, t(0));
        assert_eq!(state.store.len(), 8);
        assert!(state.store.books().iter().all(|b| b.title != "Book 6"));
    }
}
