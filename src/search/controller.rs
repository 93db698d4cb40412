//! Debounced, cancellable search as the user types.
//!
//! The controller is a pure state machine. It never sleeps or performs I/O:
//! it tells the caller when to arm a debounce timer ([`QueryChange`]) and
//! which request to send ([`SearchRequest`]), and it is told when timers fire
//! and requests settle. This keeps the timing rules testable without a host.
//!
//! # Ordering
//!
//! Every query change bumps a revision. A debounce timer only fires a request
//! if its revision is still current, which collapses a burst of keystrokes
//! into one request. Every request carries a fresh [`RequestToken`]; a query
//! change, a new request or [`SearchController::clear`] drops the in-flight
//! token, and any settlement whose token is not the in-flight one is ignored.
//! Only the most recently issued request can ever touch visible state.

use crate::api::build_search_url;
use crate::domain::BookSummary;

/// Error shown when a request fails or the response is unusable.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books";

/// Error shown when a request exceeds the configured timeout.
pub const TIMED_OUT_MESSAGE: &str = "Search timed out";

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

/// Outcome of a query change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// The trimmed query is empty; results were cleared, nothing to schedule.
    Cleared,
    /// Arm a debounce timer for this revision.
    Debounce {
        /// Revision to report back through `on_debounce_elapsed`.
        revision: u64,
    },
}

/// A request the host should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Token to hand back with the settlement.
    pub token: RequestToken,
    /// Fully-built request URL.
    pub url: String,
    /// The query text the request was built from.
    pub query: String,
}

/// Visible search state: the query, up to `max_results` suggestions, and the
/// loading and error indicators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    /// Raw query text, exactly as typed.
    pub query: String,
    /// Suggestions from the latest applied response.
    pub results: Vec<BookSummary>,
    /// True while a request is in flight.
    pub loading: bool,
    /// Message from the latest failed request.
    pub error: Option<String>,
}

/// Converts free-text input into debounced, cancellable queries.
#[derive(Debug, Clone)]
pub struct SearchController {
    session: SearchSession,
    endpoint: String,
    max_results: usize,
    revision: u64,
    next_token: u64,
    in_flight: Option<RequestToken>,
}

impl SearchController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, max_results: usize) -> Self {
        Self {
            session: SearchSession::default(),
            endpoint: endpoint.into(),
            max_results,
            revision: 0,
            next_token: 0,
            in_flight: None,
        }
    }

    /// Current visible state.
    #[must_use]
    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.session.query
    }

    /// Result cap applied to every response.
    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Token of the request currently in flight, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// Replaces the query.
    ///
    /// Any in-flight request is superseded. A blank query clears results and
    /// the error immediately; anything else asks for a debounce timer.
    pub fn on_query_change(&mut self, text: impl Into<String>) -> QueryChange {
        self.session.query = text.into();
        self.revision += 1;
        self.supersede_in_flight();

        if self.session.query.trim().is_empty() {
            tracing::debug!(revision = self.revision, "blank query, clearing results");
            self.session.results.clear();
            self.session.error = None;
            return QueryChange::Cleared;
        }

        tracing::trace!(revision = self.revision, query = %self.session.query, "query changed");
        QueryChange::Debounce {
            revision: self.revision,
        }
    }

    /// Called when the debounce timer for `revision` fires.
    ///
    /// Returns the request to send if `revision` is still the latest and the
    /// query is not blank; otherwise `None`.
    pub fn on_debounce_elapsed(&mut self, revision: u64) -> Option<SearchRequest> {
        if revision != self.revision {
            tracing::trace!(revision, current = self.revision, "stale debounce ignored");
            return None;
        }

        let query = self.session.query.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();

        self.supersede_in_flight();
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.in_flight = Some(token);
        self.session.loading = true;
        self.session.error = None;

        let url = build_search_url(&self.endpoint, &query);
        tracing::debug!(token = token.0, query = %query, "issuing search request");

        Some(SearchRequest { token, url, query })
    }

    /// Applies a settled request.
    ///
    /// Returns `true` if the settlement belonged to the in-flight request and
    /// changed visible state. Settlements of superseded requests are dropped.
    pub fn on_settled(&mut self, token: RequestToken, outcome: Result<Vec<BookSummary>, String>) -> bool {
        if self.in_flight != Some(token) {
            tracing::debug!(token = token.0, "dropping settlement of cancelled request");
            return false;
        }

        self.in_flight = None;
        self.session.loading = false;

        match outcome {
            Ok(mut books) => {
                books.truncate(self.max_results);
                tracing::debug!(token = token.0, result_count = books.len(), "search results applied");
                self.session.results = books;
                self.session.error = None;
            }
            Err(reason) => {
                tracing::warn!(token = token.0, reason = %reason, "search request failed");
                self.session.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Called when the timeout for `token` expires.
    ///
    /// Settles the request as failed if it is still in flight. Returns
    /// whether visible state changed.
    pub fn on_timeout(&mut self, token: RequestToken) -> bool {
        if self.in_flight != Some(token) {
            return false;
        }

        tracing::warn!(token = token.0, "search request timed out");
        self.in_flight = None;
        self.session.loading = false;
        self.session.error = Some(TIMED_OUT_MESSAGE.to_string());
        true
    }

    /// Hides the suggestion list but keeps the query text.
    pub fn close_results(&mut self) {
        self.session.results.clear();
    }

    /// Resets the whole session: query, results, error, in-flight request.
    ///
    /// Pending debounce timers become stale as well.
    pub fn clear(&mut self) {
        self.revision += 1;
        self.supersede_in_flight();
        self.session = SearchSession::default();
    }

    fn supersede_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            tracing::debug!(token = token.0, "previous request cancelled");
        }
        self.session.loading = false;
    }
}
