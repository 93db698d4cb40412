//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij directly. It returns [`Action`]s and the
//! plugin shim in `main.rs` turns each one into the matching host call.
//!
//! # Example
//!
//! ```
//! use bookshelf::app::Action;
//!
//! let actions = vec![Action::StartTimer { seconds: 0.3 }, Action::CloseFocus];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::search::RequestToken;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Arms a host timer that fires after `seconds`.
    ///
    /// The handler has already recorded what the timer is for; the host only
    /// needs to wake the plugin up.
    StartTimer {
        /// Delay in seconds.
        seconds: f64,
    },

    /// Sends a GET request for a search.
    ///
    /// The response must come back as a `SearchResponse` event carrying the
    /// same token.
    Fetch {
        /// Token identifying this request.
        token: RequestToken,
        /// Request URL.
        url: String,
    },
}
