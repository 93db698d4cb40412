//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the search, shelf and storage
//! layers. Data flows one way:
//!
//! ```text
//! Host input → Event → handle_event → AppState mutations → Actions → Host calls
//!                                          │
//!                                          └─→ compute_viewmodel → render
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode
//! - [`notification`]: Toasts with expiry
//! - [`state`]: Central application state and view model computation
//! - [`timers`]: Tagged deadlines over the host's anonymous timers

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notification;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use notification::{Notifications, Toast};
pub use state::AppState;
pub use timers::{TimerKind, TimerQueue};
