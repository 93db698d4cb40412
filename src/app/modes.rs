//! Input mode state.
//!
//! The plugin is always in one of two modes, and the mode decides how
//! `main.rs` interprets key presses:
//!
//! - **Search**: keys edit the query and move through suggestions
//! - **Shelf**: keys move focus between cards, page, rate and delete
//!
//! # Example
//!
//! ```
//! use bookshelf::app::InputMode;
//!
//! assert_eq!(InputMode::default(), InputMode::Search);
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing a query.
    ///
    /// Printable keys extend the query; `Esc` closes the suggestions and a
    /// second `Esc` (or `Tab`) moves to the shelf.
    #[default]
    Search,

    /// Browsing saved books.
    ///
    /// `j`/`k` focus, `n`/`p` page, `Left`/`Right` hover stars, `Enter` rates,
    /// `d` deletes, `/` returns to search, `q` closes.
    Shelf,
}
