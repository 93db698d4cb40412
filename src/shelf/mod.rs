//! The shelf: selection, pagination and per-card rating.
//!
//! - [`selection`]: Selection Reducer over the [`BookStore`](crate::storage::BookStore)
//! - [`pagination`]: 1-indexed page slicing and the [`Pager`] cursor
//! - [`rating`]: ephemeral [`RatingState`] per displayed card

pub mod pagination;
pub mod rating;
pub mod selection;

pub use pagination::{paginate, total_pages, Pager, DEFAULT_PAGE_SIZE};
pub use rating::{RatingState, DEFAULT_TOTAL_STARS};
pub use selection::{on_delete_requested, on_result_selected, BOOK_ADDED_MESSAGE, BOOK_REMOVED_MESSAGE};
