//! Domain layer for the Bookshelf plugin.
//!
//! Core types that do not depend on Zellij or on storage details.
//!
//! - [`error`]: Error type and result alias
//! - [`book`]: Book record and its display helpers
//! - [`notice`]: User-facing success and error messages

pub mod book;
pub mod error;
pub mod notice;

pub use book::{BookSummary, SavedBook, PLACEHOLDER_COVER_URL, UNKNOWN_AUTHOR};
pub use error::{BookshelfError, Result};
pub use notice::{Notice, NoticeLevel};
