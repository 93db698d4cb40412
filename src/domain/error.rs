//! Error types for the Bookshelf plugin.
//!
//! [`BookshelfError`] is the single error type used across the crate, with a
//! [`Result`] alias for convenience. Variants are implemented with `thiserror`.
//! None of these errors is fatal to the plugin: callers log them and keep the
//! UI interactive.

use thiserror::Error;

/// The main error type for Bookshelf operations.
///
/// # Examples
///
/// ```
/// use bookshelf::BookshelfError;
///
/// let err = BookshelfError::Api("unexpected status 503".to_string());
/// assert_eq!(err.to_string(), "API error: unexpected status 503");
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// Reading or writing durable storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The search API returned something we could not use.
    ///
    /// Covers non-success HTTP statuses and bodies that are not the expected
    /// `{ "docs": [...] }` document.
    #[error("API error: {0}")]
    Api(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
