//! Durable key-value storage abstraction.
//!
//! [`KeyValueStore`] mirrors the shape of browser local storage: string keys,
//! string values, synchronous reads and writes. Anything that needs typed data
//! serializes on top of it (see [`crate::storage::BookStore`]).

use crate::domain::error::Result;

/// String key-value storage that outlives a single plugin session.
///
/// # Implementations
///
/// - [`crate::storage::JsonFileStorage`]: one JSON file, atomic writes (default)
/// - [`crate::storage::MemoryStorage`]: process memory only
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The write is durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}
