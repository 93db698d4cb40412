//! Persistent list of saved books.
//!
//! [`BookStore`] owns the shelf. It reads the serialized list from durable
//! storage once, on load, and writes the full list back after every mutation
//! before returning to the caller. There is no write queue: a personal shelf
//! is small enough to rewrite whole.

use crate::domain::error::Result;
use crate::domain::SavedBook;
use crate::storage::backend::KeyValueStore;

/// Storage key holding the JSON array of saved books.
pub const STORAGE_KEY: &str = "selectedBook";

/// Handle returned by [`BookStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[SavedBook]) + Send>;

/// The user's saved books, mirrored to durable storage.
pub struct BookStore {
    books: Vec<SavedBook>,
    storage: Box<dyn KeyValueStore>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl BookStore {
    /// Loads the shelf from `storage`.
    ///
    /// Never fails. An absent key, unreadable storage or a value that is not a
    /// JSON array of books all produce an empty shelf; the latter two are
    /// logged at `warn`.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let _span = tracing::debug_span!("book_store_load").entered();

        let books = match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedBook>>(&raw) {
                Ok(books) => books,
                Err(e) => {
                    tracing::warn!(error = %e, raw_len = raw.len(), "persisted shelf is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::debug!("no persisted shelf");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted shelf, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(book_count = books.len(), "shelf loaded");

        Self {
            books,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current shelf contents in insertion order.
    #[must_use]
    pub fn books(&self) -> &[SavedBook] {
        &self.books
    }

    /// Number of saved books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the shelf is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Read access to the backing storage.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Applies `f` to the list, persists the result, then notifies subscribers.
    ///
    /// The in-memory list keeps the change even if persisting fails, so the UI
    /// stays consistent with what the user just did.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the list could not be written.
    pub fn mutate<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<SavedBook>) -> R,
    {
        let before = self.books.len();
        let output = f(&mut self.books);

        let _span = tracing::debug_span!(
            "book_store_mutate",
            before = before,
            after = self.books.len()
        )
        .entered();

        let persisted = self.persist();

        for (_, listener) in &mut self.listeners {
            listener(&self.books);
        }

        persisted.map(|()| output)
    }

    /// Registers `listener` to run after every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[SavedBook]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.books)?;
        self.storage.set_item(STORAGE_KEY, &json)?;
        tracing::debug!(book_count = self.books.len(), "shelf persisted");
        Ok(())
    }
}

impl std::fmt::Debug for BookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookStore")
            .field("books", &self.books)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
