//! Selection Reducer: turns "pick this result" and "delete this entry" into
//! store mutations.
//!
//! Neither operation fails from the caller's point of view. A storage write
//! error is logged and reported as an error [`Notice`], while the in-memory
//! shelf keeps the change.

use crate::domain::{BookSummary, Notice};
use crate::search::SearchController;
use crate::storage::BookStore;

/// Shown after a search result is saved.
pub const BOOK_ADDED_MESSAGE: &str = "Book added Successfully!";

/// Shown after a delete removed at least one entry.
pub const BOOK_REMOVED_MESSAGE: &str = "Book removed";

/// Appends `book` to the shelf and resets the search session.
///
/// Duplicates are allowed: selecting the same result twice saves it twice.
///
/// # Returns
///
/// The notice to show: [`BOOK_ADDED_MESSAGE`] on success, or an error notice
/// if the shelf could not be written to durable storage.
pub fn on_result_selected(store: &mut BookStore, search: &mut SearchController, book: BookSummary) -> Notice {
    let _span = tracing::debug_span!(
        "on_result_selected",
        title = %book.title,
        identifier = ?book.identifier
    )
    .entered();

    let persisted = store.mutate(|books| books.push(book));
    search.clear();

    match persisted {
        Ok(()) => {
            tracing::info!(book_count = store.len(), "book added to shelf");
            Notice::success(BOOK_ADDED_MESSAGE)
        }
        Err(e) => {
            tracing::error!(error = %e, "book added but shelf could not be saved");
            Notice::error(format!("Book added but not saved: {e}"))
        }
    }
}

/// Removes every entry whose identifier equals `identifier`.
///
/// `None`, or an identifier that matches nothing, is a silent no-op and
/// leaves durable storage untouched.
///
/// # Returns
///
/// `Some(notice)` if anything was removed (or removal could not be saved),
/// otherwise `None`.
pub fn on_delete_requested(store: &mut BookStore, identifier: Option<&str>) -> Option<Notice> {
    let identifier = identifier?;

    let _span = tracing::debug_span!("on_delete_requested", identifier = %identifier).entered();

    if !store.books().iter().any(|book| book.has_identifier(identifier)) {
        tracing::debug!("no shelf entry carries this identifier");
        return None;
    }

    let persisted = store.mutate(|books| {
        let before = books.len();
        books.retain(|book| !book.has_identifier(identifier));
        before - books.len()
    });

    match persisted {
        Ok(removed) => {
            tracing::info!(removed, book_count = store.len(), "book removed from shelf");
            Some(Notice::success(BOOK_REMOVED_MESSAGE))
        }
        Err(e) => {
            tracing::error!(error = %e, "book removed but shelf could not be saved");
            Some(Notice::error(format!("Book removed but not saved: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Result;
    use crate::domain::{BookshelfError, SavedBook};
    use crate::search::QueryChange;
    use crate::storage::{KeyValueStore, MemoryStorage, STORAGE_KEY};

    struct ReadOnlyStorage;

    impl KeyValueStore for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(BookshelfError::Storage("read-only".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn empty_store() -> BookStore {
        BookStore::load(Box::new(MemoryStorage::new()))
    }

    fn search() -> SearchController {
        SearchController::new("https://openlibrary.org/search.json", 5)
    }

    fn stored(store: &BookStore) -> Vec<SavedBook> {
        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn selecting_appends_and_persists_immediately() {
        let mut store = empty_store();
        let mut search = search();
        let dune = BookSummary::new("Dune", "/works/OL893415W").with_authors(["Frank Herbert"]);

        let notice = on_result_selected(&mut store, &mut search, dune.clone());

        assert_eq!(notice, Notice::success(BOOK_ADDED_MESSAGE));
        assert_eq!(store.books(), &[dune.clone()]);
        assert_eq!(stored(&store), vec![dune]);
    }

    #[test]
    fn selecting_clears_the_search_session() {
        let mut store = empty_store();
        let mut search = search();
        let QueryChange::Debounce { revision } = search.on_query_change("dune") else {
            panic!("expected debounce");
        };
        let request = search.on_debounce_elapsed(revision).unwrap();
        let dune = BookSummary::new("Dune", "/works/OL893415W");
        search.on_settled(request.token, Ok(vec![dune.clone()]));

        on_result_selected(&mut store, &mut search, dune);

        assert_eq!(search.query(), "");
        assert!(search.session().results.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut store = empty_store();
        let mut search = search();
        let emma = BookSummary::new("Emma", "/works/OL1W");

        on_result_selected(&mut store, &mut search, emma.clone());
        on_result_selected(&mut store, &mut search, emma);

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_removes_every_matching_entry() {
        let mut store = empty_store();
        let mut search = search();
        on_result_selected(&mut store, &mut search, BookSummary::new("X1", "X"));
        on_result_selected(&mut store, &mut search, BookSummary::new("Y", "Y"));
        on_result_selected(&mut store, &mut search, BookSummary::new("X2", "X"));

        let notice = on_delete_requested(&mut store, Some("X"));

        assert_eq!(notice, Some(Notice::success(BOOK_REMOVED_MESSAGE)));
        let titles: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Y"]);
        assert_eq!(stored(&store).len(), 1);
    }

    #[test]
    fn delete_without_identifier_is_a_no_op() {
        let mut store = empty_store();
        let mut search = search();
        on_result_selected(&mut store, &mut search, BookSummary::new("Emma", "/works/OL1W"));

        assert_eq!(on_delete_requested(&mut store, None), None);
        assert_eq!(on_delete_requested(&mut store, Some("/works/missing")), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_write_reports_error_but_keeps_entry() {
        let mut store = BookStore::load(Box::new(ReadOnlyStorage));
        let mut search = search();

        let notice = on_result_selected(&mut store, &mut search, BookSummary::new("Emma", "/works/OL1W"));

        assert!(notice.is_error());
        assert_eq!(store.len(), 1);
    }
}
