//! Book record model and its display helpers.
//!
//! [`BookSummary`] is what the search API produces and what the shelf stores.
//! A saved entry has exactly the same shape, so [`SavedBook`] is an alias
//! rather than a second struct. Serialized field names follow the Open Library
//! document fields, which keeps the persisted `selectedBook` array readable by
//! anything that already understands those documents.

use serde::{Deserialize, Serialize};

/// Base URL for medium-sized cover images; the cover id and `-M.jpg` are appended.
pub const COVER_URL_BASE: &str = "https://covers.openlibrary.org/b/id/";

/// Shown when a book has no cover id.
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/150x200?text=No+Cover";

/// Author line used when a book lists no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A single book as returned by search and kept on the shelf.
///
/// Immutable once created: nothing in the crate edits a summary in place, the
/// store only appends and removes whole entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Book title.
    #[serde(default)]
    pub title: String,

    /// Author names in source order. May be empty.
    #[serde(rename = "author_name", default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// Open Library cover image id.
    #[serde(rename = "cover_i", default, skip_serializing_if = "Option::is_none")]
    pub cover_image_id: Option<i64>,

    /// Year of first publication.
    #[serde(rename = "first_publish_year", default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,

    /// Work key from the source API (e.g. `/works/OL45804W`), used for deletion.
    #[serde(rename = "key", default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// A book on the shelf. Same shape as a search result.
pub type SavedBook = BookSummary;

impl BookSummary {
    /// Creates a summary with a title and identifier and nothing else.
    #[must_use]
    pub fn new(title: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            cover_image_id: None,
            first_publish_year: None,
            identifier: Some(identifier.into()),
        }
    }

    /// Builder-style setter for the author list.
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for the cover id.
    #[must_use]
    pub fn with_cover(mut self, cover_image_id: i64) -> Self {
        self.cover_image_id = Some(cover_image_id);
        self
    }

    /// Builder-style setter for the first publish year.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.first_publish_year = Some(year);
        self
    }

    /// Returns the cover image URL, or the placeholder when there is no cover id.
    ///
    /// ```
    /// use bookshelf::domain::BookSummary;
    ///
    /// let book = BookSummary::new("Dune", "/works/OL893415W").with_cover(123);
    /// assert_eq!(book.cover_url(), "https://covers.openlibrary.org/b/id/123-M.jpg");
    /// ```
    #[must_use]
    pub fn cover_url(&self) -> String {
        self.cover_image_id.map_or_else(
            || PLACEHOLDER_COVER_URL.to_string(),
            |id| format!("{COVER_URL_BASE}{id}-M.jpg"),
        )
    }

    /// Joins the authors with `", "`, falling back to [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// Year for display; blank when unknown.
    #[must_use]
    pub fn year_label(&self) -> String {
        self.first_publish_year
            .map(|year| year.to_string())
            .unwrap_or_default()
    }

    /// Whether this entry carries the given identifier.
    #[must_use]
    pub fn has_identifier(&self, identifier: &str) -> bool {
        self.identifier.as_deref() == Some(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_url_uses_medium_image_host() {
        let book = BookSummary::new("Emma", "/works/OL1W").with_cover(123);
        assert_eq!(book.cover_url(), "https://covers.openlibrary.org/b/id/123-M.jpg");
    }

    #[test]
    fn cover_url_falls_back_to_placeholder() {
        let book = BookSummary::new("Emma", "/works/OL1W");
        assert_eq!(book.cover_url(), PLACEHOLDER_COVER_URL);
    }

    #[test]
    fn author_line_joins_with_comma() {
        let book = BookSummary::new("Good Omens", "/works/OL2W").with_authors(["A", "B"]);
        assert_eq!(book.author_line(), "A, B");
    }

    #[test]
    fn author_line_unknown_when_empty() {
        let book = BookSummary::new("Beowulf", "/works/OL3W");
        assert_eq!(book.author_line(), "Unknown Author");
    }

    #[test]
    fn absent_fields_deserialize_to_defaults() {
        let book: BookSummary = serde_json::from_str(r#"{"title":"Beowulf"}"#).unwrap();
        assert!(book.authors.is_empty());
        assert_eq!(book.author_line(), UNKNOWN_AUTHOR);
        assert_eq!(book.cover_image_id, None);
        assert_eq!(book.identifier, None);
        assert_eq!(book.year_label(), "");
    }

    #[test]
    fn serializes_with_source_field_names() {
        let book = BookSummary::new("Dune", "/works/OL893415W")
            .with_authors(["Frank Herbert"])
            .with_cover(11_481_354)
            .with_year(1965);
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["author_name"][0], "Frank Herbert");
        assert_eq!(value["cover_i"], 11_481_354);
        assert_eq!(value["first_publish_year"], 1965);
        assert_eq!(value["key"], "/works/OL893415W");
    }
}
