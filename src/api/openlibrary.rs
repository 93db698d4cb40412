//! Open Library search client pieces.
//!
//! The plugin cannot open sockets itself; the Zellij host performs the request.
//! This module only builds the request URL and turns the response body into
//! [`BookSummary`] values, so both halves are plain functions.

use crate::domain::error::{BookshelfError, Result};
use crate::domain::BookSummary;

/// Default search endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// Document fields requested from the search endpoint.
pub const SEARCH_FIELDS: &str = "title,author_name,cover_i,first_publish_year,key";

#[derive(serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(serde::Deserialize)]
struct SearchDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    cover_i: Option<i64>,
    first_publish_year: Option<i32>,
    key: Option<String>,
}

impl From<SearchDoc> for BookSummary {
    fn from(doc: SearchDoc) -> Self {
        Self {
            title: doc.title.unwrap_or_default(),
            authors: doc.author_name.unwrap_or_default(),
            cover_image_id: doc.cover_i,
            first_publish_year: doc.first_publish_year,
            identifier: doc.key,
        }
    }
}

/// Builds the search URL for `query` against `endpoint`.
///
/// The query is percent-encoded as-is; trimming is the caller's decision.
///
/// ```
/// use bookshelf::api::{build_search_url, DEFAULT_SEARCH_ENDPOINT};
///
/// let url = build_search_url(DEFAULT_SEARCH_ENDPOINT, "the hobbit");
/// assert_eq!(
///     url,
///     "https://openlibrary.org/search.json?q=the%20hobbit&fields=title,author_name,cover_i,first_publish_year,key"
/// );
/// ```
#[must_use]
pub fn build_search_url(endpoint: &str, query: &str) -> String {
    format!(
        "{endpoint}?q={}&fields={SEARCH_FIELDS}",
        urlencoding::encode(query)
    )
}

/// Parses a search response, keeping at most `limit` docs in API order.
///
/// # Errors
///
/// Returns [`BookshelfError::Api`] for a non-2xx `status` and
/// [`BookshelfError::Json`] if the body is not a search document.
pub fn parse_search_response(status: u16, body: &[u8], limit: usize) -> Result<Vec<BookSummary>> {
    if !(200..300).contains(&status) {
        return Err(BookshelfError::Api(format!("unexpected status {status}")));
    }

    let response: SearchResponse = serde_json::from_slice(body)?;
    let total = response.docs.len();

    let books: Vec<BookSummary> = response
        .docs
        .into_iter()
        .take(limit)
        .map(BookSummary::from)
        .collect();

    tracing::debug!(total_docs = total, kept = books.len(), "parsed search response");
    Ok(books)
}
