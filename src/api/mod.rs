//! Remote book-metadata API.
//!
//! - `openlibrary`: search URL construction and response parsing

pub mod openlibrary;

pub use openlibrary::{build_search_url, parse_search_response, DEFAULT_SEARCH_ENDPOINT, SEARCH_FIELDS};
