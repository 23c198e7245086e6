//! Catalog API queries and URL building.
//!
//! This module defines the request side of the plugin's protocol with the
//! catalog server: the typed [`Query`] value naming one of the read
//! endpoints, URL construction against a configured base, and the round-trip
//! of a query through the host's `web_request` context map so that a
//! `WebRequestResult` event can be matched back to the query that caused it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Context-map key under which the query rides a `web_request`.
const CONTEXT_KEY: &str = "knihovka_query";

/// A read query against the catalog API.
///
/// Each variant corresponds to one GET endpoint. `Query` doubles as the cache
/// key: two queries compare equal exactly when they would hit the same
/// endpoint with the same parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Query {
    /// The N most recently added books (`/books/recent?limit=N`).
    RecentBooks {
        /// Maximum number of books to return.
        limit: u32,
    },

    /// All books in the catalog (`/books`).
    AllBooks,

    /// Total book count (`/books/count`).
    BooksCount,

    /// All authors (`/authors`).
    AllAuthors,

    /// Total author count (`/authors/count`).
    AuthorsCount,

    /// Books attributed to one author (`/author/books/{id}`).
    AuthorBooks {
        /// Server-side author identifier.
        author_id: i64,
    },
}

impl Query {
    /// Builds the request URL for this query against an API base.
    ///
    /// The base is used as-is apart from a stripped trailing slash, so both
    /// `http://host/api` and `http://host/api/` configure cleanly.
    ///
    /// # Examples
    ///
    /// ```
    /// use knihovka::api::Query;
    ///
    /// let q = Query::RecentBooks { limit: 9 };
    /// assert_eq!(
    ///     q.url("http://localhost:8083/api/"),
    ///     "http://localhost:8083/api/books/recent?limit=9"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, api_base: &str) -> String {
        let base = api_base.trim_end_matches('/');
        match self {
            Self::RecentBooks { limit } => format!("{base}/books/recent?limit={limit}"),
            Self::AllBooks => format!("{base}/books"),
            Self::BooksCount => format!("{base}/books/count"),
            Self::AllAuthors => format!("{base}/authors"),
            Self::AuthorsCount => format!("{base}/authors/count"),
            Self::AuthorBooks { author_id } => format!("{base}/author/books/{author_id}"),
        }
    }

    /// Serializes the query into a `web_request` context map.
    ///
    /// The host echoes the context back verbatim in the `WebRequestResult`
    /// event; [`Query::from_context`] recovers the query there.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        if let Ok(encoded) = serde_json::to_string(self) {
            context.insert(CONTEXT_KEY.to_string(), encoded);
        }
        context
    }

    /// Recovers a query from a `WebRequestResult` context map.
    ///
    /// Returns `None` for contexts that did not originate from this plugin's
    /// fetch dispatch (missing or undecodable key).
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let encoded = context.get(CONTEXT_KEY)?;
        serde_json::from_str(encoded).ok()
    }

    /// Short label for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::RecentBooks { .. } => "recent books",
            Self::AllBooks => "all books",
            Self::BooksCount => "books count",
            Self::AllAuthors => "all authors",
            Self::AuthorsCount => "authors count",
            Self::AuthorBooks { .. } => "author books",
        }
    }
}

/// Builds the cover image URL for a book.
///
/// Covers are not fetched by the plugin; the URL is shown so the user can
/// open it externally.
#[must_use]
pub fn cover_url(api_base: &str, book_id: i64) -> String {
    let base = api_base.trim_end_matches('/');
    format!("{base}/book/cover/{book_id}")
}

/// Builds the download URL for one format of a book.
#[must_use]
pub fn download_url(api_base: &str, book_id: i64, format_id: i64) -> String {
    let base = api_base.trim_end_matches('/');
    format!("{base}/book/download/{book_id}/{format_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls() {
        let base = "http://localhost:8083/api";
        assert_eq!(Query::AllBooks.url(base), "http://localhost:8083/api/books");
        assert_eq!(
            Query::BooksCount.url(base),
            "http://localhost:8083/api/books/count"
        );
        assert_eq!(
            Query::AllAuthors.url(base),
            "http://localhost:8083/api/authors"
        );
        assert_eq!(
            Query::AuthorsCount.url(base),
            "http://localhost:8083/api/authors/count"
        );
        assert_eq!(
            Query::AuthorBooks { author_id: 17 }.url(base),
            "http://localhost:8083/api/author/books/17"
        );
        assert_eq!(
            Query::RecentBooks { limit: 20 }.url(base),
            "http://localhost:8083/api/books/recent?limit=20"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        assert_eq!(
            Query::AllBooks.url("http://h/api/"),
            "http://h/api/books"
        );
    }

    #[test]
    fn context_round_trip_preserves_parameters() {
        let query = Query::AuthorBooks { author_id: 42 };
        let context = query.to_context();
        assert_eq!(Query::from_context(&context), Some(query));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("other_plugin".to_string(), "{}".to_string());
        assert_eq!(Query::from_context(&context), None);
    }

    #[test]
    fn cover_and_download_urls() {
        assert_eq!(cover_url("http://h/api", 7), "http://h/api/book/cover/7");
        assert_eq!(
            download_url("http://h/api", 7, 3),
            "http://h/api/book/download/7/3"
        );
    }
}
