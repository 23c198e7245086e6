//! Response decoding for catalog API fetches.
//!
//! This module turns the raw `(status, body)` of a completed `web_request`
//! into a typed [`Payload`], normalizing the three failure classes (non-2xx
//! status, undecodable JSON, transport errors reported by the host) into
//! [`KnihovkaError`] values. There is deliberately no retry logic: a failed
//! fetch surfaces immediately to the view that asked for it.

use crate::api::query::Query;
use crate::domain::{Author, Book, KnihovkaError, Result};

/// A decoded response payload from one catalog endpoint.
///
/// The variant mirrors what the query promised, so callers can route the
/// payload to the right state slot without re-inspecting the query.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A list of books (`/books`, `/books/recent`, `/author/books/{id}`).
    Books(Vec<Book>),

    /// A list of authors (`/authors`).
    Authors(Vec<Author>),

    /// A bare count (`/books/count`, `/authors/count`).
    Count(u64),
}

/// Decodes a completed fetch into a typed payload.
///
/// # Errors
///
/// - [`KnihovkaError::Http`] for any non-2xx status, carrying the status code
///   and its reason phrase
/// - [`KnihovkaError::Decode`] when the body is not the JSON shape the
///   endpoint promises
pub fn decode(query: &Query, status: u16, body: &[u8]) -> Result<Payload> {
    // The host reports transport failures (refused connection, DNS) as
    // status 0 with the error text in the body.
    if status == 0 {
        return Err(KnihovkaError::Transport(
            String::from_utf8_lossy(body).into_owned(),
        ));
    }

    if !(200..300).contains(&status) {
        return Err(KnihovkaError::Http {
            status,
            status_text: status_text(status).to_string(),
        });
    }

    let payload = match query {
        Query::RecentBooks { .. } | Query::AllBooks | Query::AuthorBooks { .. } => {
            Payload::Books(serde_json::from_slice(body)?)
        }
        Query::AllAuthors => Payload::Authors(serde_json::from_slice(body)?),
        Query::BooksCount | Query::AuthorsCount => Payload::Count(serde_json::from_slice(body)?),
    };

    Ok(payload)
}

/// Canonical reason phrase for an HTTP status code.
///
/// The host's `WebRequestResult` event carries only the numeric status, so
/// the phrase shown in error banners is reconstructed here.
#[must_use]
pub fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        408 => "Request Timeout",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_book_list() {
        let body = br#"[{"id": 1, "title": "Krakatit"}]"#;
        let payload = decode(&Query::AllBooks, 200, body).unwrap();
        match payload {
            Payload::Books(books) => {
                assert_eq!(books.len(), 1);
                assert_eq!(books[0].title, "Krakatit");
            }
            other => panic!("expected books, got {other:?}"),
        }
    }

    #[test]
    fn decodes_author_list() {
        let body = r#"[{"id": 5, "name": "Karel Čapek", "bookCount": 12}]"#.as_bytes();
        let payload = decode(&Query::AllAuthors, 200, body).unwrap();
        assert!(matches!(payload, Payload::Authors(ref a) if a.len() == 1));
    }

    #[test]
    fn decodes_bare_count() {
        let payload = decode(&Query::BooksCount, 200, b"250").unwrap();
        assert_eq!(payload, Payload::Count(250));
    }

    #[test]
    fn non_2xx_status_yields_http_error_with_status_text() {
        let err = decode(&Query::AllAuthors, 500, b"").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal Server Error"));
    }

    #[test]
    fn status_zero_yields_transport_error() {
        let err = decode(&Query::AllBooks, 0, b"connection refused").unwrap_err();
        assert!(matches!(err, KnihovkaError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn malformed_body_yields_decode_error() {
        let err = decode(&Query::AllBooks, 200, b"not json").unwrap_err();
        assert!(matches!(err, KnihovkaError::Decode(_)));
    }
}
