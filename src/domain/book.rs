//! Book domain model and the derived series grouping.
//!
//! Books are read-only projections of server state. A "series" is not a
//! stored entity anywhere in the system: it is recomputed on demand by
//! filtering the in-memory book collection on an exact series-name match plus
//! author-id membership, ordered by the series position. Two series that
//! share a name under the same author therefore merge, a known ambiguity of
//! the data model inherited from the server.

use serde::{Deserialize, Serialize};

use crate::domain::author::Author;

/// A downloadable format of a book (EPUB, MOBI, PDF, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    /// Server-side format identifier, used in the download URL.
    pub id: i64,

    /// Format type label, typically the file extension ("EPUB").
    #[serde(rename = "type")]
    pub format_type: String,

    /// File name on the server.
    pub file_name: String,
}

/// A book as delivered by the catalog API.
///
/// Wire format is camelCase JSON (`hasCover`, `seriesName`, ...), mapped via
/// serde renames. The `comments` field may contain HTML markup from the
/// server; display code strips it before rendering (see
/// [`crate::domain::locale::strip_markup`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-side book identifier.
    pub id: i64,

    /// Book title.
    pub title: String,

    /// Description text; may contain markup.
    #[serde(default)]
    pub comments: String,

    /// Language code ("cs", "en").
    #[serde(default)]
    pub language: String,

    /// Server-side filesystem path; opaque to the client.
    #[serde(default)]
    pub path: String,

    /// Whether the server has a cover image for this book.
    #[serde(default)]
    pub has_cover: bool,

    /// Series name, if the book belongs to one.
    #[serde(default)]
    pub series_name: Option<String>,

    /// Position within the series. Missing positions are treated as 0 when
    /// ordering a series view.
    #[serde(default)]
    pub series_number: f64,

    /// Publication date, if known.
    #[serde(default)]
    pub publish_date: Option<String>,

    /// Date the book was added to the catalog.
    #[serde(default)]
    pub insert_date: String,

    /// Authors of the book (embedded many-to-many projection).
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Downloadable formats.
    #[serde(default)]
    pub formats: Vec<Format>,

    /// Free-text tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Server-precomputed "Title (Series #n)" string.
    #[serde(default)]
    pub title_and_series: String,
}

impl Book {
    /// Case-insensitive substring search across title, author names, tags,
    /// series name and language.
    ///
    /// `term` must already be lower-cased; the list engine lower-cases the
    /// debounced search term once per filtering pass.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self
                .authors
                .iter()
                .any(|author| author.name.to_lowercase().contains(term))
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(term))
            || self
                .series_name
                .as_ref()
                .is_some_and(|series| series.to_lowercase().contains(term))
            || self.language.to_lowercase().contains(term)
    }

    /// Returns the first listed author, if any.
    ///
    /// Used by the UI when opening an author detail from a book row.
    #[must_use]
    pub fn primary_author(&self) -> Option<&Author> {
        self.authors.first()
    }

    /// Whether any of the book's authors has the given id.
    #[must_use]
    pub fn has_author(&self, author_id: i64) -> bool {
        self.authors.iter().any(|author| author.id == author_id)
    }
}

/// Computes the derived series view for an `(author_id, series_name)` pair.
///
/// Selects exactly the books whose series name equals `series_name` AND whose
/// author list contains `author_id`, ordered ascending by series number with
/// missing numbers treated as 0.
///
/// # Examples
///
/// ```
/// use knihovka::domain::{series_books, Author, Book};
///
/// # fn book(id: i64, series: &str, number: f64, author_id: i64) -> Book {
/// #     let mut b: Book = serde_json::from_str(
/// #         r#"{"id": 0, "title": "t"}"#,
/// #     ).unwrap();
/// #     b.id = id;
/// #     b.series_name = Some(series.to_string());
/// #     b.series_number = number;
/// #     b.authors = vec![Author { id: author_id, name: "a".into(), sort: None, book_count: 0 }];
/// #     b
/// # }
/// let books = vec![book(1, "Trilogie", 2.0, 5), book(2, "Trilogie", 1.0, 5)];
/// let series: Vec<_> = series_books(&books, 5, "Trilogie");
/// assert_eq!(series[0].id, 2);
/// ```
#[must_use]
pub fn series_books<'a>(books: &'a [Book], author_id: i64, series_name: &str) -> Vec<&'a Book> {
    let mut selected: Vec<&Book> = books
        .iter()
        .filter(|book| {
            book.series_name.as_deref() == Some(series_name) && book.has_author(author_id)
        })
        .collect();

    selected.sort_by(|a, b| {
        a.series_number
            .partial_cmp(&b.series_number)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    selected
}

/// Orders an author's books for the author detail view.
///
/// Books without a series go last; books of the same series sort by series
/// number; distinct series sort by name. The input order is preserved only
/// between books that compare equal (stable sort).
#[must_use]
pub fn sort_author_books(books: &[Book]) -> Vec<&Book> {
    let mut shelf: Vec<&Book> = books.iter().collect();

    shelf.sort_by(|a, b| match (&a.series_name, &b.series_name) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(series_a), Some(series_b)) => {
            if series_a == series_b {
                a.series_number
                    .partial_cmp(&b.series_number)
                    .unwrap_or(std::cmp::Ordering::Equal)
            } else {
                series_a.to_lowercase().cmp(&series_b.to_lowercase())
            }
        }
    });

    shelf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64) -> Author {
        Author {
            id,
            name: format!("author-{id}"),
            sort: None,
            book_count: 0,
        }
    }

    fn book(id: i64, series: Option<&str>, number: f64, author_ids: &[i64]) -> Book {
        Book {
            id,
            title: format!("book-{id}"),
            comments: String::new(),
            language: "cs".to_string(),
            path: String::new(),
            has_cover: false,
            series_name: series.map(String::from),
            series_number: number,
            publish_date: None,
            insert_date: String::new(),
            authors: author_ids.iter().copied().map(author).collect(),
            formats: vec![],
            tags: vec![],
            title_and_series: String::new(),
        }
    }

    #[test]
    fn series_view_requires_name_and_author_membership() {
        let books = vec![
            book(1, Some("Saga"), 2.0, &[5]),
            book(2, Some("Saga"), 1.0, &[5, 6]),
            // same series name, different author: excluded
            book(3, Some("Saga"), 1.0, &[7]),
            // same author, different series: excluded
            book(4, Some("Other"), 1.0, &[5]),
            // no series: excluded
            book(5, None, 0.0, &[5]),
        ];

        let series = series_books(&books, 5, "Saga");
        let ids: Vec<i64> = series.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn series_view_treats_missing_number_as_zero() {
        let books = vec![
            book(1, Some("Saga"), 3.0, &[5]),
            // default-deserialized books get series_number 0.0
            book(2, Some("Saga"), 0.0, &[5]),
            book(3, Some("Saga"), 1.0, &[5]),
        ];

        let series = series_books(&books, 5, "Saga");
        let ids: Vec<i64> = series.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn author_shelf_orders_series_groups_before_standalone_books() {
        let books = vec![
            book(1, None, 0.0, &[5]),
            book(2, Some("Beta"), 2.0, &[5]),
            book(3, Some("Alfa"), 1.0, &[5]),
            book(4, Some("Beta"), 1.0, &[5]),
        ];

        let shelf = sort_author_books(&books);
        let ids: Vec<i64> = shelf.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn search_matches_title_authors_tags_series_and_language() {
        let mut b = book(1, Some("Kosmická sága"), 1.0, &[5]);
        b.title = "Válka s mloky".to_string();
        b.tags = vec!["Sci-fi".to_string()];
        b.authors[0].name = "Karel Čapek".to_string();

        assert!(b.matches_search("mloky"));
        assert!(b.matches_search("čapek"));
        assert!(b.matches_search("sci-fi"));
        assert!(b.matches_search("kosmická"));
        assert!(b.matches_search("cs"));
        assert!(!b.matches_search("nonexistent"));
    }

    #[test]
    fn deserializes_camel_case_wire_format() {
        let json = r#"{
            "id": 42,
            "title": "Krakatit",
            "comments": "<p>Výbušnina.</p>",
            "language": "cs",
            "path": "Capek/Krakatit",
            "hasCover": true,
            "seriesName": null,
            "seriesNumber": 0,
            "publishDate": "1924-01-01",
            "insertDate": "2024-03-01T10:00:00",
            "authors": [{"id": 5, "name": "Karel Čapek", "bookCount": 12}],
            "formats": [{"id": 9, "type": "EPUB", "fileName": "krakatit.epub"}],
            "tags": ["klasika"],
            "titleAndSeries": "Krakatit"
        }"#;

        let b: Book = serde_json::from_str(json).unwrap();
        assert!(b.has_cover);
        assert_eq!(b.formats[0].format_type, "EPUB");
        assert_eq!(b.authors[0].id, 5);
        assert!(b.series_name.is_none());
    }
}
