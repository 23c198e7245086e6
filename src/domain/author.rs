//! Author domain model.
//!
//! Authors are a read-only projection of server state: the catalog API owns
//! them, the client only lists, sorts and searches them. The `sort` field is
//! the server's sortable rendering of the name ("Čapek, Karel") and is
//! preferred for display in the authors table when present.

use serde::{Deserialize, Serialize};

/// An author as delivered by the catalog API.
///
/// Wire format is camelCase JSON (`bookCount`), mapped via serde renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Server-side author identifier.
    pub id: i64,

    /// Display name ("Karel Čapek").
    pub name: String,

    /// Sortable name ("Čapek, Karel"), if the server provides one.
    #[serde(default)]
    pub sort: Option<String>,

    /// Number of books attributed to this author.
    #[serde(default)]
    pub book_count: i64,
}

impl Author {
    /// Returns the name to show in sorted listings.
    ///
    /// Prefers the server's sortable name and falls back to the display name,
    /// matching how the authors table labels its rows.
    #[must_use]
    pub fn sort_label(&self) -> &str {
        self.sort.as_deref().unwrap_or(&self.name)
    }

    /// Case-insensitive substring search over the author name.
    ///
    /// `term` must already be lower-cased (the list engine lower-cases the
    /// debounced search term once per pass).
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
    }
}

/// Sort key for the authors table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSortKey {
    /// Order by sortable name (falls back to display name).
    Name,
    /// Order by attributed book count.
    BookCount,
}

/// Sort direction for the authors table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Compares two authors according to the given key and direction.
///
/// Name comparison is case-insensitive lexicographic; book counts compare
/// numerically. Used as the optional comparator of the authors list engine.
#[must_use]
pub fn compare_authors(
    a: &Author,
    b: &Author,
    key: AuthorSortKey,
    order: SortOrder,
) -> std::cmp::Ordering {
    let ordering = match key {
        AuthorSortKey::Name => a
            .sort_label()
            .to_lowercase()
            .cmp(&b.sort_label().to_lowercase()),
        AuthorSortKey::BookCount => a.book_count.cmp(&b.book_count),
    };

    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64, name: &str, sort: Option<&str>, book_count: i64) -> Author {
        Author {
            id,
            name: name.to_string(),
            sort: sort.map(String::from),
            book_count,
        }
    }

    #[test]
    fn sort_label_prefers_sortable_name() {
        let a = author(1, "Karel Čapek", Some("Čapek, Karel"), 12);
        assert_eq!(a.sort_label(), "Čapek, Karel");

        let b = author(2, "Anonym", None, 1);
        assert_eq!(b.sort_label(), "Anonym");
    }

    #[test]
    fn matches_search_is_case_insensitive_substring() {
        let a = author(1, "Karel Čapek", None, 12);
        assert!(a.matches_search("čapek"));
        assert!(a.matches_search("rel"));
        assert!(!a.matches_search("hašek"));
    }

    #[test]
    fn compare_by_book_count_descending() {
        let a = author(1, "A", None, 3);
        let b = author(2, "B", None, 10);
        assert_eq!(
            compare_authors(&a, &b, AuthorSortKey::BookCount, SortOrder::Descending),
            std::cmp::Ordering::Greater
        );
    }

    #[test]
    fn deserializes_camel_case_wire_format() {
        let json = r#"{"id": 7, "name": "Jan Novák", "sort": "Novák, Jan", "bookCount": 4}"#;
        let a: Author = serde_json::from_str(json).unwrap();
        assert_eq!(a.id, 7);
        assert_eq!(a.book_count, 4);
    }
}
