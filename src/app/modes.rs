//! Input, page and view-navigation state types.
//!
//! This module defines the state machine enums that control user interaction:
//! which catalog page is active, how keyboard input is interpreted, and where
//! the master/detail navigation currently stands.
//!
//! # Navigation state machine
//!
//! Every page carries a [`PageView`] with three reachable states:
//!
//! - **List** (initial): the page's master list
//! - **`AuthorDetail`**: books of one selected author
//! - **`SeriesDetail`**: books of one `(author, series)` pair
//!
//! Selecting an author replaces any series selection and vice versa; the two
//! selections are mutually exclusive, except that on the Authors page a
//! series opened from inside an author's detail remembers that author, so
//! backing out returns to the author detail rather than the root list.
//! Nothing here survives a plugin reload.

/// The catalog page currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing page: recent books plus catalog totals.
    Home,

    /// All books with search and progressive loading.
    Books,

    /// Author table with search, sorting and progressive loading.
    Authors,
}

/// Focus state within search mode.
///
/// Determines whether keystrokes edit the query or navigate the filtered
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    Typing,

    /// User is navigating through filtered results.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and what the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}

/// An author opened in a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSelection {
    /// Server-side author identifier.
    pub author_id: i64,

    /// Display name, shown in the detail header.
    pub author_name: String,
}

/// A series opened in a detail view.
///
/// A series has no identifier of its own; it is addressed by the
/// `(author_id, series_name)` pair that defines the derived grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSelection {
    /// Author whose membership defines the series.
    pub author_id: i64,

    /// Exact series name.
    pub series_name: String,
}

/// Which of the three navigation states a page is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    AuthorDetail,
    SeriesDetail,
}

/// Master/detail navigation state of one page.
///
/// Holds the (mutually exclusive) author and series selections. When both are
/// set (reachable only on the Authors page) the series detail is shown and
/// the author selection records where "back" should land.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    /// Selected author, if an author detail is open (or underneath a series).
    pub selected_author: Option<AuthorSelection>,

    /// Selected series, if a series detail is open.
    pub selected_series: Option<SeriesSelection>,
}

impl PageView {
    /// Current navigation state. The series detail wins when both
    /// selections are set.
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        if self.selected_series.is_some() {
            ViewKind::SeriesDetail
        } else if self.selected_author.is_some() {
            ViewKind::AuthorDetail
        } else {
            ViewKind::List
        }
    }

    /// Whether the master list is showing.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.kind() == ViewKind::List
    }

    /// Opens an author detail, clearing any series selection.
    pub fn open_author(&mut self, selection: AuthorSelection) {
        self.selected_series = None;
        self.selected_author = Some(selection);
    }

    /// Opens a series detail.
    ///
    /// With `keep_author`, an already-open author detail is remembered so
    /// that backing out of the series returns to it; otherwise the author
    /// selection is cleared (mutual exclusivity).
    pub fn open_series(&mut self, selection: SeriesSelection, keep_author: bool) {
        if !keep_author {
            self.selected_author = None;
        }
        self.selected_series = Some(selection);
    }

    /// Performs the back action.
    ///
    /// With `series_returns_to_author` (the Authors page), leaving a series
    /// that was opened on top of an author detail lands on that detail;
    /// every other back lands on the list.
    ///
    /// Returns `true` if the page is now showing its master list.
    pub fn back(&mut self, series_returns_to_author: bool) -> bool {
        if series_returns_to_author
            && self.selected_series.is_some()
            && self.selected_author.is_some()
        {
            self.selected_series = None;
            return false;
        }

        self.selected_series = None;
        self.selected_author = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64) -> AuthorSelection {
        AuthorSelection {
            author_id: id,
            author_name: format!("author-{id}"),
        }
    }

    fn series(id: i64, name: &str) -> SeriesSelection {
        SeriesSelection {
            author_id: id,
            series_name: name.to_string(),
        }
    }

    #[test]
    fn selections_are_mutually_exclusive_by_default() {
        let mut view = PageView::default();
        view.open_author(author(1));
        assert_eq!(view.kind(), ViewKind::AuthorDetail);

        view.open_series(series(1, "Saga"), false);
        assert_eq!(view.kind(), ViewKind::SeriesDetail);
        assert!(view.selected_author.is_none());

        view.open_author(author(2));
        assert_eq!(view.kind(), ViewKind::AuthorDetail);
        assert!(view.selected_series.is_none());
    }

    #[test]
    fn back_from_series_returns_to_author_when_remembered() {
        let mut view = PageView::default();
        view.open_author(author(1));
        view.open_series(series(1, "Saga"), true);

        assert!(!view.back(true));
        assert_eq!(view.kind(), ViewKind::AuthorDetail);

        assert!(view.back(true));
        assert_eq!(view.kind(), ViewKind::List);
    }

    #[test]
    fn back_from_series_without_memory_lands_on_list() {
        let mut view = PageView::default();
        view.open_series(series(1, "Saga"), false);

        assert!(view.back(false));
        assert_eq!(view.kind(), ViewKind::List);
    }
}
