//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer expiries and completed fetches, translating them into state changes
//! and action sequences. It is the primary control flow coordinator of the
//! plugin.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow:
//!
//! 1. Events arrive from the plugin shim (keys, timers, web results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`AppState`] methods
//! 4. Actions are collected and returned for execution by the shim
//!
//! # Event categories
//!
//! - **Navigation**: cursor movement, page switching, drill-down and back
//! - **Search**: mode changes and query editing (debounced)
//! - **Progressive loading**: explicit and automatic load-more
//! - **System**: timer expiries, permission grants, completed fetches

use crate::api::{download_url, Payload, Query};
use crate::app::actions::Action;
use crate::app::modes::{AuthorSelection, InputMode, Page, SearchFocus, SeriesSelection};
use crate::app::state::{now_ms, AppState};
use crate::app::timers::{
    TimerKind, DEBOUNCE_MS, LOAD_MORE_DELAY_MS, RESTORE_DELAY_MS,
};
use crate::domain::error::Result;

/// Events triggered by user input, timer expiries or completed fetches.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes them sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the selection cursor down by one row (wraps to top).
    CursorDown,
    /// Moves the selection cursor up by one row (wraps to bottom).
    CursorUp,
    /// Activates the row under the cursor: opens the author detail on the
    /// authors table, toggles the description elsewhere.
    SelectEntry,
    /// Opens the author detail of the selected book's first author.
    OpenAuthorOfSelected,
    /// Opens the series detail of the selected book's series.
    OpenSeriesOfSelected,
    /// Leaves the current detail view (list ← author ← series).
    Back,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Refocuses the search input from result navigation.
    FocusSearchBar,
    /// Moves focus from the search input to the results.
    FocusResults,
    /// Leaves search mode. The term persists (process-wide UI state).
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character of the search query.
    Backspace,

    /// Switches to the landing page.
    ShowHome,
    /// Switches to the books page.
    ShowBooks,
    /// Switches to the authors page.
    ShowAuthors,

    /// Toggles between the light and dark theme.
    ToggleTheme,
    /// Explicitly grows the displayed slice by one page.
    LoadMore,
    /// Toggles the authors table sort column (name / book count).
    ToggleSortKey,
    /// Reverses the authors table sort direction.
    ToggleSortOrder,
    /// Opens the download of the selected book's first format.
    DownloadSelected,

    /// A host timeout fired; due timers are resolved against this clock.
    Tick {
        /// Current wall clock in Unix milliseconds.
        now_ms: i64,
    },

    /// The host granted the requested permissions; initial fetches can go
    /// out.
    PermissionsGranted,

    /// A dispatched fetch completed (or failed) and was decoded.
    QueryCompleted {
        /// The query recovered from the request context.
        query: Query,
        /// Decoded payload, or the displayable error message.
        result: std::result::Result<Payload, String>,
    },
}

/// Processes an event, mutates application state, and returns whether the UI
/// should re-render along with actions to execute.
///
/// # Errors
///
/// Returns errors from state mutation methods. The handler itself never
/// fails on bad input; unknown or out-of-context events degrade to no-ops.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::CursorDown => {
            state.move_selection_down();
            Ok((true, auto_load_after_move(state)))
        }
        Event::CursorUp => {
            state.move_selection_up();
            Ok((true, auto_load_after_move(state)))
        }
        Event::SelectEntry => handle_select_entry(state),
        Event::OpenAuthorOfSelected => handle_open_author(state),
        Event::OpenSeriesOfSelected => handle_open_series(state),
        Event::Back => handle_back(state),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            if !state.in_searchable_list() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            let term_empty = state
                .list_for(state.page)
                .map_or(true, |list| list.raw_term().is_empty());

            if term_empty {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!("exiting search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }
            let page = state.page;
            let Some(list) = state.list_for_mut(page) else {
                return Ok((false, vec![]));
            };
            list.push_char(*c);
            tracing::trace!(char = %c, "search query updated");
            Ok((true, vec![schedule(state, TimerKind::Debounce(page), DEBOUNCE_MS)]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }
            let page = state.page;
            let Some(list) = state.list_for_mut(page) else {
                return Ok((false, vec![]));
            };
            if !list.pop_char() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![schedule(state, TimerKind::Debounce(page), DEBOUNCE_MS)]))
        }

        Event::ShowHome => switch_page(state, Page::Home),
        Event::ShowBooks => switch_page(state, Page::Books),
        Event::ShowAuthors => switch_page(state, Page::Authors),

        Event::ToggleTheme => {
            state.dark_mode = !state.dark_mode;
            tracing::debug!(dark_mode = state.dark_mode, "theme toggled");
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            if !state.in_searchable_list() {
                return Ok((false, vec![]));
            }
            let total = state.filtered_total();
            let page = state.page;
            let started = state
                .list_for_mut(page)
                .is_some_and(|list| list.begin_load_more(total));
            if !started {
                return Ok((false, vec![]));
            }
            Ok((
                true,
                vec![schedule(state, TimerKind::LoadMore(page), LOAD_MORE_DELAY_MS)],
            ))
        }
        Event::ToggleSortKey => {
            if state.page != Page::Authors || !state.view().is_list() {
                return Ok((false, vec![]));
            }
            use crate::domain::AuthorSortKey;
            state.authors_sort_key = match state.authors_sort_key {
                AuthorSortKey::Name => AuthorSortKey::BookCount,
                AuthorSortKey::BookCount => AuthorSortKey::Name,
            };
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ToggleSortOrder => {
            if state.page != Page::Authors || !state.view().is_list() {
                return Ok((false, vec![]));
            }
            state.authors_sort_order = state.authors_sort_order.toggled();
            Ok((true, vec![]))
        }
        Event::DownloadSelected => {
            let Some(book) = state.selected_book() else {
                return Ok((false, vec![]));
            };
            let Some(format) = book.formats.first() else {
                tracing::debug!(book_id = book.id, "selected book has no formats");
                return Ok((false, vec![]));
            };
            let url = download_url(&state.api_base, book.id, format.id);
            tracing::debug!(book_id = book.id, url = %url, "opening download");
            Ok((false, vec![Action::OpenDownload { url }]))
        }

        Event::Tick { now_ms } => handle_tick(state, *now_ms),

        Event::PermissionsGranted => {
            let mut actions = Vec::new();
            let limit = state.recent_limit;
            state.ensure(Query::BooksCount, &mut actions);
            state.ensure(Query::AuthorsCount, &mut actions);
            state.ensure(Query::RecentBooks { limit }, &mut actions);
            Ok((true, actions))
        }

        Event::QueryCompleted { query, result } => match result {
            Ok(payload) => {
                state
                    .cache
                    .complete(query.clone(), payload.clone(), now_ms());
                state.apply_payload(query, payload.clone());
                Ok((true, vec![]))
            }
            Err(message) => {
                tracing::warn!(query = query.label(), error = %message, "fetch failed");
                state.cache.fail(query);
                state.fail_query(query, message.clone());
                Ok((true, vec![]))
            }
        },
    }
}

/// Arms a timer of the given kind and returns the matching shim action.
fn schedule(state: &mut AppState, kind: TimerKind, delay_ms: i64) -> Action {
    let delay = state.timers.schedule(kind, now_ms(), delay_ms);
    Action::StartTimer { delay_ms: delay }
}

/// Triggers an automatic load-more when cursor movement brought the view
/// near the end of the displayed slice.
fn auto_load_after_move(state: &mut AppState) -> Vec<Action> {
    if !state.in_searchable_list() {
        return vec![];
    }

    let total = state.filtered_total();
    let cursor = state.selected_index;
    let page = state.page;

    let started = state.list_for_mut(page).is_some_and(|list| {
        list.should_auto_load(cursor, total) && list.begin_load_more(total)
    });

    if started {
        tracing::debug!(cursor, total, "auto load-more triggered");
        vec![schedule(state, TimerKind::LoadMore(page), LOAD_MORE_DELAY_MS)]
    } else {
        vec![]
    }
}

/// Enter on a row: authors table opens the author, book rows toggle the
/// description in the detail pane.
fn handle_select_entry(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if state.page == Page::Authors && state.view().is_list() {
        let Some(author) = state.selected_author_row() else {
            return Ok((false, vec![]));
        };
        let selection = AuthorSelection {
            author_id: author.id,
            author_name: author.name.clone(),
        };
        return Ok((true, open_author_detail(state, selection)));
    }

    let Some(book) = state.selected_book() else {
        return Ok((false, vec![]));
    };
    let id = book.id;
    if !state.expanded_descriptions.remove(&id) {
        state.expanded_descriptions.insert(id);
    }
    Ok((true, vec![]))
}

/// Opens the author detail of the selected book's first author.
fn handle_open_author(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(book) = state.selected_book() else {
        return Ok((false, vec![]));
    };
    let Some(author) = book.primary_author() else {
        return Ok((false, vec![]));
    };
    let selection = AuthorSelection {
        author_id: author.id,
        author_name: author.name.clone(),
    };
    Ok((true, open_author_detail(state, selection)))
}

/// Shared drill-down into an author detail: saves the scroll position,
/// replaces any series selection, resets the cursor and requests the
/// author's books.
fn open_author_detail(state: &mut AppState, selection: AuthorSelection) -> Vec<Action> {
    let page = state.page;
    save_scroll_if_listing(state);
    state.timers.cancel(TimerKind::RestoreScroll(page));

    tracing::debug!(
        author_id = selection.author_id,
        author = %selection.author_name,
        "opening author detail"
    );

    let author_id = selection.author_id;
    state.view_mut().open_author(selection);
    state.input_mode = InputMode::Normal;
    state.selected_index = 0;

    let mut actions = Vec::new();
    state.ensure(Query::AuthorBooks { author_id }, &mut actions);
    actions
}

/// Opens the series detail of the selected book.
fn handle_open_series(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(book) = state.selected_book() else {
        return Ok((false, vec![]));
    };
    let Some(series_name) = book.series_name.clone() else {
        return Ok((false, vec![]));
    };

    // From inside an author detail the series belongs to that author;
    // from a plain book row it belongs to the book's first author.
    let author_id = match &state.view().selected_author {
        Some(author) => author.author_id,
        None => match book.primary_author() {
            Some(author) => author.id,
            None => return Ok((false, vec![])),
        },
    };

    let page = state.page;
    save_scroll_if_listing(state);
    state.timers.cancel(TimerKind::RestoreScroll(page));

    tracing::debug!(author_id, series = %series_name, "opening series detail");

    let keep_author = page == Page::Authors;
    state
        .view_mut()
        .open_series(SeriesSelection { author_id, series_name }, keep_author);
    state.input_mode = InputMode::Normal;
    state.selected_index = 0;

    // Series membership is derived from the full catalog.
    let mut actions = Vec::new();
    state.ensure(Query::AllBooks, &mut actions);
    Ok((true, actions))
}

/// Saves the current cursor position when leaving a master list.
fn save_scroll_if_listing(state: &mut AppState) {
    if !state.view().is_list() {
        return;
    }
    let offset = state.selected_index;
    let page = state.page;
    if let Some(scroll) = state.scroll_for_mut(page) {
        scroll.save(offset);
    }
}

/// Back action: series → author detail (Authors page) or detail → list,
/// scheduling the delayed scroll restore when a list becomes visible.
fn handle_back(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if state.view().is_list() {
        return Ok((false, vec![]));
    }

    let page = state.page;
    let back_to_list = state.view_mut().back(page == Page::Authors);
    state.selected_index = 0;
    state.clamp_selection();

    let mut actions = Vec::new();
    if back_to_list && state.scroll_restorable(page) {
        actions.push(schedule(state, TimerKind::RestoreScroll(page), RESTORE_DELAY_MS));
    }

    Ok((true, actions))
}

/// Page switching. The page being left loses its transient view state
/// (selections, expanded descriptions), matching a full remount; returning
/// to a list page schedules its scroll restore.
fn switch_page(state: &mut AppState, target: Page) -> Result<(bool, Vec<Action>)> {
    if state.page == target {
        return Ok((false, vec![]));
    }

    // The old page's detail selections do not survive navigation.
    *state.view_mut() = Default::default();
    state.expanded_descriptions.clear();

    state.page = target;
    state.input_mode = InputMode::Normal;
    state.selected_index = 0;

    let mut actions = Vec::new();
    let limit = state.recent_limit;
    match target {
        Page::Home => {
            state.ensure(Query::RecentBooks { limit }, &mut actions);
            state.ensure(Query::BooksCount, &mut actions);
            state.ensure(Query::AuthorsCount, &mut actions);
        }
        Page::Books => {
            state.ensure(Query::AllBooks, &mut actions);
        }
        Page::Authors => {
            state.ensure(Query::AllAuthors, &mut actions);
            // Series drill-down from an author detail needs the catalog.
            state.ensure(Query::AllBooks, &mut actions);
        }
    }

    if state.scroll_restorable(target) {
        actions.push(schedule(state, TimerKind::RestoreScroll(target), RESTORE_DELAY_MS));
    }

    Ok((true, actions))
}

/// Resolves due timers against the supplied clock.
fn handle_tick(state: &mut AppState, now: i64) -> Result<(bool, Vec<Action>)> {
    let fired = state.timers.fire_due(now);
    if fired.is_empty() {
        return Ok((false, vec![]));
    }

    let mut render = false;
    for kind in fired {
        match kind {
            TimerKind::Debounce(page) => {
                let changed = state
                    .list_for_mut(page)
                    .is_some_and(|list| list.settle_debounce());
                if changed {
                    tracing::debug!(?page, "debounced search term settled");
                    state.clamp_selection();
                    render = true;
                }
            }
            TimerKind::LoadMore(page) => {
                let finished = state
                    .list_for_mut(page)
                    .is_some_and(|list| list.finish_load_more());
                if finished {
                    render = true;
                }
            }
            TimerKind::RestoreScroll(page) => {
                if state.page == page && state.view().is_list() {
                    if let Some(scroll) = state.scroll_for_mut(page) {
                        let offset = scroll.offset();
                        state.selected_index = offset;
                        state.clamp_selection();
                        render = true;
                    }
                }
            }
        }
    }

    Ok((render, vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::ViewKind;
    use crate::app::state::Fetch;
    use crate::domain::{Author, Book};
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(
            "http://localhost:8083/api".to_string(),
            9,
            Theme::from_name("light").unwrap(),
            Theme::from_name("dark").unwrap(),
            false,
        )
    }

    fn author(id: i64, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
            sort: None,
            book_count: 3,
        }
    }

    fn book(id: i64, title: &str, series: Option<&str>) -> Book {
        Book {
            id,
            title: title.to_string(),
            comments: String::new(),
            language: "cs".to_string(),
            path: String::new(),
            has_cover: false,
            series_name: series.map(String::from),
            series_number: 1.0,
            publish_date: None,
            insert_date: String::new(),
            authors: vec![author(5, "Karel Čapek")],
            formats: vec![],
            tags: vec![],
            title_and_series: String::new(),
        }
    }

    fn settle_all_timers(state: &mut AppState) {
        let far_future = now_ms() + 60_000;
        handle_event(state, &Event::Tick { now_ms: far_future }).unwrap();
    }

    #[test]
    fn permissions_grant_dispatches_initial_fetches() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();

        assert!(actions.contains(&Action::Fetch(Query::BooksCount)));
        assert!(actions.contains(&Action::Fetch(Query::AuthorsCount)));
        assert!(actions.contains(&Action::Fetch(Query::RecentBooks { limit: 9 })));
    }

    #[test]
    fn completed_count_query_fills_slot_and_cache() {
        let mut state = state();
        handle_event(
            &mut state,
            &Event::QueryCompleted {
                query: Query::BooksCount,
                result: Ok(Payload::Count(250)),
            },
        )
        .unwrap();

        assert_eq!(state.books_count.ready(), Some(&250));

        // A later ensure is served from cache without a new fetch.
        let mut actions = Vec::new();
        state.ensure(Query::BooksCount, &mut actions);
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_query_surfaces_error_message() {
        let mut state = state();
        state.page = Page::Authors;
        handle_event(
            &mut state,
            &Event::QueryCompleted {
                query: Query::AllAuthors,
                result: Err("API request failed: 500 Internal Server Error".to_string()),
            },
        )
        .unwrap();

        let error = state.authors.error().unwrap();
        assert!(error.contains("500"));
    }

    #[test]
    fn typing_debounces_before_filtering() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books =
            Fetch::Ready((0..5).map(|i| book(i, &format!("Kniha {i}"), None)).collect());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Char('k')).unwrap();
        assert!(matches!(actions[0], Action::StartTimer { .. }));

        // Raw term typed, debounced term still empty.
        assert_eq!(state.books_list.raw_term(), "k");
        assert_eq!(state.books_list.debounced_term(), "");

        settle_all_timers(&mut state);
        assert_eq!(state.books_list.debounced_term(), "k");
    }

    #[test]
    fn settled_search_resets_display_count_after_load_more() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books =
            Fetch::Ready((0..100).map(|i| book(i, &format!("Kniha {i}"), None)).collect());

        handle_event(&mut state, &Event::LoadMore).unwrap();
        settle_all_timers(&mut state);
        assert_eq!(state.books_list.display_count(), 68);

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('k')).unwrap();
        settle_all_timers(&mut state);

        assert_eq!(state.books_list.display_count(), 20);
    }

    #[test]
    fn cursor_near_slice_end_auto_loads_once() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books =
            Fetch::Ready((0..100).map(|i| book(i, &format!("Kniha {i}"), None)).collect());

        state.selected_index = 14;
        let (_, actions) = handle_event(&mut state, &Event::CursorDown).unwrap();
        assert!(matches!(actions.first(), Some(Action::StartTimer { .. })));
        assert!(state.books_list.is_loading_more());

        // While the load is in flight further movement does not start another.
        let (_, actions) = handle_event(&mut state, &Event::CursorDown).unwrap();
        assert!(actions.is_empty());

        settle_all_timers(&mut state);
        assert_eq!(state.books_list.display_count(), 68);
    }

    #[test]
    fn enter_on_author_row_opens_detail_and_fetches_books() {
        let mut state = state();
        state.page = Page::Authors;
        state.authors = Fetch::Ready(vec![author(5, "Karel Čapek"), author(6, "Jaroslav Hašek")]);

        let (_, actions) = handle_event(&mut state, &Event::SelectEntry).unwrap();

        assert_eq!(state.authors_view.kind(), ViewKind::AuthorDetail);
        assert!(actions.contains(&Action::Fetch(Query::AuthorBooks { author_id: 5 })));
    }

    #[test]
    fn series_from_author_detail_returns_to_author_detail() {
        let mut state = state();
        state.page = Page::Authors;
        state.authors = Fetch::Ready(vec![author(5, "Karel Čapek")]);
        handle_event(&mut state, &Event::SelectEntry).unwrap();

        state.author_books = Fetch::Ready(vec![book(1, "Díl první", Some("Sága"))]);
        state.author_books_for = Some(5);

        handle_event(&mut state, &Event::OpenSeriesOfSelected).unwrap();
        assert_eq!(state.authors_view.kind(), ViewKind::SeriesDetail);

        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.authors_view.kind(), ViewKind::AuthorDetail);

        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.authors_view.kind(), ViewKind::List);
    }

    #[test]
    fn author_and_series_selection_are_mutually_exclusive_on_books_page() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books = Fetch::Ready(vec![book(1, "Díl první", Some("Sága"))]);

        handle_event(&mut state, &Event::OpenSeriesOfSelected).unwrap();
        assert_eq!(state.books_view.kind(), ViewKind::SeriesDetail);
        assert!(state.books_view.selected_author.is_none());

        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.books_view.kind(), ViewKind::List);
    }

    #[test]
    fn back_restores_saved_scroll_position_after_delay() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books =
            Fetch::Ready((0..30).map(|i| book(i, &format!("Kniha {i}"), None)).collect());

        state.selected_index = 12;
        handle_event(&mut state, &Event::OpenAuthorOfSelected).unwrap();
        assert_eq!(state.selected_index, 0);

        let (_, actions) = handle_event(&mut state, &Event::Back).unwrap();
        assert!(matches!(actions.first(), Some(Action::StartTimer { .. })));
        assert_eq!(state.selected_index, 0);

        settle_all_timers(&mut state);
        assert_eq!(state.selected_index, 12);
    }

    #[test]
    fn scroll_restore_is_skipped_inside_detail_views() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books =
            Fetch::Ready((0..30).map(|i| book(i, &format!("Kniha {i}"), None)).collect());

        state.selected_index = 12;
        handle_event(&mut state, &Event::OpenAuthorOfSelected).unwrap();
        handle_event(&mut state, &Event::Back).unwrap();

        // Re-entering a detail before the restore timer fires cancels it.
        state.selected_index = 3;
        handle_event(&mut state, &Event::OpenAuthorOfSelected).unwrap();
        settle_all_timers(&mut state);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn page_switch_requests_page_data() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ShowAuthors).unwrap();
        assert!(actions.contains(&Action::Fetch(Query::AllAuthors)));
        assert!(actions.contains(&Action::Fetch(Query::AllBooks)));

        // Switching again to the same page is a no-op.
        let (render, actions) = handle_event(&mut state, &Event::ShowAuthors).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn theme_toggle_flips_palette() {
        let mut state = state();
        assert_eq!(state.theme().name, "light");
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme().name, "dark");
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme().name, "light");
    }

    #[test]
    fn enter_toggles_description_expansion_on_book_rows() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books = Fetch::Ready(vec![book(1, "Krakatit", None)]);

        handle_event(&mut state, &Event::SelectEntry).unwrap();
        assert!(state.expanded_descriptions.contains(&1));
        handle_event(&mut state, &Event::SelectEntry).unwrap();
        assert!(!state.expanded_descriptions.contains(&1));
    }

    #[test]
    fn download_uses_first_format() {
        let mut state = state();
        state.page = Page::Books;
        let mut b = book(1, "Krakatit", None);
        b.formats = vec![crate::domain::Format {
            id: 9,
            format_type: "EPUB".to_string(),
            file_name: "krakatit.epub".to_string(),
        }];
        state.all_books = Fetch::Ready(vec![b]);

        let (_, actions) = handle_event(&mut state, &Event::DownloadSelected).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenDownload {
                url: "http://localhost:8083/api/book/download/1/9".to_string()
            }]
        );
    }
}
