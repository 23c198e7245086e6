//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin, along with fetch-slot bookkeeping, selection management and UI
//! view model generation. It is the single source of truth for all transient
//! UI state.
//!
//! # State components
//!
//! - **Fetch slots**: one per catalog query the UI consumes (recent books,
//!   all books, authors, the two counts, one author's books). A slot is
//!   `Idle`, `Loading`, `Ready` or `Failed`; loading, error and populated
//!   states are mutually exclusive by construction.
//! - **List engines**: per-page [`ListSearch`] instances holding search terms
//!   and progressive-loading counts. Terms persist across navigation for the
//!   lifetime of the plugin instance.
//! - **Navigation**: per-page [`PageView`] master/detail state, plus scroll
//!   memories for returning to a list.
//! - **Presentation state**: selection cursor, expanded description toggles,
//!   authors table sort, light/dark flag.
//!
//! # View model computation
//!
//! [`AppState::compute_viewmodel`] transforms a state snapshot into a
//! renderable representation: it resolves which collection the current view
//! shows, applies search/sort/pagination, windows the rows around the
//! selection for the terminal height, and assembles localized header, status,
//! banner, detail-pane and footer content.

use std::collections::HashSet;

use crate::api::{cover_url, Lookup, Payload, Query, QueryCache};
use crate::app::actions::Action;
use crate::app::list::{ListSearch, PAGE_SIZE};
use crate::app::modes::{InputMode, Page, PageView, SearchFocus, ViewKind};
use crate::app::scroll::ScrollMemory;
use crate::app::timers::TimerQueue;
use crate::domain::locale;
use crate::domain::{
    compare_authors, series_books, sort_author_books, Author, AuthorSortKey, Book, SortOrder,
};
use crate::ui::helpers::substring_ranges;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AuthorRow, BannerInfo, BannerKind, BookDetailInfo, BookRow, EmptyState, FooterInfo, HeaderInfo,
    ListRow, LoadMoreInfo, SearchBarInfo, StatusInfo, UiViewModel,
};

/// Character budget for the truncated description in the detail pane.
const DESCRIPTION_BUDGET: usize = 200;

/// Skeleton rows rendered while a list is loading.
const SKELETON_ROWS: usize = 5;

/// State of one remote data slot.
///
/// Mirrors the fetch lifecycle: nothing requested yet, request underway,
/// payload available, or request failed with a displayable message. A slot
/// never holds data and an error at the same time.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is underway.
    Loading,
    /// The payload arrived.
    Ready(T),
    /// The request failed; the message is ready for the error banner.
    Failed(String),
}

impl<T> Fetch<T> {
    /// The payload, if the slot is `Ready`.
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the slot is `Failed`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a request is underway.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// What the current view resolves to, after search/sort/pagination.
///
/// Shared between selection bookkeeping and view model computation so both
/// always agree on what is visible.
enum ResolvedList<'a> {
    /// Book rows (possibly a truncated slice of a larger filtered total).
    Books {
        books: Vec<&'a Book>,
        total: usize,
        progressive: bool,
    },
    /// Author rows.
    Authors { authors: Vec<&'a Author>, total: usize },
    /// Data still loading.
    Loading,
    /// Fetch failed; message for the banner.
    Failed(String),
}

/// Central application state container.
///
/// Mutated only by the event handler in response to user input and host
/// events; view models are computed on demand from snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Active catalog page.
    pub page: Page,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Whether the dark theme is active.
    pub dark_mode: bool,

    /// Light theme palette.
    pub light_theme: Theme,

    /// Dark theme palette.
    pub dark_theme: Theme,

    /// Recent books for the landing page.
    pub recent_books: Fetch<Vec<Book>>,

    /// The whole catalog, backing the Books page and series views.
    pub all_books: Fetch<Vec<Book>>,

    /// All authors, backing the Authors page.
    pub authors: Fetch<Vec<Author>>,

    /// Total book count for the landing header.
    pub books_count: Fetch<u64>,

    /// Total author count for the landing header.
    pub authors_count: Fetch<u64>,

    /// Books of the author whose detail is (or was last) open.
    pub author_books: Fetch<Vec<Book>>,

    /// Which author the `author_books` slot belongs to.
    pub author_books_for: Option<i64>,

    /// Search and paging engine of the Books page.
    pub books_list: ListSearch,

    /// Search and paging engine of the Authors page.
    pub authors_list: ListSearch,

    /// Scroll memory of the Books page.
    pub books_scroll: ScrollMemory,

    /// Scroll memory of the Authors page.
    pub authors_scroll: ScrollMemory,

    /// Master/detail navigation state per page.
    pub home_view: PageView,
    pub books_view: PageView,
    pub authors_view: PageView,

    /// Selection cursor within the currently visible list.
    pub selected_index: usize,

    /// Book ids whose description is expanded in the detail pane.
    pub expanded_descriptions: HashSet<i64>,

    /// Authors table sort column.
    pub authors_sort_key: AuthorSortKey,

    /// Authors table sort direction.
    pub authors_sort_order: SortOrder,

    /// Query-result cache with staleness and in-flight dedup.
    pub cache: QueryCache,

    /// Pending single-shot timers.
    pub timers: TimerQueue,

    /// Base URL of the catalog API.
    pub api_base: String,

    /// Recent-books limit for the landing page.
    pub recent_limit: u32,
}

impl AppState {
    /// Creates the initial application state.
    #[must_use]
    pub fn new(
        api_base: String,
        recent_limit: u32,
        light_theme: Theme,
        dark_theme: Theme,
        dark_mode: bool,
    ) -> Self {
        Self {
            page: Page::Home,
            input_mode: InputMode::Normal,
            dark_mode,
            light_theme,
            dark_theme,
            recent_books: Fetch::Idle,
            all_books: Fetch::Idle,
            authors: Fetch::Idle,
            books_count: Fetch::Idle,
            authors_count: Fetch::Idle,
            author_books: Fetch::Idle,
            author_books_for: None,
            books_list: ListSearch::default(),
            authors_list: ListSearch::default(),
            books_scroll: ScrollMemory::default(),
            authors_scroll: ScrollMemory::default(),
            home_view: PageView::default(),
            books_view: PageView::default(),
            authors_view: PageView::default(),
            selected_index: 0,
            expanded_descriptions: HashSet::new(),
            authors_sort_key: AuthorSortKey::Name,
            authors_sort_order: SortOrder::Ascending,
            cache: QueryCache::new(),
            timers: TimerQueue::new(),
            api_base,
            recent_limit,
        }
    }

    /// The active theme according to the light/dark flag.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        if self.dark_mode {
            &self.dark_theme
        } else {
            &self.light_theme
        }
    }

    /// Navigation state of the active page.
    #[must_use]
    pub fn view(&self) -> &PageView {
        match self.page {
            Page::Home => &self.home_view,
            Page::Books => &self.books_view,
            Page::Authors => &self.authors_view,
        }
    }

    /// Mutable navigation state of the active page.
    pub fn view_mut(&mut self) -> &mut PageView {
        match self.page {
            Page::Home => &mut self.home_view,
            Page::Books => &mut self.books_view,
            Page::Authors => &mut self.authors_view,
        }
    }

    /// The list engine of a page, if the page has one (Home does not).
    #[must_use]
    pub fn list_for(&self, page: Page) -> Option<&ListSearch> {
        match page {
            Page::Home => None,
            Page::Books => Some(&self.books_list),
            Page::Authors => Some(&self.authors_list),
        }
    }

    /// Mutable access to a page's list engine.
    pub fn list_for_mut(&mut self, page: Page) -> Option<&mut ListSearch> {
        match page {
            Page::Home => None,
            Page::Books => Some(&mut self.books_list),
            Page::Authors => Some(&mut self.authors_list),
        }
    }

    /// Mutable access to a page's scroll memory (Home keeps none).
    pub fn scroll_for_mut(&mut self, page: Page) -> Option<&mut ScrollMemory> {
        match page {
            Page::Home => None,
            Page::Books => Some(&mut self.books_scroll),
            Page::Authors => Some(&mut self.authors_scroll),
        }
    }

    /// Whether the active view is a searchable master list.
    #[must_use]
    pub fn in_searchable_list(&self) -> bool {
        self.page != Page::Home && self.view().is_list()
    }

    /// Whether a page's saved scroll position should be restored when its
    /// list becomes visible again.
    #[must_use]
    pub fn scroll_restorable(&self, page: Page) -> bool {
        let (memory, view) = match page {
            Page::Home => return false,
            Page::Books => (&self.books_scroll, &self.books_view),
            Page::Authors => (&self.authors_scroll, &self.authors_view),
        };
        memory.should_restore(view.is_list())
    }

    // ------------------------------------------------------------------
    // Fetch slot management
    // ------------------------------------------------------------------

    /// Requests the data a query names, going to the cache first.
    ///
    /// Fresh cache hits fill the slot synchronously. Stale hits fill the slot
    /// and dispatch a background refetch. Misses mark the slot loading and
    /// dispatch a fetch, unless one is already in flight for the same key,
    /// in which case nothing is dispatched (deduplication).
    pub fn ensure(&mut self, query: Query, actions: &mut Vec<Action>) {
        let now = now_ms();

        match self.cache.lookup(&query, now) {
            Lookup::Fresh(payload) => {
                self.apply_payload(&query, payload);
            }
            Lookup::Stale(payload) => {
                self.apply_payload(&query, payload);
                if self.cache.begin(query.clone()) {
                    tracing::debug!(query = query.label(), "stale cache hit, revalidating");
                    actions.push(Action::Fetch(query));
                }
            }
            Lookup::Miss => {
                if self.cache.begin(query.clone()) {
                    tracing::debug!(query = query.label(), "cache miss, fetching");
                    self.mark_loading(&query);
                    actions.push(Action::Fetch(query));
                } else if !self.slot_has_data(&query) {
                    // A fetch for this key is already underway (dedup); just
                    // reflect the pending state in the slot.
                    self.mark_loading(&query);
                }
            }
        }
    }

    /// Whether the slot a query feeds currently holds data.
    fn slot_has_data(&self, query: &Query) -> bool {
        match query {
            Query::RecentBooks { .. } => self.recent_books.ready().is_some(),
            Query::AllBooks => self.all_books.ready().is_some(),
            Query::AllAuthors => self.authors.ready().is_some(),
            Query::BooksCount => self.books_count.ready().is_some(),
            Query::AuthorsCount => self.authors_count.ready().is_some(),
            Query::AuthorBooks { author_id } => {
                self.author_books_for == Some(*author_id) && self.author_books.ready().is_some()
            }
        }
    }

    /// Puts the slot a query feeds into the loading state.
    fn mark_loading(&mut self, query: &Query) {
        match query {
            Query::RecentBooks { .. } => self.recent_books = Fetch::Loading,
            Query::AllBooks => self.all_books = Fetch::Loading,
            Query::AllAuthors => self.authors = Fetch::Loading,
            Query::BooksCount => self.books_count = Fetch::Loading,
            Query::AuthorsCount => self.authors_count = Fetch::Loading,
            Query::AuthorBooks { author_id } => {
                self.author_books_for = Some(*author_id);
                self.author_books = Fetch::Loading;
            }
        }
    }

    /// Fills the slot a query feeds with a decoded payload.
    ///
    /// A late `AuthorBooks` payload for an author the user has since
    /// navigated away from updates only the cache, not the slot.
    pub fn apply_payload(&mut self, query: &Query, payload: Payload) {
        match (query, payload) {
            (Query::RecentBooks { .. }, Payload::Books(books)) => {
                self.recent_books = Fetch::Ready(books);
            }
            (Query::AllBooks, Payload::Books(books)) => {
                self.all_books = Fetch::Ready(books);
            }
            (Query::AllAuthors, Payload::Authors(authors)) => {
                self.authors = Fetch::Ready(authors);
            }
            (Query::BooksCount, Payload::Count(count)) => {
                self.books_count = Fetch::Ready(count);
            }
            (Query::AuthorsCount, Payload::Count(count)) => {
                self.authors_count = Fetch::Ready(count);
            }
            (Query::AuthorBooks { author_id }, Payload::Books(books)) => {
                if self.author_books_for == Some(*author_id) {
                    self.author_books = Fetch::Ready(books);
                }
            }
            (query, payload) => {
                tracing::debug!(
                    query = query.label(),
                    payload = ?payload,
                    "payload shape does not match query, ignoring"
                );
            }
        }
        self.clamp_selection();
    }

    /// Puts the slot a query feeds into the failed state.
    pub fn fail_query(&mut self, query: &Query, message: String) {
        match query {
            Query::RecentBooks { .. } => self.recent_books = Fetch::Failed(message),
            Query::AllBooks => self.all_books = Fetch::Failed(message),
            Query::AllAuthors => self.authors = Fetch::Failed(message),
            Query::BooksCount => self.books_count = Fetch::Failed(message),
            Query::AuthorsCount => self.authors_count = Fetch::Failed(message),
            Query::AuthorBooks { author_id } => {
                if self.author_books_for == Some(*author_id) {
                    self.author_books = Fetch::Failed(message);
                }
            }
        }
        self.clamp_selection();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Number of selectable rows in the current view.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self.resolve_list() {
            ResolvedList::Books { books, .. } => books.len(),
            ResolvedList::Authors { authors, .. } => authors.len(),
            ResolvedList::Loading | ResolvedList::Failed(_) => 0,
        }
    }

    /// Moves the selection cursor down, wrapping to the top at the end.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection cursor up, wrapping to the bottom at the start.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Clamps the selection cursor to the current row count.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// The book under the cursor, when the current view shows books.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        match self.resolve_list() {
            ResolvedList::Books { books, .. } => books.get(self.selected_index).copied(),
            _ => None,
        }
    }

    /// The author row under the cursor, when the current view is the
    /// authors table.
    #[must_use]
    pub fn selected_author_row(&self) -> Option<&Author> {
        match self.resolve_list() {
            ResolvedList::Authors { authors, .. } => authors.get(self.selected_index).copied(),
            _ => None,
        }
    }

    /// Total filtered item count of the active searchable list, for
    /// progressive-loading decisions.
    #[must_use]
    pub fn filtered_total(&self) -> usize {
        match self.resolve_list() {
            ResolvedList::Books {
                total, progressive, ..
            } if progressive => total,
            ResolvedList::Authors { total, .. } => total,
            _ => 0,
        }
    }

    // ------------------------------------------------------------------
    // List resolution
    // ------------------------------------------------------------------

    /// Resolves what the current page/view combination displays.
    fn resolve_list(&self) -> ResolvedList<'_> {
        match self.view().kind() {
            ViewKind::List => self.resolve_master_list(),
            ViewKind::AuthorDetail => Self::resolve_books_slot(&self.author_books, true),
            ViewKind::SeriesDetail => self.resolve_series(),
        }
    }

    fn resolve_master_list(&self) -> ResolvedList<'_> {
        match self.page {
            Page::Home => match &self.recent_books {
                Fetch::Ready(books) => ResolvedList::Books {
                    books: books.iter().collect(),
                    total: books.len(),
                    progressive: false,
                },
                Fetch::Failed(message) => ResolvedList::Failed(message.clone()),
                Fetch::Idle | Fetch::Loading => ResolvedList::Loading,
            },
            Page::Books => match &self.all_books {
                Fetch::Ready(books) => {
                    let applied = self
                        .books_list
                        .apply(books, |book, term| book.matches_search(term), None);
                    ResolvedList::Books {
                        books: applied.items,
                        total: applied.total,
                        progressive: true,
                    }
                }
                Fetch::Failed(message) => ResolvedList::Failed(message.clone()),
                Fetch::Idle | Fetch::Loading => ResolvedList::Loading,
            },
            Page::Authors => match &self.authors {
                Fetch::Ready(authors) => {
                    let key = self.authors_sort_key;
                    let order = self.authors_sort_order;
                    let comparator =
                        move |a: &Author, b: &Author| compare_authors(a, b, key, order);
                    let applied = self.authors_list.apply(
                        authors,
                        |author, term| author.matches_search(term),
                        Some(&comparator),
                    );
                    ResolvedList::Authors {
                        authors: applied.items,
                        total: applied.total,
                    }
                }
                Fetch::Failed(message) => ResolvedList::Failed(message.clone()),
                Fetch::Idle | Fetch::Loading => ResolvedList::Loading,
            },
        }
    }

    /// Resolves a book-list slot, optionally in author-shelf order.
    fn resolve_books_slot(slot: &Fetch<Vec<Book>>, shelf_order: bool) -> ResolvedList<'_> {
        match slot {
            Fetch::Ready(books) => {
                let books = if shelf_order {
                    sort_author_books(books)
                } else {
                    books.iter().collect()
                };
                let total = books.len();
                ResolvedList::Books {
                    books,
                    total,
                    progressive: false,
                }
            }
            Fetch::Failed(message) => ResolvedList::Failed(message.clone()),
            Fetch::Idle | Fetch::Loading => ResolvedList::Loading,
        }
    }

    /// Resolves the derived series view from the full catalog.
    fn resolve_series(&self) -> ResolvedList<'_> {
        let Some(selection) = &self.view().selected_series else {
            return ResolvedList::Loading;
        };

        match &self.all_books {
            Fetch::Ready(books) => {
                let members = series_books(books, selection.author_id, &selection.series_name);
                let total = members.len();
                ResolvedList::Books {
                    books: members,
                    total,
                    progressive: false,
                }
            }
            Fetch::Failed(message) => ResolvedList::Failed(message.clone()),
            Fetch::Idle | Fetch::Loading => ResolvedList::Loading,
        }
    }

    // ------------------------------------------------------------------
    // View model computation
    // ------------------------------------------------------------------

    /// Computes a renderable view model for the given terminal size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UiViewModel {
        let _ = cols;
        let resolved = self.resolve_list();

        let search_bar = self.compute_search_bar();
        let banner = Self::compute_banner(&resolved, self.page, self.view().kind());

        let detail = match (&banner, &resolved) {
            (None, ResolvedList::Books { .. }) => self.compute_detail(),
            _ => None,
        };

        let load_more = match (&banner, &resolved) {
            (None, _) => self.compute_load_more(&resolved),
            _ => None,
        };

        let detail_rows = detail.as_ref().map_or(0, BookDetailInfo::pane_rows);
        let available_rows = Self::calculate_available_rows(
            rows,
            search_bar.is_some(),
            detail_rows,
            load_more.is_some(),
        );

        let (list_rows, selected_display_index) =
            self.window_rows(&resolved, available_rows);

        let empty_state = if list_rows.is_empty() && banner.is_none() {
            Some(self.compute_empty_state())
        } else {
            None
        };

        UiViewModel {
            header: self.compute_header(),
            status: self.compute_status(&resolved),
            search_bar,
            banner,
            rows: list_rows,
            selected_index: selected_display_index,
            detail,
            load_more,
            empty_state,
            footer: self.compute_footer(),
        }
    }

    /// Windows the resolved rows around the selection.
    ///
    /// Centers the visible window on the cursor, shifting it at the start
    /// and end of the collection so the window stays full whenever enough
    /// rows exist.
    fn window_rows(
        &self,
        resolved: &ResolvedList<'_>,
        available_rows: usize,
    ) -> (Vec<ListRow>, usize) {
        let len = match resolved {
            ResolvedList::Books { books, .. } => books.len(),
            ResolvedList::Authors { authors, .. } => authors.len(),
            ResolvedList::Loading => {
                return (vec![ListRow::Skeleton; SKELETON_ROWS.min(available_rows.max(1))], 0);
            }
            ResolvedList::Failed(_) => return (vec![], 0),
        };

        if len == 0 || available_rows == 0 {
            return (vec![], 0);
        }

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(len);
        if visible_end - visible_start < available_rows && len >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let term = self.active_highlight_term();

        let rows: Vec<ListRow> = match resolved {
            ResolvedList::Books { books, .. } => books[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(relative, book)| {
                    let absolute = visible_start + relative;
                    ListRow::Book(self.compute_book_row(book, absolute, term.as_deref()))
                })
                .collect(),
            ResolvedList::Authors { authors, .. } => authors[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(relative, author)| {
                    let absolute = visible_start + relative;
                    ListRow::Author(Self::compute_author_row(
                        author,
                        absolute == self.selected_index,
                        term.as_deref(),
                    ))
                })
                .collect(),
            ResolvedList::Loading | ResolvedList::Failed(_) => vec![],
        };

        (rows, self.selected_index.saturating_sub(visible_start))
    }

    /// The lower-cased term used for match highlighting, when search is
    /// active on a searchable list.
    fn active_highlight_term(&self) -> Option<String> {
        if !self.in_searchable_list() {
            return None;
        }
        let list = self.list_for(self.page)?;
        let term = list.debounced_term().trim().to_lowercase();
        if term.is_empty() {
            None
        } else {
            Some(term)
        }
    }

    fn compute_book_row(&self, book: &Book, absolute: usize, term: Option<&str>) -> BookRow {
        let authors = book
            .authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let series = book.series_name.as_ref().map(|name| {
            if book.series_number > 0.0 {
                format!("{name} #{}", format_series_number(book.series_number))
            } else {
                name.clone()
            }
        });

        let year = book
            .publish_date
            .as_deref()
            .and_then(|date| date.get(0..4))
            .map(String::from);

        let highlight_ranges =
            term.map_or_else(Vec::new, |term| substring_ranges(&book.title, term));

        BookRow {
            title: book.title.clone(),
            authors,
            series,
            year,
            language: book.language.clone(),
            has_cover: book.has_cover,
            is_selected: absolute == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_author_row(author: &Author, is_selected: bool, term: Option<&str>) -> AuthorRow {
        let highlight_ranges =
            term.map_or_else(Vec::new, |term| substring_ranges(author.sort_label(), term));

        AuthorRow {
            name: author.sort_label().to_string(),
            books: locale::book_count_phrase(author.book_count.max(0) as u64),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view().kind() {
            ViewKind::AuthorDetail => self
                .view()
                .selected_author
                .as_ref()
                .map_or_else(String::new, |author| author.author_name.clone()),
            ViewKind::SeriesDetail => self
                .view()
                .selected_series
                .as_ref()
                .map_or_else(String::new, |series| series.series_name.clone()),
            ViewKind::List => match self.page {
                Page::Home => "Nejnovější knihy".to_string(),
                Page::Books => "Knihovna".to_string(),
                Page::Authors => "Autoři".to_string(),
            },
        };

        HeaderInfo {
            title: format!(" {title} "),
        }
    }

    fn compute_status(&self, resolved: &ResolvedList<'_>) -> Option<StatusInfo> {
        let text = match self.view().kind() {
            ViewKind::List => match self.page {
                Page::Home => {
                    let books = self
                        .books_count
                        .ready()
                        .map_or_else(|| "…".to_string(), |count| locale::book_count_phrase(*count));
                    let authors = self.authors_count.ready().map_or_else(
                        || "…".to_string(),
                        |count| locale::author_count_phrase(*count),
                    );
                    format!("{books} · {authors}")
                }
                Page::Books => match resolved {
                    ResolvedList::Books { books, total, .. } => {
                        format!("Zobrazeno {} z {} knih", books.len(), total)
                    }
                    _ => "Načítání…".to_string(),
                },
                Page::Authors => match resolved {
                    ResolvedList::Authors { authors, total } => {
                        format!("Zobrazeno {} z {} autorů", authors.len(), total)
                    }
                    _ => "Načítání…".to_string(),
                },
            },
            ViewKind::AuthorDetail => {
                let count = match resolved {
                    ResolvedList::Books { total, .. } => *total as u64,
                    _ => 0,
                };
                locale::detail_description("knihy od tohoto autora", count)
            }
            ViewKind::SeriesDetail => {
                let count = match resolved {
                    ResolvedList::Books { total, .. } => *total as u64,
                    _ => 0,
                };
                locale::detail_description("všechny knihy ze série", count)
            }
        };

        Some(StatusInfo { text })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if !matches!(self.input_mode, InputMode::Search(_)) || !self.in_searchable_list() {
            return None;
        }

        let list = self.list_for(self.page)?;
        let placeholder = match self.page {
            Page::Books => "Vyhledejte knihu podle názvu, autora, tagů nebo jazyka…",
            Page::Authors => "Vyhledejte autora podle jména…",
            Page::Home => "",
        };

        Some(SearchBarInfo {
            query: list.raw_term().to_string(),
            placeholder: placeholder.to_string(),
        })
    }

    fn compute_banner(
        resolved: &ResolvedList<'_>,
        page: Page,
        view: ViewKind,
    ) -> Option<BannerInfo> {
        match resolved {
            ResolvedList::Failed(message) => {
                let subject = match (page, view) {
                    (Page::Authors, ViewKind::List) => "autorů",
                    _ => "knih",
                };
                Some(BannerInfo {
                    kind: BannerKind::Error,
                    message: format!("Chyba při načítání {subject}: {message}"),
                })
            }
            ResolvedList::Loading => Some(BannerInfo {
                kind: BannerKind::Loading,
                message: "Načítání…".to_string(),
            }),
            _ => None,
        }
    }

    fn compute_detail(&self) -> Option<BookDetailInfo> {
        let book = self.selected_book()?;

        let plain = locale::strip_markup(&book.comments);
        let expanded = self.expanded_descriptions.contains(&book.id);
        let expandable = plain.chars().count() > DESCRIPTION_BUDGET;
        let description = if expanded {
            plain
        } else {
            locale::truncate_text(&plain, DESCRIPTION_BUDGET)
        };

        let formats = book
            .formats
            .iter()
            .map(|format| format!("{} ({})", format.format_type, format.file_name))
            .collect();

        let title = if book.title_and_series.is_empty() {
            book.title.clone()
        } else {
            book.title_and_series.clone()
        };

        Some(BookDetailInfo {
            title,
            description,
            expanded,
            expandable,
            tags: book.tags.clone(),
            formats,
            published: book.publish_date.as_deref().map(locale::format_date),
            cover_url: book
                .has_cover
                .then(|| cover_url(&self.api_base, book.id)),
        })
    }

    fn compute_load_more(&self, resolved: &ResolvedList<'_>) -> Option<LoadMoreInfo> {
        if !self.in_searchable_list() {
            return None;
        }
        let list = self.list_for(self.page)?;

        let (shown, total) = match resolved {
            ResolvedList::Books {
                books,
                total,
                progressive: true,
            } => (books.len(), *total),
            ResolvedList::Authors { authors, total } => (authors.len(), *total),
            _ => return None,
        };

        if !list.has_more(total) && !list.is_loading_more() {
            return None;
        }

        let noun_loading = match self.page {
            Page::Authors => "Načítání dalších autorů…",
            _ => "Načítání dalších knih…",
        };

        let text = if list.is_loading_more() {
            noun_loading.to_string()
        } else {
            let next = PAGE_SIZE.min(total - shown);
            let noun = match self.page {
                Page::Authors => locale::author_count_label(next as u64),
                _ => locale::book_count_label(next as u64),
            };
            format!("Načíst dalších {next} {noun} (m)")
        };

        Some(LoadMoreInfo {
            text,
            is_loading: list.is_loading_more(),
        })
    }

    fn compute_empty_state(&self) -> EmptyState {
        let searching = self
            .list_for(self.page)
            .is_some_and(|list| !list.debounced_term().trim().is_empty());

        let message = match (self.page, searching) {
            (Page::Authors, true) => {
                "Žádní autoři odpovídající vašemu vyhledávání nebyli nalezeni."
            }
            (Page::Authors, false) => "Žádní autoři nebyli nalezeni.",
            (_, true) => "Žádné knihy odpovídající vašemu vyhledávání nebyly nalezeny.",
            (_, false) => "Žádné knihy nebyly nalezeny.",
        };

        let subtitle = if searching {
            "Zkuste upravit hledaný výraz"
        } else {
            "Katalog je prázdný"
        };

        EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "Esc: konec hledání  Enter: výsledky  Ctrl+n/p: pohyb  pište pro filtrování"
                    .to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "Esc: konec hledání  /: upravit dotaz  j/k: pohyb  Enter: výběr".to_string()
            }
            InputMode::Normal => match (self.page, self.view().kind()) {
                (Page::Authors, ViewKind::List) => {
                    "j/k: pohyb  /: hledání  Enter: autor  o/r: řazení  m: další  1/2/3: stránky  t: téma  q: zavřít"
                        .to_string()
                }
                (_, ViewKind::List) if self.page == Page::Home => {
                    "j/k: pohyb  Enter: popis  a: autor  s: série  d: stažení  1/2/3: stránky  t: téma  q: zavřít"
                        .to_string()
                }
                (_, ViewKind::List) => {
                    "j/k: pohyb  /: hledání  Enter: popis  a: autor  s: série  m: další  d: stažení  t: téma  q: zavřít"
                        .to_string()
                }
                _ => {
                    "j/k: pohyb  Esc: zpět  Enter: popis  a: autor  s: série  d: stažení  t: téma  q: zavřít"
                        .to_string()
                }
            },
        };

        FooterInfo { keybindings }
    }

    /// Rows left for the list after subtracting UI chrome.
    ///
    /// Chrome: blank line, header, status line, border, column header,
    /// bottom border, footer, plus the search box (3 rows), the detail
    /// pane and the load-more hint (1 row) when visible.
    fn calculate_available_rows(
        total_rows: usize,
        search_visible: bool,
        detail_rows: usize,
        load_more_visible: bool,
    ) -> usize {
        let mut chrome = 7 + detail_rows;
        if search_visible {
            chrome += 3;
        }
        if load_more_visible {
            chrome += 1;
        }
        total_rows.saturating_sub(chrome)
    }
}

/// Formats a series position, dropping a trailing `.0`.
fn format_series_number(number: f64) -> String {
    if number.fract() == 0.0 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

/// Current wall clock in Unix milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::{AuthorSelection, SeriesSelection};
    use crate::ui::viewmodel::BannerKind;

    fn state() -> AppState {
        AppState::new(
            "http://localhost:8083/api".to_string(),
            9,
            Theme::from_name("light").unwrap(),
            Theme::from_name("dark").unwrap(),
            false,
        )
    }

    fn author(id: i64, name: &str, book_count: i64) -> Author {
        Author {
            id,
            name: name.to_string(),
            sort: None,
            book_count,
        }
    }

    fn book(id: i64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            comments: String::new(),
            language: "cs".to_string(),
            path: String::new(),
            has_cover: false,
            series_name: None,
            series_number: 0.0,
            publish_date: None,
            insert_date: String::new(),
            authors: vec![author(1, "Karel Čapek", 2)],
            formats: vec![],
            tags: vec![],
            title_and_series: String::new(),
        }
    }

    #[test]
    fn landing_status_interpolates_plural_counts() {
        let mut state = state();
        state.books_count = Fetch::Ready(250);
        state.authors_count = Fetch::Ready(40);
        state.recent_books = Fetch::Ready(vec![book(1, "Krakatit")]);

        let vm = state.compute_viewmodel(40, 100);
        let status = vm.status.unwrap().text;
        assert!(status.contains("250 knih"));
        assert!(status.contains("40 autorů"));
    }

    #[test]
    fn landing_status_shows_ellipsis_while_counts_load() {
        let mut state = state();
        state.books_count = Fetch::Loading;
        state.recent_books = Fetch::Ready(vec![]);

        let vm = state.compute_viewmodel(40, 100);
        assert!(vm.status.unwrap().text.contains('…'));
    }

    #[test]
    fn failed_authors_fetch_renders_banner_and_no_rows() {
        let mut state = state();
        state.page = Page::Authors;
        state.authors = Fetch::Failed("API request failed: 500 Internal Server Error".to_string());

        let vm = state.compute_viewmodel(40, 100);
        let banner = vm.banner.unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert!(banner.message.contains("autorů"));
        assert!(banner.message.contains("500"));
        assert!(banner.message.contains("Internal Server Error"));
        assert!(vm.rows.is_empty());
    }

    #[test]
    fn loading_view_renders_skeleton_rows() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books = Fetch::Loading;

        let vm = state.compute_viewmodel(40, 100);
        assert_eq!(vm.banner.unwrap().kind, BannerKind::Loading);
        assert!(vm.rows.iter().all(|row| matches!(row, ListRow::Skeleton)));
        assert!(!vm.rows.is_empty());
    }

    #[test]
    fn books_list_shows_truncated_slice_with_totals() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books = Fetch::Ready((0..100).map(|i| book(i, &format!("Kniha {i}"))).collect());

        assert_eq!(state.visible_len(), 20);
        let vm = state.compute_viewmodel(60, 100);
        assert!(vm.status.unwrap().text.contains("Zobrazeno 20 z 100 knih"));
        assert!(vm.load_more.is_some());
    }

    #[test]
    fn series_detail_resolves_members_in_order() {
        let mut state = state();
        state.page = Page::Books;

        let mut early = book(1, "Díl druhý");
        early.series_name = Some("Sága".to_string());
        early.series_number = 2.0;
        let mut first = book(2, "Díl první");
        first.series_name = Some("Sága".to_string());
        first.series_number = 1.0;
        let unrelated = book(3, "Jiná kniha");

        state.all_books = Fetch::Ready(vec![early, first, unrelated]);
        state.books_view.open_series(
            SeriesSelection {
                author_id: 1,
                series_name: "Sága".to_string(),
            },
            false,
        );

        assert_eq!(state.visible_len(), 2);
        let titles: Vec<String> = match state.compute_viewmodel(60, 100).rows.first() {
            Some(ListRow::Book(row)) => vec![row.title.clone()],
            _ => vec![],
        };
        assert_eq!(titles, vec!["Díl první".to_string()]);
    }

    #[test]
    fn late_author_books_payload_for_other_author_is_ignored() {
        let mut state = state();
        state.page = Page::Authors;
        state.authors_view.open_author(AuthorSelection {
            author_id: 7,
            author_name: "Someone".to_string(),
        });
        state.author_books_for = Some(7);
        state.author_books = Fetch::Loading;

        state.apply_payload(
            &Query::AuthorBooks { author_id: 5 },
            Payload::Books(vec![book(1, "Stale")]),
        );
        assert!(state.author_books.is_loading());

        state.apply_payload(
            &Query::AuthorBooks { author_id: 7 },
            Payload::Books(vec![book(2, "Fresh")]),
        );
        assert!(state.author_books.ready().is_some());
    }

    #[test]
    fn ensure_deduplicates_in_flight_queries() {
        let mut state = state();
        let mut actions = Vec::new();

        state.ensure(Query::AllBooks, &mut actions);
        state.ensure(Query::AllBooks, &mut actions);

        let fetches = actions
            .iter()
            .filter(|action| matches!(action, Action::Fetch(Query::AllBooks)))
            .count();
        assert_eq!(fetches, 1);
        assert!(state.all_books.is_loading());
    }

    #[test]
    fn detail_pane_truncates_and_expands_description() {
        let mut state = state();
        state.page = Page::Books;
        let mut long_book = book(1, "Dlouhá");
        long_book.comments = format!("<p>{}</p>", "x".repeat(500));
        state.all_books = Fetch::Ready(vec![long_book]);

        let vm = state.compute_viewmodel(60, 100);
        let detail = vm.detail.unwrap();
        assert!(detail.expandable);
        assert!(!detail.expanded);
        assert_eq!(detail.description.chars().count(), DESCRIPTION_BUDGET + 3);

        state.expanded_descriptions.insert(1);
        let vm = state.compute_viewmodel(60, 100);
        let detail = vm.detail.unwrap();
        assert!(detail.expanded);
        assert_eq!(detail.description.chars().count(), 500);
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = state();
        state.page = Page::Books;
        state.all_books = Fetch::Ready(vec![book(1, "A"), book(2, "B"), book(3, "C")]);

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 2;
        state.all_books = Fetch::Ready(vec![book(1, "A")]);
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn series_number_formatting_drops_integer_fraction() {
        assert_eq!(format_series_number(2.0), "2");
        assert_eq!(format_series_number(1.5), "1.5");
    }
}
