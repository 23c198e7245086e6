//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed from [`AppState`] and
//! consumed by the renderer: no business logic, only display-ready data.
//! Everything the components print (row text, count phrases, banner
//! messages, detail pane content) is assembled here in its final, localized
//! form, so rendering is pure layout.
//!
//! [`AppState`]: crate::app::AppState

/// Complete UI view model for one render pass.
#[derive(Debug, Clone)]
pub struct UiViewModel {
    /// Header information (page or detail title).
    pub header: HeaderInfo,

    /// Secondary status line under the header (counts, shown-of-total).
    pub status: Option<StatusInfo>,

    /// Search bar state (when in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// Loading or error banner; when set, `rows` are withheld or skeletal.
    pub banner: Option<BannerInfo>,

    /// The visible window of list rows.
    pub rows: Vec<ListRow>,

    /// Index of the selected row within `rows`.
    pub selected_index: usize,

    /// Detail pane for the selected book (book lists only).
    pub detail: Option<BookDetailInfo>,

    /// Load-more affordance (when more filtered items remain).
    pub load_more: Option<LoadMoreInfo>,

    /// Empty state message (when no rows and nothing is loading or failed).
    pub empty_state: Option<EmptyState>,

    /// Footer keybinding hints.
    pub footer: FooterInfo,
}

/// One row of the visible list window.
#[derive(Debug, Clone)]
pub enum ListRow {
    /// A book entry.
    Book(BookRow),

    /// An author table entry.
    Author(AuthorRow),

    /// A placeholder row shown while the list is loading.
    Skeleton,
}

/// Display information for a single book row.
#[derive(Debug, Clone)]
pub struct BookRow {
    /// Book title.
    pub title: String,

    /// Author names joined with ", ".
    pub authors: String,

    /// Series label ("Saga #2"), if the book belongs to a series.
    pub series: Option<String>,

    /// Publication year, if known.
    pub year: Option<String>,

    /// Language code.
    pub language: String,

    /// Whether the server has a cover for this book.
    pub has_cover: bool,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the title matching the search term.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Display information for a single author row.
#[derive(Debug, Clone)]
pub struct AuthorRow {
    /// Sortable name (falls back to display name).
    pub name: String,

    /// Localized book count ("12 knih").
    pub books: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the name matching the search term.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text (page name or detail title).
    pub title: String,
}

/// Status line under the header.
#[derive(Debug, Clone)]
pub struct StatusInfo {
    /// Status text ("Zobrazeno 20 z 250 knih", "250 knih · 40 autorů").
    pub text: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current raw search query text.
    pub query: String,

    /// Placeholder shown while the query is empty.
    pub placeholder: String,
}

/// Kind of banner to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Data for the view is loading.
    Loading,

    /// A fetch failed; the message carries the error.
    Error,
}

/// Inline banner above the list area.
#[derive(Debug, Clone)]
pub struct BannerInfo {
    /// Loading or error.
    pub kind: BannerKind,

    /// Localized banner text.
    pub message: String,
}

/// Detail pane content for the selected book.
#[derive(Debug, Clone)]
pub struct BookDetailInfo {
    /// Book title (with series, when the server precomputed it).
    pub title: String,

    /// Markup-stripped description, truncated unless expanded.
    pub description: String,

    /// Whether the full description is being shown.
    pub expanded: bool,

    /// Whether the description was longer than the truncation budget (i.e.
    /// the expand toggle does something).
    pub expandable: bool,

    /// Free-text tags.
    pub tags: Vec<String>,

    /// Format labels ("EPUB (krakatit.epub)").
    pub formats: Vec<String>,

    /// Publication date in Czech long form, if known.
    pub published: Option<String>,

    /// Cover image URL, when the server has one.
    pub cover_url: Option<String>,
}

impl BookDetailInfo {
    /// Total pane height in rows, including the top border. Expanded panes
    /// get four extra description lines.
    #[must_use]
    pub fn pane_rows(&self) -> usize {
        if self.expanded {
            11
        } else {
            7
        }
    }
}

/// Load-more affordance state.
#[derive(Debug, Clone)]
pub struct LoadMoreInfo {
    /// Localized affordance text ("Načíst dalších 48 knih" or a loading
    /// message).
    pub text: String,

    /// Whether the simulated load delay is running.
    pub is_loading: bool,
}

/// Empty state message.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
