//! List table renderer for book and author rows.
//!
//! Renders the visible window of the current list. Book rows carry title,
//! authors, series label, year and language columns; author rows carry the
//! sortable name and a localized book count. Skeleton rows stand in while a
//! list is loading.

use crate::ui::helpers::{self, display_width, fit_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AuthorRow, BookRow, ListRow};

/// Width of the title column in book rows.
const TITLE_WIDTH: usize = 38;

/// Width of the authors column in book rows.
const AUTHORS_WIDTH: usize = 24;

/// Width of the series column in book rows.
const SERIES_WIDTH: usize = 22;

/// Width of the year column in book rows.
const YEAR_WIDTH: usize = 6;

/// Width of the name column in author rows.
const NAME_WIDTH: usize = 40;

/// Renders the column header line matching the row kind.
///
/// Returns the next available row position.
pub fn render_table_headers(row: usize, rows: &[ListRow], theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));

    if rows.iter().any(|r| matches!(r, ListRow::Author(_))) {
        print!("{:<NAME_WIDTH$} {:<}", "AUTOR", "POČET KNIH");
    } else {
        print!(
            "{:<TITLE_WIDTH$} {:<AUTHORS_WIDTH$} {:<SERIES_WIDTH$} {:<YEAR_WIDTH$} {:<}",
            "NÁZEV", "AUTOŘI", "SÉRIE", "ROK", "JAZYK"
        );
    }

    print!("{}", Theme::reset());
    row + 1
}

/// Renders all visible rows starting at the specified row.
///
/// Returns the next available row position.
pub fn render_table_rows(row: usize, rows: &[ListRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for list_row in rows {
        current_row = match list_row {
            ListRow::Book(book) => render_book_row(current_row, book, theme, cols),
            ListRow::Author(author) => render_author_row(current_row, author, theme, cols),
            ListRow::Skeleton => render_skeleton_row(current_row, theme, cols),
        };
    }
    current_row
}

/// Renders a single book row.
///
/// Layout: `NÁZEV  AUTOŘI  SÉRIE  ROK  JAZYK`, padded to the full width so
/// the selection background covers the whole line. Search matches in the
/// title are highlighted unless the row is selected.
fn render_book_row(row: usize, book: &BookRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if book.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let marked_title = if book.has_cover {
        format!("{} ⊙", book.title)
    } else {
        book.title.clone()
    };
    let title = fit_to_width(&marked_title, TITLE_WIDTH);
    if book.highlight_ranges.is_empty() || book.is_selected {
        print!("{title}");
    } else {
        helpers::render_highlighted_text(&title, &book.highlight_ranges, theme, book.is_selected);
    }
    print!(
        "{}",
        " ".repeat(TITLE_WIDTH.saturating_sub(display_width(&title)) + 1)
    );

    let authors = fit_to_width(&book.authors, AUTHORS_WIDTH);
    if !book.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{authors}");
    print!(
        "{}",
        " ".repeat(AUTHORS_WIDTH.saturating_sub(display_width(&authors)) + 1)
    );

    let series = book.series.as_deref().unwrap_or("");
    let series = fit_to_width(series, SERIES_WIDTH);
    if !book.is_selected {
        print!("{}", Theme::fg(&theme.colors.series_fg));
    }
    print!("{series}");
    print!(
        "{}",
        " ".repeat(SERIES_WIDTH.saturating_sub(display_width(&series)) + 1)
    );

    if !book.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    let year = book.year.as_deref().unwrap_or("");
    print!("{year:<YEAR_WIDTH$} {}", book.language);

    let used = TITLE_WIDTH
        + AUTHORS_WIDTH
        + SERIES_WIDTH
        + YEAR_WIDTH
        + 4
        + display_width(&book.language);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders a single author row (`AUTOR  POČET KNIH`).
fn render_author_row(row: usize, author: &AuthorRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if author.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let name = fit_to_width(&author.name, NAME_WIDTH);
    if author.highlight_ranges.is_empty() || author.is_selected {
        print!("{name}");
    } else {
        helpers::render_highlighted_text(&name, &author.highlight_ranges, theme, author.is_selected);
    }
    print!(
        "{}",
        " ".repeat(NAME_WIDTH.saturating_sub(display_width(&name)) + 1)
    );

    if !author.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    print!("{}", author.books);

    let used = NAME_WIDTH + 1 + display_width(&author.books);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders a dimmed placeholder row while the list loads.
fn render_skeleton_row(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.loading_fg));
    let bar = "░".repeat(cols.saturating_sub(4).min(60));
    print!("  {bar}");
    print!("{}", Theme::reset());
    row + 1
}
