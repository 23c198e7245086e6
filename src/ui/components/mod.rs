//! Composable UI component renderers.
//!
//! Each component renders one part of the interface with cursor-positioned
//! ANSI output and returns the next free row, so layouts compose by
//! threading the row position through.
//!
//! # Components
//!
//! - [`header`]: Title bar and the status/count line
//! - [`search`]: Search input box (border, query or placeholder)
//! - [`table`]: Book and author list rows with column headers
//! - [`banner`]: Loading/error banner and the load-more affordance
//! - [`detail`]: Detail pane for the selected book
//! - [`empty`]: Empty state message
//! - [`footer`]: Keybinding hints

pub mod banner;
pub mod detail;
pub mod empty;
pub mod footer;
pub mod header;
pub mod search;
pub mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UiViewModel;

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a complete view model.
///
/// Top-down: header, status, border, optional search box, optional banner,
/// column headers and rows (or the empty state). Bottom-up, anchored to the
/// terminal height: footer, border, optional detail pane, optional load-more
/// line.
pub fn render_view(vm: &UiViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current = 2;

    current = header::render_header(current, &vm.header, theme, cols);
    if let Some(status) = &vm.status {
        current = header::render_status(current, status, theme, cols);
    }
    current = render_border(current, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current = search::render_search_bar(current, search, theme, cols);
    }

    if let Some(banner) = &vm.banner {
        current = banner::render_banner(current, banner, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(current, empty, theme, cols);
    } else if !vm.rows.is_empty() {
        current = table::render_table_headers(current, &vm.rows, theme);
        table::render_table_rows(current, &vm.rows, theme, cols);
    }

    // Bottom chrome, anchored to the terminal height.
    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let mut anchor = border_row;

    if let Some(detail_info) = &vm.detail {
        let pane_start = anchor.saturating_sub(detail_info.pane_rows());
        detail::render_detail(pane_start, detail_info, theme, cols);
        anchor = pane_start;
    }

    if let Some(load_more) = &vm.load_more {
        let row = anchor.saturating_sub(1);
        banner::render_load_more(row, load_more, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);
}
