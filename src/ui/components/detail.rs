//! Detail pane renderer for the selected book.
//!
//! The pane sits above the footer and shows the selected book's title,
//! publication date, formats, tags and its (markup-stripped) description,
//! truncated to a character budget. An expand toggle grows the pane.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BookDetailInfo;

/// Renders the detail pane starting at the given row.
///
/// Layout (collapsed): border, title, meta line (date · formats), tags,
/// two description lines, expand hint. Expanded panes show six description
/// lines instead of two.
pub fn render_detail(row: usize, detail: &BookDetailInfo, theme: &Theme, cols: usize) {
    let mut current = row;

    position_cursor(current, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    current += 1;

    position_cursor(current, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print!("  {}", clipped(&detail.title, cols));
    print!("{}", Theme::reset());
    current += 1;

    let mut meta = Vec::new();
    if let Some(published) = &detail.published {
        meta.push(format!("vydáno {published}"));
    }
    if !detail.formats.is_empty() {
        meta.push(detail.formats.join(", "));
    }
    if let Some(cover) = &detail.cover_url {
        meta.push(format!("obálka: {cover}"));
    }
    position_cursor(current, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  {}", clipped(&meta.join(" · "), cols));
    print!("{}", Theme::reset());
    current += 1;

    position_cursor(current, 1);
    print!("{}", Theme::fg(&theme.colors.series_fg));
    print!("  {}", clipped(&detail.tags.join(", "), cols));
    print!("{}", Theme::reset());
    current += 1;

    let description_rows = if detail.expanded { 6 } else { 2 };
    let width = cols.saturating_sub(4).max(10);
    let lines = wrap_text(&detail.description, width);
    for line_index in 0..description_rows {
        position_cursor(current, 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  {}", lines.get(line_index).map_or("", String::as_str));
        print!("{}", Theme::reset());
        current += 1;
    }

    position_cursor(current, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    if detail.expanded {
        print!("  (Enter: sbalit popis)");
    } else if detail.expandable {
        print!("  (Enter: celý popis)");
    }
    print!("{}", Theme::reset());
}

/// Clips a line to the pane width.
fn clipped(text: &str, cols: usize) -> String {
    let budget = cols.saturating_sub(4);
    if display_width(text) <= budget {
        text.to_string()
    } else {
        let kept: String = text.chars().take(budget.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Greedy word wrap to a character width.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word_len = display_width(word);
        let line_len = display_width(&line);

        if line.is_empty() {
            line = word.to_string();
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_words_within_width() {
        let lines = wrap_text("jedna dvě tři čtyři pět", 9);
        assert_eq!(lines, vec!["jedna dvě", "tři čtyři", "pět"]);
    }

    #[test]
    fn single_overlong_word_gets_its_own_line() {
        let lines = wrap_text("krátké slovodlouhéjakvelryba konec", 10);
        assert_eq!(lines[0], "krátké");
        assert_eq!(lines[1], "slovodlouhéjakvelryba");
    }
}
