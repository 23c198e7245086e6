//! Shared rendering utilities and helpers.
//!
//! Low-level utilities used across UI components: cursor positioning,
//! substring match-range computation for search highlighting, highlighted
//! text rendering with ANSI escape management, and width-safe truncation.
//! Everything here operates on character indices, not bytes, so accented
//! Czech text never splits mid-codepoint.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses the ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are
/// 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Computes the character ranges of `text` matching a search term.
///
/// Case-insensitive, non-overlapping, left to right. `term` must already be
/// lower-cased (the list engine lower-cases once per pass). Returns
/// `(start, end)` character-index ranges with exclusive end, the shape the
/// highlight renderer consumes.
///
/// # Examples
///
/// ```
/// use knihovka::ui::helpers::substring_ranges;
///
/// assert_eq!(substring_ranges("Válka s mloky", "mlok"), vec![(8, 12)]);
/// assert_eq!(substring_ranges("aaa", "aa"), vec![(0, 2)]);
/// assert!(substring_ranges("kniha", "xyz").is_empty());
/// ```
#[must_use]
pub fn substring_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = term.chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    let mut ranges = Vec::new();
    let mut position = 0;

    while position + needle.len() <= haystack.len() {
        if haystack[position..position + needle.len()] == needle[..] {
            ranges.push((position, position + needle.len()));
            position += needle.len();
        } else {
            position += 1;
        }
    }

    ranges
}

/// Renders text with highlighted character ranges for search matches.
///
/// Splits the text into highlighted and normal sections based on the ranges.
/// Highlighting is suppressed on selected rows, where the selection colors
/// take precedence.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        // Ranges may have been computed on untruncated text.
        let start = start.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end.min(chars.len())].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Truncates text to a column budget, appending an ellipsis when shortened.
///
/// Character-based, so the visual width of the result never exceeds
/// `max_width` for single-width scripts.
#[must_use]
pub fn fit_to_width(text: &str, max_width: usize) -> String {
    let count = text.chars().count();
    if count <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(1);
    let prefix: String = text.chars().take(keep).collect();
    format!("{prefix}…")
}

/// Character count of a string (display width for single-width scripts).
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_case_insensitive_matches_by_char_index() {
        assert_eq!(substring_ranges("Krakatit", "kra"), vec![(0, 3)]);
        // Char indices, not byte indices: "Válka" has a two-byte 'á'.
        assert_eq!(substring_ranges("Válka s mloky", "s"), vec![(6, 7)]);
    }

    #[test]
    fn matches_do_not_overlap() {
        assert_eq!(substring_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn empty_term_has_no_ranges() {
        assert!(substring_ranges("kniha", "").is_empty());
    }

    #[test]
    fn fit_to_width_preserves_short_text() {
        assert_eq!(fit_to_width("kniha", 10), "kniha");
        assert_eq!(fit_to_width("příliš dlouhý název", 7), "příliš…");
    }
}
