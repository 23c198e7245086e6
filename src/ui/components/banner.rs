//! Inline banner and load-more affordance renderers.
//!
//! The banner replaces list content while a fetch is loading or after it
//! failed; the load-more line advertises the explicit load action when more
//! filtered items remain below the displayed slice.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BannerInfo, BannerKind, LoadMoreInfo};

/// Renders the loading/error banner at the specified row.
///
/// Error banners use the theme error color; loading banners are dimmed.
///
/// Returns the next available row position.
pub fn render_banner(row: usize, banner: &BannerInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    match banner.kind {
        BannerKind::Error => {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.error_fg));
        }
        BannerKind::Loading => {
            print!("{}", Theme::fg(&theme.colors.loading_fg));
        }
    }

    let shown: String = banner.message.chars().take(cols.saturating_sub(4)).collect();
    print!("  {shown}");
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(display_width(&shown) + 2))
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the load-more affordance line, centered and accented.
///
/// Returns the next available row position.
pub fn render_load_more(row: usize, load_more: &LoadMoreInfo, theme: &Theme, cols: usize) -> usize {
    let text_len = display_width(&load_more.text).min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    if load_more.is_loading {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.loading_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", load_more.text);
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
