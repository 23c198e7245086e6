//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process: transform [`AppState`] into a
//! [`UiViewModel`](crate::ui::viewmodel::UiViewModel), then delegate to the
//! component renderers for layout. It holds no state of its own.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// component layer. Prints ANSI-styled output with explicit cursor
/// positioning; does not clear the screen.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_view(&viewmodel, state.theme(), rows, cols);
}
