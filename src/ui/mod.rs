//! User interface rendering layer with component-based architecture.
//!
//! This module orchestrates the terminal UI, transforming view models into
//! ANSI-styled output through composable rendering components. It provides
//! light/dark theme support, responsive windowed lists, and substring match
//! highlighting for active searches.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UiViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, widths)
//! - [`theme`]: Color scheme definitions and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    AuthorRow, BannerInfo, BannerKind, BookDetailInfo, BookRow, EmptyState, FooterInfo, HeaderInfo,
    ListRow, LoadMoreInfo, SearchBarInfo, StatusInfo, UiViewModel,
};
