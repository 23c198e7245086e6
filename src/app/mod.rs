//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/api layers. It implements the
//! event-driven architecture that powers the interactive catalog UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Timer / WebRequest events ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Page, input mode and master/detail navigation types
//! - [`state`]: Central application state container and view model computation
//! - [`list`]: Debounced search + progressive loading engine
//! - [`scroll`]: Scroll position memory across master/detail navigation
//! - [`timers`]: Single-shot timer bookkeeping over anonymous host timeouts

pub mod actions;
pub mod handler;
pub mod list;
pub mod modes;
pub mod scroll;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use list::ListSearch;
pub use modes::{InputMode, Page, PageView, SearchFocus, ViewKind};
pub use state::{AppState, Fetch};
