//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! system events. Actions bridge pure state transformations and effectful
//! host operations: dispatching HTTP fetches, arming timers, opening
//! downloads, hiding the pane.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically; the plugin shim
//! executes them in sequence.

use crate::api::Query;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Dispatches a catalog API fetch via the host's `web_request`.
    ///
    /// The query has already passed the cache's in-flight deduplication; the
    /// shim only builds the URL and context map and fires the request.
    Fetch(Query),

    /// Arms a host timeout.
    ///
    /// The timer's identity lives in the app-side
    /// [`TimerQueue`](crate::app::timers::TimerQueue); the host only needs
    /// the duration.
    StartTimer {
        /// Delay until expiry, in milliseconds.
        delay_ms: i64,
    },

    /// Opens a book download URL with the host system's opener.
    OpenDownload {
        /// Full download URL for one format of one book.
        url: String,
    },

    /// Closes the floating pane, hiding the plugin UI.
    CloseFocus,
}
