//! Remote data access layer for the catalog API.
//!
//! This module wraps the catalog server's read endpoints behind typed,
//! cache-aware queries. The plugin itself never opens a socket: requests go
//! out through the Zellij host's `web_request` shim and come back as
//! `WebRequestResult` events, with the originating [`Query`] riding the
//! request context map.
//!
//! # Modules
//!
//! - [`query`]: Query enum, URL building, context-map round-trip
//! - [`response`]: Status/body decoding into typed payloads
//! - [`cache`]: Time-based query cache with in-flight deduplication
//!
//! # Fetch lifecycle
//!
//! ```text
//! handler wants data → QueryCache::lookup
//!     Fresh   → use cached payload
//!     Stale   → use cached payload, dispatch background refetch
//!     Miss    → mark slot Loading, dispatch fetch
//! dispatch → begin() dedup check → Action::Fetch(query) → web_request
//! WebRequestResult → Query::from_context → response::decode
//!     Ok(payload)  → cache.complete → fill slot
//!     Err(error)   → cache.fail → slot shows error banner
//! ```

pub mod cache;
pub mod query;
pub mod response;

pub use cache::{Lookup, QueryCache};
pub use query::{cover_url, download_url, Query};
pub use response::{decode, Payload};
