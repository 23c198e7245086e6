//! Query-result cache with time-based staleness and in-flight deduplication.
//!
//! Fetched payloads are cached keyed by [`Query`] (endpoint + parameters).
//! An entry is *fresh* for 30 minutes; lookups within that window are served
//! without touching the network. After that it stays *retained* for another
//! 30 minutes: a retained entry is still served, but the caller is told to
//! issue a background refetch (stale-while-revalidate). Entries past the
//! retention window are evicted on the next lookup sweep.
//!
//! Concurrent requests for the same key are deduplicated by an in-flight set:
//! [`QueryCache::begin`] returns `false` when a fetch for the key is already
//! underway, and the caller skips dispatching a duplicate.
//!
//! There is no persistence; the cache lives and dies with the plugin
//! instance.

use std::collections::{HashMap, HashSet};

use crate::api::query::Query;
use crate::api::response::Payload;

/// How long a cached payload is served without revalidation (30 minutes).
pub const FRESH_FOR_MS: i64 = 30 * 60 * 1000;

/// How long a cached payload is kept at all (60 minutes).
pub const RETAIN_FOR_MS: i64 = 60 * 60 * 1000;

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A fresh payload; no fetch needed.
    Fresh(Payload),

    /// A retained-but-stale payload; serve it and refetch in the background.
    Stale(Payload),

    /// Nothing usable cached; a fetch is required.
    Miss,
}

/// A cached payload with its fetch timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Payload,
    fetched_at: i64,
}

/// In-memory query-result cache.
///
/// All timestamps are Unix milliseconds supplied by the caller, which keeps
/// the cache a pure data structure and makes the staleness windows testable
/// without a clock.
#[derive(Debug, Default)]
pub struct QueryCache {
    /// Cached payloads keyed by query.
    entries: HashMap<Query, CacheEntry>,

    /// Queries with a fetch currently underway.
    in_flight: HashSet<Query>,
}

impl QueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a query, evicting entries past their retention window first.
    pub fn lookup(&mut self, query: &Query, now: i64) -> Lookup {
        self.evict_expired(now);

        match self.entries.get(query) {
            Some(entry) if now - entry.fetched_at < FRESH_FOR_MS => {
                Lookup::Fresh(entry.payload.clone())
            }
            Some(entry) => Lookup::Stale(entry.payload.clone()),
            None => Lookup::Miss,
        }
    }

    /// Marks a fetch as started.
    ///
    /// Returns `false` if a fetch for the same key is already in flight, in
    /// which case the caller must not dispatch another request.
    pub fn begin(&mut self, query: Query) -> bool {
        self.in_flight.insert(query)
    }

    /// Whether a fetch for the query is currently underway.
    #[must_use]
    pub fn is_in_flight(&self, query: &Query) -> bool {
        self.in_flight.contains(query)
    }

    /// Stores a successfully decoded payload and clears the in-flight mark.
    pub fn complete(&mut self, query: Query, payload: Payload, now: i64) {
        self.in_flight.remove(&query);
        self.entries.insert(
            query,
            CacheEntry {
                payload,
                fetched_at: now,
            },
        );
    }

    /// Clears the in-flight mark after a failed fetch.
    ///
    /// The previous payload (if any) stays retained; a failure does not wipe
    /// data the user is already looking at.
    pub fn fail(&mut self, query: &Query) {
        self.in_flight.remove(query);
    }

    /// Removes entries older than the retention window.
    pub fn evict_expired(&mut self, now: i64) {
        self.entries
            .retain(|_, entry| now - entry.fetched_at < RETAIN_FOR_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(n: u64) -> Payload {
        Payload::Count(n)
    }

    #[test]
    fn miss_then_fresh_after_complete() {
        let mut cache = QueryCache::new();
        let query = Query::BooksCount;

        assert_eq!(cache.lookup(&query, 0), Lookup::Miss);

        assert!(cache.begin(query.clone()));
        cache.complete(query.clone(), payload(250), 1_000);

        assert_eq!(cache.lookup(&query, 2_000), Lookup::Fresh(payload(250)));
    }

    #[test]
    fn entry_goes_stale_after_fresh_window() {
        let mut cache = QueryCache::new();
        let query = Query::AuthorsCount;
        cache.complete(query.clone(), payload(40), 0);

        assert_eq!(
            cache.lookup(&query, FRESH_FOR_MS - 1),
            Lookup::Fresh(payload(40))
        );
        assert_eq!(
            cache.lookup(&query, FRESH_FOR_MS),
            Lookup::Stale(payload(40))
        );
    }

    #[test]
    fn entry_is_evicted_after_retention_window() {
        let mut cache = QueryCache::new();
        let query = Query::AuthorsCount;
        cache.complete(query.clone(), payload(40), 0);

        assert_eq!(cache.lookup(&query, RETAIN_FOR_MS), Lookup::Miss);
    }

    #[test]
    fn concurrent_fetches_for_one_key_deduplicate() {
        let mut cache = QueryCache::new();
        let query = Query::AllBooks;

        assert!(cache.begin(query.clone()));
        assert!(!cache.begin(query.clone()));
        assert!(cache.is_in_flight(&query));

        cache.fail(&query);
        assert!(!cache.is_in_flight(&query));
        assert!(cache.begin(query));
    }

    #[test]
    fn distinct_parameters_are_distinct_keys() {
        let mut cache = QueryCache::new();
        cache.complete(Query::AuthorBooks { author_id: 1 }, payload(1), 0);

        assert_eq!(
            cache.lookup(&Query::AuthorBooks { author_id: 2 }, 0),
            Lookup::Miss
        );
    }

    #[test]
    fn failure_keeps_retained_payload() {
        let mut cache = QueryCache::new();
        let query = Query::BooksCount;
        cache.complete(query.clone(), payload(250), 0);

        cache.begin(query.clone());
        cache.fail(&query);

        assert_eq!(
            cache.lookup(&query, FRESH_FOR_MS),
            Lookup::Stale(payload(250))
        );
    }
}
