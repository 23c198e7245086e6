//! List search with debounced filtering and progressive loading.
//!
//! This is the engine behind both master lists (books, authors). Given an
//! in-memory collection, a filter predicate and an optional comparator, it
//! produces the subset matching the *debounced* search term, sorted, then
//! truncated to a growable display count:
//!
//! - **Debounce**: the raw term updates on every keystroke; the derived term
//!   the filter actually sees updates only after the raw term has been stable
//!   for [`DEBOUNCE_MS`](crate::app::timers::DEBOUNCE_MS). The handler arms
//!   the timer; [`ListSearch::settle_debounce`] runs when it fires.
//! - **Filtering**: the predicate receives each item and the lower-cased
//!   debounced term. An empty or whitespace-only term filters nothing.
//! - **Sorting**: optional comparator; absent preserves insertion order.
//! - **Progressive loading**: the display count starts at
//!   [`INITIAL_DISPLAY_COUNT`] and grows by [`PAGE_SIZE`] per load, either
//!   explicitly or automatically when the cursor comes within
//!   [`SCROLL_THRESHOLD_ROWS`] of the end of the displayed slice. A load
//!   completes after a simulated short delay and is gated by an in-flight
//!   flag so loads never overlap.
//! - **Reset**: the display count returns to its initial value whenever the
//!   debounced term changes (and on explicit collection switches).
//!
//! Invariants relied on by the UI: the displayed slice length is always
//! `min(display_count, total_filtered)`, and `display_count` is monotonically
//! non-decreasing between resets.

use std::cmp::Ordering;

/// Initial number of items shown before any load-more.
pub const INITIAL_DISPLAY_COUNT: usize = 20;

/// How many items each load-more adds.
pub const PAGE_SIZE: usize = 48;

/// How close (in rows) the cursor must come to the end of the displayed
/// slice before an automatic load-more triggers. The terminal analogue of a
/// near-bottom pixel threshold.
pub const SCROLL_THRESHOLD_ROWS: usize = 5;

/// Result of applying a list engine to a collection.
#[derive(Debug)]
pub struct Applied<'a, T> {
    /// The displayed slice: filtered, sorted, truncated to the display count.
    pub items: Vec<&'a T>,

    /// Total number of items matching the filter (before truncation).
    pub total: usize,
}

/// Search and progressive-loading state of one list.
#[derive(Debug, Clone)]
pub struct ListSearch {
    raw_term: String,
    debounced_term: String,
    initial_display_count: usize,
    page_size: usize,
    display_count: usize,
    is_loading_more: bool,
}

impl Default for ListSearch {
    fn default() -> Self {
        Self::new(INITIAL_DISPLAY_COUNT, PAGE_SIZE)
    }
}

impl ListSearch {
    /// Creates a list engine with the given paging parameters.
    #[must_use]
    pub fn new(initial_display_count: usize, page_size: usize) -> Self {
        Self {
            raw_term: String::new(),
            debounced_term: String::new(),
            initial_display_count,
            page_size,
            display_count: initial_display_count,
            is_loading_more: false,
        }
    }

    /// The raw (undebounced) search term, as typed.
    #[must_use]
    pub fn raw_term(&self) -> &str {
        &self.raw_term
    }

    /// The debounced term the filter currently sees.
    #[must_use]
    pub fn debounced_term(&self) -> &str {
        &self.debounced_term
    }

    /// Appends a character to the raw term. The caller restarts the debounce
    /// timer.
    pub fn push_char(&mut self, c: char) {
        self.raw_term.push(c);
    }

    /// Removes the last character of the raw term.
    ///
    /// Returns `false` when there was nothing to remove (no timer restart
    /// needed).
    pub fn pop_char(&mut self) -> bool {
        self.raw_term.pop().is_some()
    }

    /// Propagates the raw term into the debounced term.
    ///
    /// Called when the debounce timer fires. A changed term resets the
    /// display count to its initial value, even if load-mores had grown it.
    ///
    /// Returns `true` if the debounced term actually changed.
    pub fn settle_debounce(&mut self) -> bool {
        if self.debounced_term == self.raw_term {
            return false;
        }

        self.debounced_term = self.raw_term.clone();
        self.reset_display();
        true
    }

    /// Resets the display count to its initial value and clears any pending
    /// load. Used when the underlying collection is switched out.
    pub fn reset_display(&mut self) {
        self.display_count = self.initial_display_count;
        self.is_loading_more = false;
    }

    /// Current display count.
    #[must_use]
    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Whether a load-more is in flight (its delay timer running).
    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// Whether more filtered items exist than are displayed.
    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.display_count < total
    }

    /// Starts a load-more if one is possible.
    ///
    /// Returns `true` when a load was started; the caller then arms the
    /// load-more timer. Gated so that loads never overlap and nothing loads
    /// once everything is displayed.
    pub fn begin_load_more(&mut self, total: usize) -> bool {
        if self.is_loading_more || !self.has_more(total) {
            return false;
        }
        self.is_loading_more = true;
        true
    }

    /// Completes a pending load-more, growing the display count by one page.
    ///
    /// Returns `true` if a load was actually pending.
    pub fn finish_load_more(&mut self) -> bool {
        if !self.is_loading_more {
            return false;
        }
        self.is_loading_more = false;
        self.display_count += self.page_size;
        true
    }

    /// Whether cursor position `cursor` (an index into the displayed slice)
    /// is close enough to its end to trigger an automatic load.
    #[must_use]
    pub fn should_auto_load(&self, cursor: usize, total: usize) -> bool {
        if self.is_loading_more || !self.has_more(total) {
            return false;
        }

        let displayed = self.display_count.min(total);
        cursor + SCROLL_THRESHOLD_ROWS >= displayed
    }

    /// Applies filter, sort and truncation to a collection.
    ///
    /// The predicate receives each item and the lower-cased debounced term;
    /// it never runs when the term is empty or whitespace-only. The displayed
    /// slice length is `min(display_count, total)`.
    pub fn apply<'a, T>(
        &self,
        items: &'a [T],
        filter: impl Fn(&T, &str) -> bool,
        sort: Option<&dyn Fn(&T, &T) -> Ordering>,
    ) -> Applied<'a, T> {
        let term = self.debounced_term.trim().to_lowercase();

        let mut filtered: Vec<&T> = if term.is_empty() {
            items.iter().collect()
        } else {
            items.iter().filter(|item| filter(item, &term)).collect()
        };

        if let Some(comparator) = sort {
            filtered.sort_by(|a, b| comparator(a, b));
        }

        let total = filtered.len();
        filtered.truncate(self.display_count.min(total));

        Applied {
            items: filtered,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item-{i}")).collect()
    }

    fn contains(item: &String, term: &str) -> bool {
        item.to_lowercase().contains(term)
    }

    #[test]
    fn empty_term_is_identity() {
        let list = ListSearch::new(100, 48);
        let items = numbers(30);

        let applied = list.apply(&items, contains, None);
        assert_eq!(applied.total, 30);
        assert_eq!(applied.items.len(), 30);
        assert!(applied
            .items
            .iter()
            .zip(items.iter())
            .all(|(shown, original)| *shown == original));
    }

    #[test]
    fn whitespace_only_term_is_identity() {
        let mut list = ListSearch::new(100, 48);
        list.push_char(' ');
        list.push_char(' ');
        list.settle_debounce();

        let items = numbers(10);
        assert_eq!(list.apply(&items, contains, None).total, 10);
    }

    #[test]
    fn every_included_item_matches_and_every_excluded_does_not() {
        let mut list = ListSearch::new(100, 48);
        for c in "item-1".chars() {
            list.push_char(c);
        }
        list.settle_debounce();

        let items = numbers(25);
        let applied = list.apply(&items, contains, None);

        // item-1, item-1x
        assert!(applied.items.iter().all(|item| contains(item, "item-1")));
        let shown: Vec<&String> = applied.items;
        for item in &items {
            let included = shown.iter().any(|s| *s == item);
            assert_eq!(included, contains(item, "item-1"));
        }
    }

    #[test]
    fn term_is_lowercased_before_filtering() {
        let mut list = ListSearch::new(100, 48);
        for c in "ITEM-2".chars() {
            list.push_char(c);
        }
        list.settle_debounce();

        let items = numbers(25);
        let applied = list.apply(&items, contains, None);
        assert!(applied.total > 0);
    }

    #[test]
    fn displayed_slice_is_min_of_display_count_and_total() {
        let list = ListSearch::new(20, 48);
        let items = numbers(100);
        let applied = list.apply(&items, contains, None);
        assert_eq!(applied.items.len(), 20);
        assert_eq!(applied.total, 100);

        let few = numbers(7);
        let applied = list.apply(&few, contains, None);
        assert_eq!(applied.items.len(), 7);
    }

    #[test]
    fn sort_comparator_orders_the_result() {
        let list = ListSearch::new(100, 48);
        let items = vec!["b".to_string(), "c".to_string(), "a".to_string()];
        let applied = list.apply(&items, contains, Some(&|a: &String, b: &String| a.cmp(b)));
        let shown: Vec<&str> = applied.items.iter().map(|s| s.as_str()).collect();
        assert_eq!(shown, vec!["a", "b", "c"]);
    }

    #[test]
    fn one_load_more_grows_twenty_to_sixty_eight() {
        let mut list = ListSearch::new(20, 48);
        let total = 100;

        assert!(list.begin_load_more(total));
        assert!(list.is_loading_more());
        assert!(list.finish_load_more());
        assert_eq!(list.display_count(), 68);
    }

    #[test]
    fn display_count_is_monotone_until_reset() {
        let mut list = ListSearch::new(20, 48);
        let mut last = list.display_count();

        for _ in 0..3 {
            list.begin_load_more(1_000);
            list.finish_load_more();
            assert!(list.display_count() >= last);
            last = list.display_count();
        }
        assert_eq!(last, 20 + 3 * 48);
    }

    #[test]
    fn no_loads_once_everything_is_displayed() {
        let mut list = ListSearch::new(20, 48);
        let total = 100;

        for _ in 0..2 {
            list.begin_load_more(total);
            list.finish_load_more();
        }
        assert_eq!(list.display_count(), 116);

        // display_count >= total: neither manual nor automatic loads fire.
        assert!(!list.has_more(total));
        assert!(!list.begin_load_more(total));
        assert!(!list.should_auto_load(99, total));
    }

    #[test]
    fn loads_never_overlap() {
        let mut list = ListSearch::new(20, 48);
        assert!(list.begin_load_more(100));
        assert!(!list.begin_load_more(100));
        assert!(!list.should_auto_load(19, 100));
        list.finish_load_more();
        assert!(list.begin_load_more(100));
    }

    #[test]
    fn settled_term_change_resets_display_count() {
        let mut list = ListSearch::new(20, 48);
        list.begin_load_more(100);
        list.finish_load_more();
        assert_eq!(list.display_count(), 68);

        list.push_char('a');
        assert!(list.settle_debounce());
        assert_eq!(list.display_count(), 20);
    }

    #[test]
    fn settling_an_unchanged_term_neither_reports_change_nor_resets() {
        let mut list = ListSearch::new(20, 48);
        list.push_char('a');
        assert!(list.settle_debounce());

        list.begin_load_more(100);
        list.finish_load_more();

        // Timer fires again with no intervening edit.
        assert!(!list.settle_debounce());
        assert_eq!(list.display_count(), 68);
    }

    #[test]
    fn auto_load_triggers_near_the_end_of_the_slice() {
        let list = ListSearch::new(20, 48);
        assert!(!list.should_auto_load(0, 100));
        assert!(!list.should_auto_load(14, 100));
        assert!(list.should_auto_load(15, 100));
        assert!(list.should_auto_load(19, 100));
    }
}
