//! Single-shot timer bookkeeping over the host's anonymous `Timer` events.
//!
//! The plugin needs three short timers (search debounce at 150 ms, the
//! simulated load-more delay at 200 ms, the scroll-restore delay at 100 ms),
//! but Zellij's `set_timeout` carries no identity: every expiry arrives as
//! the same bare `Timer` event. This module keeps the identity on our side:
//! pending timers are queued with a kind and an absolute deadline, and a
//! `Timer` event simply asks the queue which deadlines are due.
//!
//! Cancellation falls out of the same design. Scheduling a kind replaces any
//! pending entry of that kind, and cancelling removes the entry; the host
//! timeout still fires, but finds nothing due and becomes a no-op. That is
//! exactly the "superseded by a new state change" semantics the debounce
//! needs.

use crate::app::modes::Page;

/// Debounce delay for search terms.
pub const DEBOUNCE_MS: i64 = 150;

/// Simulated delay before a load-more grows the display count. Purely a
/// perceived-latency affordance; no I/O happens during it.
pub const LOAD_MORE_DELAY_MS: i64 = 200;

/// Delay before a saved scroll position is re-applied, giving the list
/// content one render to settle first.
pub const RESTORE_DELAY_MS: i64 = 100;

/// Slack applied when matching deadlines against a `Timer` event, absorbing
/// host timeout rounding so a deadline is never missed by a millisecond.
const FIRE_SLACK_MS: i64 = 20;

/// What a pending timer will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Settle the debounced search term of a page's list.
    Debounce(Page),

    /// Complete a pending load-more on a page's list.
    LoadMore(Page),

    /// Re-apply the saved scroll position of a page's list.
    RestoreScroll(Page),
}

/// A scheduled single-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    kind: TimerKind,
    deadline_ms: i64,
}

/// Queue of pending single-shot timers.
///
/// At most one timer of each kind is pending at a time; scheduling a kind
/// again supersedes the earlier entry.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules (or reschedules) a timer of the given kind.
    ///
    /// Returns the delay in milliseconds the caller should pass to the host's
    /// `set_timeout`.
    pub fn schedule(&mut self, kind: TimerKind, now_ms: i64, delay_ms: i64) -> i64 {
        self.cancel(kind);
        self.pending.push(PendingTimer {
            kind,
            deadline_ms: now_ms + delay_ms,
        });
        delay_ms
    }

    /// Removes a pending timer of the given kind, if any.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|timer| timer.kind != kind);
    }

    /// Whether a timer of the given kind is pending.
    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|timer| timer.kind == kind)
    }

    /// Pops and returns every timer whose deadline has been reached.
    ///
    /// Called on each host `Timer` event. Host timeouts that were superseded
    /// find nothing due here and fall through harmlessly.
    pub fn fire_due(&mut self, now_ms: i64) -> Vec<TimerKind> {
        let cutoff = now_ms + FIRE_SLACK_MS;
        let (due, remaining): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|timer| timer.deadline_ms <= cutoff);

        self.pending = remaining;
        due.into_iter().map(|timer| timer.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_timers_fire_once() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::Debounce(Page::Books), 0, DEBOUNCE_MS);

        assert!(queue.fire_due(0).is_empty());
        assert_eq!(
            queue.fire_due(DEBOUNCE_MS),
            vec![TimerKind::Debounce(Page::Books)]
        );
        assert!(queue.fire_due(DEBOUNCE_MS * 2).is_empty());
    }

    #[test]
    fn rescheduling_supersedes_the_earlier_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::Debounce(Page::Books), 0, DEBOUNCE_MS);
        // One more keystroke 100 ms later restarts the debounce window.
        queue.schedule(TimerKind::Debounce(Page::Books), 100, DEBOUNCE_MS);

        // The first host timeout fires at 150 and must be a no-op.
        assert!(queue.fire_due(DEBOUNCE_MS).is_empty());
        assert_eq!(
            queue.fire_due(100 + DEBOUNCE_MS),
            vec![TimerKind::Debounce(Page::Books)]
        );
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::RestoreScroll(Page::Authors), 0, RESTORE_DELAY_MS);
        queue.cancel(TimerKind::RestoreScroll(Page::Authors));

        assert!(queue.fire_due(RESTORE_DELAY_MS * 10).is_empty());
    }

    #[test]
    fn kinds_are_independent() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::Debounce(Page::Books), 0, DEBOUNCE_MS);
        queue.schedule(TimerKind::LoadMore(Page::Books), 0, LOAD_MORE_DELAY_MS);

        let fired = queue.fire_due(DEBOUNCE_MS);
        assert_eq!(fired, vec![TimerKind::Debounce(Page::Books)]);
        assert!(queue.is_pending(TimerKind::LoadMore(Page::Books)));
    }
}
