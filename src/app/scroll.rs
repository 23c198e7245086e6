//! Scroll position memory across master/detail navigation.
//!
//! Each list page remembers where the user was before drilling into a detail
//! view, so that returning to the list resumes at the same row instead of the
//! top. The offset is saved immediately before the detail opens; restoration
//! happens after a short delay (see
//! [`RESTORE_DELAY_MS`](crate::app::timers::RESTORE_DELAY_MS)) so the list
//! content renders first, and only while no detail view is active.

/// Remembered scroll position of one list page.
///
/// The "offset" is the selected row index within the full filtered list,
/// the terminal analogue of a pixel scroll offset, since the visible window
/// is computed around the selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMemory {
    offset: usize,
}

impl ScrollMemory {
    /// Records the current offset. Called right before a detail view opens.
    pub fn save(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// The saved offset (0 when nothing was saved).
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether a delayed restore should run.
    ///
    /// Restoration is skipped while a detail view is open and when there is
    /// nothing to restore.
    #[must_use]
    pub fn should_restore(&self, in_list_view: bool) -> bool {
        in_list_view && self.offset > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_only_positive_offsets_in_list_view() {
        let mut memory = ScrollMemory::default();
        assert!(!memory.should_restore(true));

        memory.save(17);
        assert!(memory.should_restore(true));
        assert!(!memory.should_restore(false));
        assert_eq!(memory.offset(), 17);
    }
}
