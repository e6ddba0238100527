#![forbid(unsafe_code)]

//! Focus tracker: which cell holds logical focus, plus the one-shot flags
//! that steer deletion and completion.

/// Logical focus and edit-mode flags of a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusTracker {
    /// `None` only for a zero-length field.
    focus: Option<usize>,
    /// Set by deletions; suppresses the next focus redirect.
    delete_pending: bool,
    /// Set when the last cell is filled in number or masked mode; lets a
    /// delete clear the last cell in place.
    last_cell_armed: bool,
    /// Latched while every cell holds a value.
    completed: bool,
}

impl FocusTracker {
    /// Tracker for a freshly built field of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            focus: (len > 0).then_some(0),
            ..Self::default()
        }
    }

    /// Focused cell, if any.
    #[inline]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Focus as a signed index, `-1` meaning none.
    pub fn focus_index(&self) -> isize {
        self.focus.map_or(-1, |i| i as isize)
    }

    pub(crate) fn set_focus(&mut self, cell: usize) {
        self.focus = Some(cell);
    }

    #[inline]
    pub fn delete_pending(&self) -> bool {
        self.delete_pending
    }

    pub(crate) fn mark_delete_pending(&mut self) {
        self.delete_pending = true;
    }

    pub(crate) fn clear_delete_pending(&mut self) {
        self.delete_pending = false;
    }

    /// Read and clear the delete-pending flag.
    pub(crate) fn take_delete_pending(&mut self) -> bool {
        std::mem::take(&mut self.delete_pending)
    }

    #[inline]
    pub fn last_cell_armed(&self) -> bool {
        self.last_cell_armed
    }

    pub(crate) fn arm_last_cell(&mut self) {
        self.last_cell_armed = true;
    }

    pub(crate) fn disarm_last_cell(&mut self) {
        self.last_cell_armed = false;
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_focuses_first_cell() {
        let tracker = FocusTracker::new(4);
        assert_eq!(tracker.focus(), Some(0));
        assert_eq!(tracker.focus_index(), 0);
        assert!(!tracker.delete_pending());
        assert!(!tracker.last_cell_armed());
        assert!(!tracker.is_completed());
    }

    #[test]
    fn zero_length_has_no_focus() {
        let tracker = FocusTracker::new(0);
        assert_eq!(tracker.focus(), None);
        assert_eq!(tracker.focus_index(), -1);
    }

    #[test]
    fn delete_pending_is_one_shot() {
        let mut tracker = FocusTracker::new(2);
        tracker.mark_delete_pending();
        assert!(tracker.take_delete_pending());
        assert!(!tracker.take_delete_pending());
    }
}
