#![forbid(unsafe_code)]

//! Field state: the cells plus the focus tracker and mode flags.

use super::cell::{Cell, CellStore};
use super::codec::{self, InputMode};
use super::focus::FocusTracker;

/// Coarse phase of a field, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Zero-length field; nothing can hold focus.
    Idle,
    /// The given cell holds focus and accepts input.
    Editing(usize),
    /// Every cell holds a value and completion has been reported.
    Complete,
}

/// Everything the transition engine reads and writes.
///
/// The logical value is always derived from the cells; nothing else stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub(crate) cells: CellStore,
    pub(crate) tracker: FocusTracker,
    pub(crate) mode: InputMode,
    pub(crate) masked: bool,
    pub(crate) cursor_visible: bool,
}

impl FieldState {
    /// Build a field of `len` empty cells focused on cell 0.
    pub fn new(len: usize, mode: InputMode) -> Self {
        Self {
            cells: CellStore::new(len),
            tracker: FocusTracker::new(len),
            mode,
            masked: false,
            cursor_visible: false,
        }
    }

    /// Enable masked display (builder).
    #[must_use]
    pub fn with_masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    /// Show the text cursor and honor focus requests as-is (builder).
    #[must_use]
    pub fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The logical value: cell values joined in index order.
    pub fn value(&self) -> String {
        codec::encode(&self.cells)
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    #[inline]
    pub fn focus(&self) -> Option<usize> {
        self.tracker.focus()
    }

    pub fn tracker(&self) -> &FocusTracker {
        &self.tracker
    }

    #[inline]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    #[inline]
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    #[inline]
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// True when every cell holds a value.
    pub fn is_full(&self) -> bool {
        self.cells.is_full()
    }

    pub fn phase(&self) -> FieldPhase {
        match self.tracker.focus() {
            None => FieldPhase::Idle,
            Some(_) if self.tracker.is_completed() => FieldPhase::Complete,
            Some(cell) => FieldPhase::Editing(cell),
        }
    }

    pub(crate) fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    pub(crate) fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Switch input mode. The cells are rebuilt empty.
    pub(crate) fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        let len = self.len();
        self.rebuild(len);
    }

    pub(crate) fn rebuild(&mut self, len: usize) {
        self.cells.resize(len);
        self.tracker = FocusTracker::new(len);
    }

    /// Number mode or masked mode: filling the last cell arms an in-place
    /// delete for it.
    pub(crate) fn arms_last_cell(&self) -> bool {
        self.mode == InputMode::Number || self.masked
    }
}
