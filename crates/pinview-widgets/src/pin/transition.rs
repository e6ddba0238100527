#![forbid(unsafe_code)]

//! Transition engine.
//!
//! Maps `(FieldState, FieldEvent)` to a new state plus the notifications and
//! focus moves the controller must carry out. No rendering, timing or
//! platform calls happen here, so every rule can be exercised directly.
//!
//! # Rules
//!
//! - Typing into cell `i` stores the first visible grapheme and advances the
//!   logical focus to `i + 1`; the last cell never advances.
//! - Delete works on the focused cell: an armed last cell is cleared in
//!   place, an empty cell retreats to its predecessor and clears it, a
//!   filled cell is cleared without moving.
//! - With the cursor hidden, focus requests are redirected to the first
//!   empty cell (or the last cell when full), except for the one request
//!   right after a deletion.
//! - Cells ahead of `max(0, focus)` are disabled after every transition.
//! - `Completed` fires only on the edge into "every cell filled".

use super::codec::{self, first_grapheme};
use super::error::PinError;
use super::state::FieldState;

/// What caused a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusSource {
    /// The user tapped a cell. Leaves delete mode first.
    Touch,
    /// Focus moved for any other reason (platform traversal, host code).
    #[default]
    Programmatic,
}

/// Input to the transition engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Text arrived in a cell. Only the first visible grapheme is kept;
    /// text without one behaves like [`FieldEvent::CellCleared`].
    CharEntered { cell: usize, text: String },
    /// The platform emptied a cell.
    CellCleared { cell: usize },
    /// The delete key was pressed in the focused cell.
    DeleteKey,
    /// A cell asked for focus.
    FocusRequested { cell: usize, source: FocusSource },
    /// Replace the whole value.
    SetValue(String),
    /// Rebuild the field with a new number of cells.
    Resize(usize),
}

/// Something the host should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The logical value changed.
    ValueChanged(String),
    /// Every cell is now filled.
    Completed { value: String, from_user: bool },
}

/// A focus change the render surfaces must reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    pub cell: usize,
    /// Follows typing, so the platform move waits for the entered character
    /// (or its mask) to render first.
    pub deferred: bool,
}

impl FocusMove {
    const fn now(cell: usize) -> Self {
        Self {
            cell,
            deferred: false,
        }
    }

    const fn after_render(cell: usize) -> Self {
        Self {
            cell,
            deferred: true,
        }
    }
}

/// Outcome of one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    pub notifications: Vec<Notification>,
    pub focus_move: Option<FocusMove>,
    /// Set when the event was ignored. The state is then unchanged.
    pub rejected: Option<PinError>,
}

impl Transition {
    fn rejected(err: PinError) -> Self {
        Self {
            rejected: Some(err),
            ..Self::default()
        }
    }

    /// The completion notification, if this transition produced one.
    pub fn completion(&self) -> Option<(&str, bool)> {
        self.notifications.iter().find_map(|n| match n {
            Notification::Completed { value, from_user } => Some((value.as_str(), *from_user)),
            Notification::ValueChanged(_) => None,
        })
    }

    pub fn value_changed(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| matches!(n, Notification::ValueChanged(_)))
    }
}

/// Pure form of the engine: the input state is left untouched.
pub fn transition(state: &FieldState, event: FieldEvent) -> (FieldState, Transition) {
    let mut next = state.clone();
    let outcome = next.apply(event);
    (next, outcome)
}

impl FieldState {
    /// Apply one event in place.
    pub fn apply(&mut self, event: FieldEvent) -> Transition {
        let from_user = !matches!(event, FieldEvent::SetValue(_));
        let is_resize = matches!(event, FieldEvent::Resize(_));
        let before = self.value();
        let was_completed = self.tracker.is_completed();

        let step = match event {
            FieldEvent::CharEntered { cell, text } => self.char_entered(cell, &text),
            FieldEvent::CellCleared { cell } => self.cell_cleared(cell),
            FieldEvent::DeleteKey => self.delete_key(),
            FieldEvent::FocusRequested { cell, source } => self.focus_requested(cell, source),
            FieldEvent::SetValue(value) => self.set_value(&value),
            FieldEvent::Resize(len) => {
                self.rebuild(len);
                Ok(None)
            }
        };

        let focus_move = match step {
            Ok(focus_move) => focus_move,
            Err(err) => return Transition::rejected(err),
        };

        self.cells.apply_enabled(self.tracker.focus());

        let mut out = Transition {
            focus_move,
            ..Transition::default()
        };
        if is_resize {
            return out;
        }

        let after = self.value();
        let changed = after != before;
        let full = self.cells.is_full();
        let fire = full && (!was_completed || (!from_user && changed));
        self.tracker.set_completed(full);

        if changed {
            out.notifications
                .push(Notification::ValueChanged(after.clone()));
        }
        if fire {
            out.notifications.push(Notification::Completed {
                value: after,
                from_user,
            });
        }
        out
    }

    fn check_range(&self, cell: usize) -> Result<(), PinError> {
        if cell < self.len() {
            Ok(())
        } else {
            Err(PinError::CellOutOfRange {
                cell,
                length: self.len(),
            })
        }
    }

    fn char_entered(&mut self, cell: usize, text: &str) -> Result<Option<FocusMove>, PinError> {
        self.check_range(cell)?;
        if self.cells.get(cell).is_some_and(|c| !c.is_enabled()) {
            return Err(PinError::CellDisabled(cell));
        }
        let Some(grapheme) = first_grapheme(text) else {
            return self.cell_cleared(cell);
        };
        if !self.mode.accepts(grapheme) {
            return Err(PinError::NonNumericValue(grapheme.to_owned()));
        }
        if !self.keeps_neighbour_boundaries(cell, grapheme) {
            return Err(PinError::MergesWithNeighbour(cell));
        }

        self.cells.set(cell, grapheme);
        let last = self.len() - 1;
        if cell < last {
            self.tracker.set_focus(cell + 1);
            Ok(Some(FocusMove::after_render(cell + 1)))
        } else {
            self.tracker.set_focus(cell);
            if self.arms_last_cell() {
                self.tracker.arm_last_cell();
            }
            Ok(None)
        }
    }

    /// A cell value must stay its own grapheme next to the nearest filled
    /// cells on either side, or the joined value would not split back.
    fn keeps_neighbour_boundaries(&self, cell: usize, grapheme: &str) -> bool {
        let before = self.cells.iter().take(cell).filter_map(|c| c.value()).last();
        let after = self.cells.iter().skip(cell + 1).find_map(|c| c.value());
        before.is_none_or(|b| codec::keeps_boundary(b, grapheme))
            && after.is_none_or(|a| codec::keeps_boundary(grapheme, a))
    }

    fn cell_cleared(&mut self, cell: usize) -> Result<Option<FocusMove>, PinError> {
        self.check_range(cell)?;
        self.cells.clear(cell);
        self.tracker.mark_delete_pending();
        Ok(None)
    }

    fn delete_key(&mut self) -> Result<Option<FocusMove>, PinError> {
        let cell = self.tracker.focus().ok_or(PinError::NoFocusedCell)?;

        if cell + 1 == self.len() && self.tracker.last_cell_armed() {
            self.cells.clear(cell);
            self.tracker.disarm_last_cell();
            return Ok(None);
        }
        if cell == 0 {
            self.cells.clear(0);
            return Ok(None);
        }

        self.tracker.mark_delete_pending();
        if self.cells.get(cell).is_some_and(|c| c.is_empty()) {
            let prev = cell - 1;
            self.tracker.set_focus(prev);
            self.cells.clear(prev);
            Ok(Some(FocusMove::now(prev)))
        } else {
            self.cells.clear(cell);
            Ok(None)
        }
    }

    fn focus_requested(
        &mut self,
        cell: usize,
        source: FocusSource,
    ) -> Result<Option<FocusMove>, PinError> {
        self.check_range(cell)?;
        if self.cursor_visible && !self.cells.get(cell).is_some_and(|c| c.is_enabled()) {
            return Err(PinError::CellDisabled(cell));
        }
        if source == FocusSource::Touch {
            self.tracker.clear_delete_pending();
        }

        let target = if self.cursor_visible {
            cell
        } else if self.tracker.take_delete_pending() && self.tracker.focus() == Some(cell) {
            cell
        } else {
            self.cells.first_empty().unwrap_or(self.len() - 1)
        };

        self.tracker.set_focus(target);
        Ok((target != cell).then_some(FocusMove::now(target)))
    }

    fn set_value(&mut self, value: &str) -> Result<Option<FocusMove>, PinError> {
        let values = codec::decode(value, self.len(), self.mode)?;
        let filled = values.iter().take_while(|v| v.is_some()).count();
        self.cells.assign(values);

        if self.is_empty() {
            return Ok(None);
        }
        let focus = if filled < self.len() {
            filled
        } else {
            if self.arms_last_cell() {
                self.tracker.arm_last_cell();
            }
            self.len() - 1
        };
        self.tracker.set_focus(focus);
        Ok(Some(FocusMove::now(focus)))
    }
}
