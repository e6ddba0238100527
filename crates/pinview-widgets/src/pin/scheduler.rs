#![forbid(unsafe_code)]

//! Deferred platform work.
//!
//! Holds at most one pending focus move and one pending keyboard open. A new
//! request replaces the pending one of the same kind. Nothing here checks
//! whether a move is still valid; the controller does that when it fires.

use std::time::Duration;

use web_time::Instant;

/// Delay before moving focus after typing into a masked field, so the mask
/// glyph renders before the keyboard/focus transition.
pub const MASKED_FOCUS_DELAY: Duration = Duration::from_millis(25);

/// Delay before moving focus after typing into an unmasked field.
pub const FOCUS_DELAY: Duration = Duration::from_millis(1);

/// Delay before the keyboard opens after construction.
pub const KEYBOARD_DELAY: Duration = Duration::from_millis(200);

/// Work that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Focus(usize),
    OpenKeyboard,
}

#[derive(Debug, Clone, Default)]
pub struct FocusScheduler {
    focus: Option<(usize, Instant)>,
    keyboard: Option<Instant>,
}

impl FocusScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_focus(&mut self, cell: usize, at: Instant) {
        self.focus = Some((cell, at));
    }

    pub fn schedule_keyboard(&mut self, at: Instant) {
        self.keyboard = Some(at);
    }

    /// Drop any pending focus move.
    pub fn cancel_focus(&mut self) {
        self.focus = None;
    }

    pub fn pending_focus(&self) -> Option<usize> {
        self.focus.map(|(cell, _)| cell)
    }

    pub fn is_idle(&self) -> bool {
        self.focus.is_none() && self.keyboard.is_none()
    }

    /// Earliest time anything is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.focus.map(|(_, at)| at), self.keyboard) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Remove and return everything due at `now`, focus first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Due> {
        let mut due = Vec::new();
        if let Some((cell, at)) = self.focus
            && at <= now
        {
            self.focus = None;
            due.push(Due::Focus(cell));
        }
        if let Some(at) = self.keyboard
            && at <= now
        {
            self.keyboard = None;
            due.push(Due::OpenKeyboard);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_before_deadline() {
        let now = Instant::now();
        let mut sched = FocusScheduler::new();
        sched.schedule_focus(1, now + FOCUS_DELAY);
        assert!(sched.take_due(now).is_empty());
        assert_eq!(sched.pending_focus(), Some(1));
        assert_eq!(sched.take_due(now + FOCUS_DELAY), vec![Due::Focus(1)]);
        assert!(sched.is_idle());
    }

    #[test]
    fn newer_focus_request_supersedes() {
        let now = Instant::now();
        let mut sched = FocusScheduler::new();
        sched.schedule_focus(1, now);
        sched.schedule_focus(2, now);
        assert_eq!(sched.take_due(now), vec![Due::Focus(2)]);
    }

    #[test]
    fn deadline_is_earliest() {
        let now = Instant::now();
        let mut sched = FocusScheduler::new();
        assert_eq!(sched.next_deadline(), None);
        sched.schedule_keyboard(now + KEYBOARD_DELAY);
        assert_eq!(sched.next_deadline(), Some(now + KEYBOARD_DELAY));
        sched.schedule_focus(0, now + MASKED_FOCUS_DELAY);
        assert_eq!(sched.next_deadline(), Some(now + MASKED_FOCUS_DELAY));
    }

    #[test]
    fn focus_fires_before_keyboard() {
        let now = Instant::now();
        let mut sched = FocusScheduler::new();
        sched.schedule_keyboard(now);
        sched.schedule_focus(3, now);
        assert_eq!(sched.take_due(now), vec![Due::Focus(3), Due::OpenKeyboard]);
    }

    #[test]
    fn cancel_drops_focus_only() {
        let now = Instant::now();
        let mut sched = FocusScheduler::new();
        sched.schedule_focus(3, now);
        sched.schedule_keyboard(now);
        sched.cancel_focus();
        assert_eq!(sched.take_due(now), vec![Due::OpenKeyboard]);
    }
}
