#![forbid(unsafe_code)]

//! Canonical input events delivered to a pin field by its host.
//!
//! These are the raw, platform-neutral events a host forwards: key presses,
//! taps (mouse downs), pastes and focus changes. The pin controller turns
//! them into field transitions.
//!
//! # Design Notes
//!
//! - Mouse coordinates are 0-indexed
//! - `KeyEventKind` defaults to `Press` when not available from the terminal
//! - `Modifiers` use bitflags for easy combination

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event. Only button downs are treated as taps.
    Mouse(MouseEvent),

    /// Paste event (from bracketed paste mode).
    Paste(PasteEvent),

    /// Host window focus gained (`true`) or lost (`false`).
    Focus(bool),
}

impl Event {
    /// Convert a Crossterm event into a pin [`Event`].
    ///
    /// Resize events and unmapped keys yield `None`.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }

    /// Check whether this is a key press or repeat (not a release).
    #[must_use]
    pub fn is_key_press(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            })
        )
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

/// Key codes a pin field cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Backspace key.
    Backspace,

    /// Delete key.
    Delete,

    /// Left arrow key.
    Left,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed).
    pub x: u16,

    /// Y coordinate (0-indexed).
    pub y: u16,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// A left-button press at the given position, i.e. a tap.
    #[must_use]
    pub const fn tap(x: u16, y: u16) -> Self {
        Self::new(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    /// Check whether this event is a primary-button press.
    #[must_use]
    pub const fn is_tap(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse moved or dragged.
    Moved,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// A paste event from bracketed paste mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    /// The pasted text content.
    pub text: String,

    /// True if this came from bracketed paste mode.
    ///
    /// When true, the text was received atomically and should be
    /// treated as a single paste operation rather than individual
    /// key presses.
    pub bracketed: bool,
}

impl PasteEvent {
    /// Create a new paste event.
    #[must_use]
    pub fn new(text: impl Into<String>, bracketed: bool) -> Self {
        Self {
            text: text.into(),
            bracketed,
        }
    }

    /// Create a bracketed paste event (the common case).
    #[must_use]
    pub fn bracketed(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Mouse(mouse) => Some(Event::Mouse(map_mouse_event(mouse))),
        cte::Event::Paste(text) => Some(Event::Paste(PasteEvent::bracketed(text))),
        cte::Event::FocusGained => Some(Event::Focus(true)),
        cte::Event::FocusLost => Some(Event::Focus(false)),
        cte::Event::Resize(..) => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind: map_key_kind(event.kind),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::Left => Some(KeyCode::Left),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> MouseEvent {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => MouseEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => MouseEventKind::Up(map_mouse_button(button)),
        _ => MouseEventKind::Moved,
    };
    MouseEvent::new(kind, event.column, event.row)
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crossterm::event as ct_event;

    #[test]
    fn key_event_modifiers() {
        let event = KeyEvent::new(KeyCode::Char('v')).with_modifiers(Modifiers::CTRL);
        assert!(event.ctrl());
        assert!(!event.alt());
    }

    #[test]
    fn key_press_detection() {
        let press = Event::Key(KeyEvent::new(KeyCode::Backspace));
        let repeat = Event::Key(KeyEvent {
            kind: KeyEventKind::Repeat,
            ..KeyEvent::new(KeyCode::Backspace)
        });
        let release = Event::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..KeyEvent::new(KeyCode::Backspace)
        });
        assert!(press.is_key_press());
        assert!(repeat.is_key_press());
        assert!(!release.is_key_press());
        assert!(!Event::Focus(true).is_key_press());
    }

    #[test]
    fn mouse_tap() {
        let tap = MouseEvent::tap(4, 1);
        assert!(tap.is_tap());
        assert_eq!((tap.x, tap.y), (4, 1));
        let right = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 4, 1);
        assert!(!right.is_tap());
        assert!(!MouseEvent::new(MouseEventKind::Moved, 0, 0).is_tap());
    }

    #[test]
    fn paste_event_creation() {
        let paste = PasteEvent::bracketed("123456");
        assert_eq!(paste.text, "123456");
        assert!(paste.bracketed);
    }

    #[test]
    fn defaults() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert_eq!(KeyEventKind::default(), KeyEventKind::Press);
    }

    #[test]
    fn crossterm_key_maps() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Char('5'),
            ct_event::KeyModifiers::NONE,
        ));
        assert_eq!(
            Event::from_crossterm(ct),
            Some(Event::Key(KeyEvent::new(KeyCode::Char('5'))))
        );

        let back = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Backspace,
            ct_event::KeyModifiers::SHIFT,
        ));
        let mapped = Event::from_crossterm(back);
        assert_eq!(
            mapped,
            Some(Event::Key(
                KeyEvent::new(KeyCode::Backspace).with_modifiers(Modifiers::SHIFT)
            ))
        );
    }

    #[test]
    fn crossterm_arrows_map() {
        let left = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Left,
            ct_event::KeyModifiers::NONE,
        ));
        assert_eq!(
            Event::from_crossterm(left),
            Some(Event::Key(KeyEvent::new(KeyCode::Left)))
        );
    }

    #[test]
    fn crossterm_unmapped_key_is_none() {
        for code in [
            ct_event::KeyCode::F(5),
            ct_event::KeyCode::Enter,
            ct_event::KeyCode::Esc,
            ct_event::KeyCode::Tab,
            ct_event::KeyCode::Right,
        ] {
            let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
                code,
                ct_event::KeyModifiers::NONE,
            ));
            assert_eq!(Event::from_crossterm(ct), None, "{code:?}");
        }
    }

    #[test]
    fn crossterm_resize_is_dropped() {
        assert_eq!(Event::from_crossterm(ct_event::Event::Resize(80, 24)), None);
    }

    #[test]
    fn crossterm_focus_and_paste() {
        assert_eq!(
            Event::from_crossterm(ct_event::Event::FocusGained),
            Some(Event::Focus(true))
        );
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Paste("42".to_string())),
            Some(Event::Paste(PasteEvent::bracketed("42")))
        );
    }

    #[test]
    fn crossterm_mouse_down_is_tap() {
        let ct = ct_event::Event::Mouse(ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::Down(ct_event::MouseButton::Left),
            column: 12,
            row: 2,
            modifiers: ct_event::KeyModifiers::NONE,
        });
        assert_eq!(Event::from_crossterm(ct), Some(Event::Mouse(MouseEvent::tap(12, 2))));
    }

    #[test]
    fn map_modifiers_super_variants() {
        assert!(map_modifiers(ct_event::KeyModifiers::SUPER).contains(Modifiers::SUPER));
        assert!(map_modifiers(ct_event::KeyModifiers::HYPER).contains(Modifiers::SUPER));
        assert!(map_modifiers(ct_event::KeyModifiers::META).contains(Modifiers::SUPER));
    }
}
