#![forbid(unsafe_code)]

//! Collaborators the controller drives: one render surface per cell and the
//! platform keyboard.
//!
//! Surfaces must not report focus changes that were initiated through
//! [`CellSurface::request_focus`] back to the controller.

use pinview_core::color::PackedRgba;
use pinview_core::geometry::Rect;

use super::codec::InputMode;
use super::config::{CursorAppearance, ResourceRef};

/// A single drawn cell.
pub trait CellSurface {
    /// Replace the displayed (possibly masked) text.
    fn set_text(&mut self, text: &str);

    fn request_focus(&mut self);

    fn clear_focus(&mut self);

    fn set_enabled(&mut self, enabled: bool);

    fn set_background(&mut self, background: ResourceRef);

    fn set_text_size(&mut self, size: u16);

    fn set_text_color(&mut self, color: PackedRgba);

    fn set_cursor_visible(&mut self, visible: bool);

    /// Restyle the text cursor. Platforms that cannot do this ignore it.
    fn set_cursor_appearance(&mut self, _appearance: &CursorAppearance) {}

    /// Placeholder shown while the cell is empty.
    fn set_hint(&mut self, hint: &str);

    /// Which soft keyboard layout the cell should request.
    fn set_input_kind(&mut self, mode: InputMode);

    /// Position and size of the cell, in scaled host units.
    fn set_frame(&mut self, frame: Rect);
}

/// Creates surfaces whenever the row is (re)built.
pub trait SurfaceFactory {
    type Surface: CellSurface;

    fn create(&mut self, index: usize) -> Self::Surface;
}

impl<S, F> SurfaceFactory for F
where
    S: CellSurface,
    F: FnMut(usize) -> S,
{
    type Surface = S;

    fn create(&mut self, index: usize) -> S {
        self(index)
    }
}

/// Platform soft keyboard.
pub trait Keyboard {
    fn show(&mut self);

    fn hide(&mut self);

    fn toggle(&mut self);
}

/// Keyboard for hosts without a soft keyboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeyboard;

impl Keyboard for NoKeyboard {
    fn show(&mut self) {}

    fn hide(&mut self) {}

    fn toggle(&mut self) {}
}
