#![forbid(unsafe_code)]

//! Construction-time options for a pin field.
//!
//! Dimensions are given in density-independent units and multiplied by
//! `pixel_scale` when laid out. Hosts resolve the scale from their platform
//! and pass it in.

use pinview_core::color::PackedRgba;

use super::codec::InputMode;
use super::mask::BULLET;

/// Opaque handle to a host resource (drawable, shape, font).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceRef(pub u32);

/// Cursor styling forwarded to surfaces that can draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorAppearance {
    pub color: Option<PackedRgba>,
    pub shape: Option<ResourceRef>,
}

/// Options for a [`PinView`](super::view::PinView).
#[derive(Debug, Clone, PartialEq)]
pub struct PinConfig {
    length: usize,
    cell_width: u16,
    cell_height: u16,
    cell_spacing: u16,
    text_size: u16,
    pixel_scale: f32,
    cell_background: Option<ResourceRef>,
    cursor_visible: bool,
    cursor: CursorAppearance,
    masked: bool,
    mask_glyph: char,
    hint: String,
    mode: InputMode,
    force_keyboard: bool,
    text_color: Option<PackedRgba>,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            length: 4,
            cell_width: 50,
            cell_height: 50,
            cell_spacing: 20,
            text_size: 12,
            pixel_scale: 1.0,
            cell_background: None,
            cursor_visible: false,
            cursor: CursorAppearance::default(),
            masked: false,
            mask_glyph: BULLET,
            hint: String::new(),
            mode: InputMode::Text,
            force_keyboard: true,
            text_color: None,
        }
    }
}

impl PinConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Builder methods ---

    /// Number of cells. Negative values clamp to zero.
    #[must_use]
    pub fn with_length(mut self, length: i32) -> Self {
        self.length = clamp_length(length);
        self
    }

    #[must_use]
    pub fn with_cell_size(mut self, width: u16, height: u16) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Gap between neighbouring cells; half of it pads each side of a cell.
    #[must_use]
    pub fn with_cell_spacing(mut self, spacing: u16) -> Self {
        self.cell_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_text_size(mut self, size: u16) -> Self {
        self.text_size = size;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: PackedRgba) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Display scale factor. Non-finite or non-positive values fall back to 1.0.
    #[must_use]
    pub fn with_pixel_scale(mut self, scale: f32) -> Self {
        self.pixel_scale = sanitize_scale(scale);
        self
    }

    #[must_use]
    pub fn with_cell_background(mut self, background: ResourceRef) -> Self {
        self.cell_background = Some(background);
        self
    }

    #[must_use]
    pub fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: CursorAppearance) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub fn with_masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    #[must_use]
    pub fn with_mask_glyph(mut self, glyph: char) -> Self {
        self.mask_glyph = glyph;
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Open the keyboard whenever the field takes entry focus.
    #[must_use]
    pub fn with_force_keyboard(mut self, force: bool) -> Self {
        self.force_keyboard = force;
        self
    }

    // --- Accessors ---

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height
    }

    pub fn cell_spacing(&self) -> u16 {
        self.cell_spacing
    }

    pub fn text_size(&self) -> u16 {
        self.text_size
    }

    pub fn text_color(&self) -> Option<PackedRgba> {
        self.text_color
    }

    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }

    pub fn cell_background(&self) -> Option<ResourceRef> {
        self.cell_background
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn cursor(&self) -> CursorAppearance {
        self.cursor
    }

    pub fn masked(&self) -> bool {
        self.masked
    }

    pub fn mask_glyph(&self) -> char {
        self.mask_glyph
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn force_keyboard(&self) -> bool {
        self.force_keyboard
    }

    /// Multiply a dimension by the pixel scale, saturating at `u16::MAX`.
    pub fn scaled(&self, value: u16) -> u16 {
        let px = (f32::from(value) * self.pixel_scale).round();
        if px >= f32::from(u16::MAX) {
            u16::MAX
        } else {
            px as u16
        }
    }

    // --- Mutators used by the controller ---

    pub(crate) fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    pub(crate) fn set_cell_width(&mut self, width: u16) {
        self.cell_width = width;
    }

    pub(crate) fn set_cell_height(&mut self, height: u16) {
        self.cell_height = height;
    }

    pub(crate) fn set_cell_spacing(&mut self, spacing: u16) {
        self.cell_spacing = spacing;
    }

    pub(crate) fn set_text_size(&mut self, size: u16) {
        self.text_size = size;
    }

    pub(crate) fn set_text_color(&mut self, color: PackedRgba) {
        self.text_color = Some(color);
    }

    pub(crate) fn set_cell_background(&mut self, background: ResourceRef) {
        self.cell_background = Some(background);
    }

    pub(crate) fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut CursorAppearance {
        &mut self.cursor
    }

    pub(crate) fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    pub(crate) fn set_hint(&mut self, hint: String) {
        self.hint = hint;
    }

    pub(crate) fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }
}

/// Clamp a host-supplied length to a cell count.
pub fn clamp_length(length: i32) -> usize {
    usize::try_from(length).unwrap_or(0)
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
