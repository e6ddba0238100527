#![forbid(unsafe_code)]

//! Cell geometry for a horizontal row.
//!
//! Each cell sits in a slot of `cell_width + spacing` (rounded down to an even
//! margin): half the spacing pads every side of the cell, so neighbouring
//! cells end up `spacing` apart.

use pinview_core::geometry::{Rect, Sides};

use super::config::PinConfig;

/// Scaled cell metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    origin: (u16, u16),
    cell_width: u16,
    cell_height: u16,
    spacing: u16,
}

impl CellLayout {
    pub fn new(cell_width: u16, cell_height: u16, spacing: u16) -> Self {
        Self {
            origin: (0, 0),
            cell_width,
            cell_height,
            spacing,
        }
    }

    /// Layout from config dimensions, scaled by its pixel scale.
    pub fn from_config(config: &PinConfig) -> Self {
        Self::new(
            config.scaled(config.cell_width()),
            config.scaled(config.cell_height()),
            config.scaled(config.cell_spacing()),
        )
    }

    /// Top-left corner of the row (builder).
    #[must_use]
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height
    }

    pub fn margin(&self) -> Sides {
        Sides::all(self.spacing / 2)
    }

    /// Width taken by one cell including its margins.
    pub fn slot_width(&self) -> u16 {
        self.cell_width
            .saturating_add(self.margin().horizontal_sum())
    }

    fn slot_height(&self) -> u16 {
        self.cell_height.saturating_add(self.margin().vertical_sum())
    }

    /// Slot of cell `index`, margins included.
    pub fn slot_rect(&self, index: usize) -> Rect {
        let offset = u16::try_from(index)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.slot_width());
        Rect::new(
            self.origin.0.saturating_add(offset),
            self.origin.1,
            self.slot_width(),
            self.slot_height(),
        )
    }

    /// Drawable frame of cell `index`.
    pub fn cell_rect(&self, index: usize) -> Rect {
        self.slot_rect(index).inner(self.margin())
    }

    /// Width of a row of `len` cells.
    pub fn row_width(&self, len: usize) -> u16 {
        u16::try_from(len)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.slot_width())
    }

    /// Bounding box of a row of `len` cells.
    pub fn bounds(&self, len: usize) -> Rect {
        (1..len).fold(
            if len == 0 {
                Rect::new(self.origin.0, self.origin.1, 0, 0)
            } else {
                self.slot_rect(0)
            },
            |acc, i| acc.union(&self.slot_rect(i)),
        )
    }

    /// Cell whose frame contains the point.
    pub fn hit_test(&self, len: usize, x: u16, y: u16) -> Option<usize> {
        (0..len).find(|&i| self.cell_rect(i).contains(x, y))
    }

    /// Cell width that makes `len` cells fit in `available`, or `None` if
    /// they already fit. Never shrinks below one unit.
    pub fn fit_width(&self, len: usize, available: u16) -> Option<u16> {
        if len == 0 || self.row_width(len) <= available {
            return None;
        }
        let per_slot = available / u16::try_from(len).unwrap_or(u16::MAX);
        Some(
            per_slot
                .saturating_sub(self.margin().horizontal_sum())
                .max(1),
        )
    }

    pub(crate) fn set_cell_width(&mut self, width: u16) {
        self.cell_width = width;
    }
}
