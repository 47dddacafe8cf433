//! ScreenBuffer - a grid of styled cells.
//!
//! Flat row-major storage: `index = y * width + x`. Each cell carries the
//! z-index stamp of the write that produced it so that lower layers painted
//! later in the same frame cannot overwrite higher ones.

use crate::types::{Attr, Rgba};

/// Marks the right half of a wide character.
pub const CONTINUATION: char = '\0';

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenCell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
    /// z-index of the last write this frame. Not part of the cell's look.
    pub z: i32,
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
            z: 0,
        }
    }
}

impl ScreenCell {
    /// Same character and style, ignoring the z stamp.
    #[inline]
    pub fn looks_like(&self, other: &ScreenCell) -> bool {
        self.ch == other.ch && self.fg == other.fg && self.bg == other.bg && self.attrs == other.attrs
    }

    /// Same colors and modifiers.
    #[inline]
    pub fn same_style(&self, other: &ScreenCell) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.attrs == other.attrs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenBuffer {
    width: u16,
    height: u16,
    cells: Vec<ScreenCell>,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![ScreenCell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&ScreenCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut ScreenCell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// One row of cells.
    pub fn row(&self, y: u16) -> &[ScreenCell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    pub fn cells(&self) -> &[ScreenCell] {
        &self.cells
    }

    /// Reset every cell to a blank with a zero z stamp.
    pub fn clear(&mut self) {
        self.cells.fill(ScreenCell::default());
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, ScreenCell::default());
    }

    /// Row text, with continuation cells dropped. Mostly for tests.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
