//! Drawing primitives over a [`ScreenBuffer`].
//!
//! Every write goes through the translate and clip stacks and the z test:
//! a cell is written only if it lies inside the active clip and the
//! incoming z-index is at least the cell's stamp for this frame.
//!
//! Stacks are pushed and popped in pairs around scrolled subtrees. An
//! unbalanced stack at [`Canvas::finish`] is a bug in the caller.

use super::buffer::{CONTINUATION, ScreenBuffer};
use crate::layout::char_width;
use crate::types::{Attr, BorderGlyphs, ClipRect, Rect, Rgba, Sides};

pub struct Canvas<'a> {
    buf: &'a mut ScreenBuffer,
    translate: Vec<(i32, i32)>,
    clips: Vec<ClipRect>,
    offset: (i32, i32),
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut ScreenBuffer) -> Self {
        Self {
            buf,
            translate: Vec::new(),
            clips: Vec::new(),
            offset: (0, 0),
        }
    }

    fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.buf.width() as i32, self.buf.height() as i32)
    }

    /// Active clip in screen coordinates.
    pub fn clip(&self) -> ClipRect {
        self.clips.last().copied().unwrap_or_else(|| self.bounds())
    }

    pub fn push_translate(&mut self, dx: i32, dy: i32) {
        self.translate.push(self.offset);
        self.offset = (self.offset.0 + dx, self.offset.1 + dy);
    }

    pub fn pop_translate(&mut self) {
        debug_assert!(!self.translate.is_empty(), "translate stack underflow");
        if let Some(prev) = self.translate.pop() {
            self.offset = prev;
        }
    }

    /// Narrow the clip to `rect`, given in current (translated) coordinates.
    pub fn push_clip(&mut self, rect: Rect) {
        let screen = rect.offset(self.offset.0, self.offset.1);
        let next = self.clip().intersect(&screen).unwrap_or_default();
        self.clips.push(next);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clips.is_empty(), "clip stack underflow");
        self.clips.pop();
    }

    /// End the frame. Both stacks must be empty.
    pub fn finish(self) {
        debug_assert!(self.translate.is_empty(), "unbalanced translate stack");
        debug_assert!(self.clips.is_empty(), "unbalanced clip stack");
    }

    /// Write one cell at translated (x, y). Returns true if written.
    fn put(&mut self, x: i32, y: i32, ch: char, fg: Rgba, bg: Option<Rgba>, attrs: Attr, z: i32) -> bool {
        let (sx, sy) = (x + self.offset.0, y + self.offset.1);
        if !self.clip().contains(sx, sy) {
            return false;
        }
        let Some(cell) = self.buf.get_mut(sx, sy) else {
            return false;
        };
        if z < cell.z {
            return false;
        }
        cell.ch = ch;
        cell.fg = fg;
        if let Some(bg) = bg {
            cell.bg = bg;
        }
        cell.attrs = attrs;
        cell.z = z;
        true
    }

    /// Fill a rectangle with blanks on `bg`.
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgba, z: i32) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.put(x, y, ' ', Rgba::TERMINAL_DEFAULT, Some(bg), Attr::NONE, z);
            }
        }
    }

    /// Write text starting at (x, y); `\n` starts the next line.
    ///
    /// A terminal-default `bg` keeps whatever background is underneath.
    /// Wide characters take two cells, the second holding [`CONTINUATION`].
    pub fn fill_text(&mut self, x: i32, y: i32, text: &str, fg: Rgba, bg: Rgba, attrs: Attr, z: i32) {
        let bg = (!bg.is_terminal_default()).then_some(bg);
        for (line_no, line) in text.split('\n').enumerate() {
            let row = y + line_no as i32;
            let mut col = x;
            for ch in line.chars() {
                match char_width(ch) {
                    0 => {}
                    1 => {
                        self.put(col, row, ch, fg, bg, attrs, z);
                        col += 1;
                    }
                    _ => {
                        if self.put(col, row, ch, fg, bg, attrs, z) {
                            self.put(col + 1, row, CONTINUATION, fg, bg, attrs, z);
                        }
                        col += 2;
                    }
                }
            }
        }
    }

    /// Draw a border on the sides whose width is nonzero. The glyph set is
    /// picked by the widest side.
    pub fn stroke_rect(&mut self, rect: Rect, widths: Sides, fg: Rgba, bg: Rgba, z: i32) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let widest = widths.top.max(widths.right).max(widths.bottom).max(widths.left);
        if widest <= 0 {
            return;
        }
        let g = BorderGlyphs::for_width(widest);
        let bg = (!bg.is_terminal_default()).then_some(bg);
        let (l, t, r, b) = (rect.x, rect.y, rect.right() - 1, rect.bottom() - 1);
        let (has_t, has_r, has_b, has_l) = (widths.top > 0, widths.right > 0, widths.bottom > 0, widths.left > 0);

        if has_t {
            for x in l..=r {
                self.put(x, t, g.top, fg, bg, Attr::NONE, z);
            }
        }
        if has_b {
            for x in l..=r {
                self.put(x, b, g.bottom, fg, bg, Attr::NONE, z);
            }
        }
        if has_l {
            for y in t..=b {
                self.put(l, y, g.left, fg, bg, Attr::NONE, z);
            }
        }
        if has_r {
            for y in t..=b {
                self.put(r, y, g.right, fg, bg, Attr::NONE, z);
            }
        }
        let corners = [
            (has_t && has_l, l, t, g.top_left),
            (has_t && has_r, r, t, g.top_right),
            (has_b && has_l, l, b, g.bottom_left),
            (has_b && has_r, r, b, g.bottom_right),
        ];
        for (show, x, y, ch) in corners {
            if show {
                self.put(x, y, ch, fg, bg, Attr::NONE, z);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
