//! Differential renderer.
//!
//! The DiffRenderer keeps two [`ScreenBuffer`]s. Paint writes into the
//! current one; [`DiffRenderer::flush`] compares it with the previous frame
//! and sends only what changed.
//!
//! # Algorithm
//!
//! 1. For each row, find maximal runs of changed cells sharing one style
//! 2. Send each run as a single `write_run` call
//! 3. Place the cursor, only if its placement changed
//! 4. Flush the backend, only if anything was sent
//! 5. Swap buffers and clear the new current one for the next frame
//!
//! A frame identical to the previous one makes no backend calls at all.

use std::io;

use super::buffer::{CONTINUATION, ScreenBuffer, ScreenCell};
use crate::backend::{Backend, CellStyle, CursorPlacement};

/// What one flush sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub runs: usize,
    pub cells: usize,
    pub cursor_moved: bool,
}

impl FlushStats {
    pub fn is_empty(&self) -> bool {
        self.runs == 0 && !self.cursor_moved
    }
}

pub struct DiffRenderer {
    current: ScreenBuffer,
    previous: ScreenBuffer,
    cursor: Option<CursorPlacement>,
    full_redraw: bool,
}

impl DiffRenderer {
    /// The first flush always sends the whole screen.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            current: ScreenBuffer::new(width, height),
            previous: ScreenBuffer::new(width, height),
            cursor: None,
            full_redraw: true,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// The buffer the next frame is painted into.
    pub fn buffer_mut(&mut self) -> &mut ScreenBuffer {
        &mut self.current
    }

    pub fn buffer(&self) -> &ScreenBuffer {
        &self.current
    }

    /// The last frame sent to the backend.
    pub fn previous(&self) -> &ScreenBuffer {
        &self.previous
    }

    /// Forget what the terminal shows. The next flush redraws everything.
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
        self.cursor = None;
    }

    /// Resize both buffers and force a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.size() != (width, height) {
            self.current.resize(width, height);
            self.previous.resize(width, height);
        }
        self.invalidate();
    }

    fn changed(&self, x: i32, y: i32) -> bool {
        if self.full_redraw {
            return true;
        }
        match (self.current.get(x, y), self.previous.get(x, y)) {
            (Some(cur), Some(prev)) => !cur.looks_like(prev),
            _ => true,
        }
    }

    /// Send the current frame to `backend` and make it the previous one.
    pub fn flush<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        cursor: CursorPlacement,
    ) -> io::Result<FlushStats> {
        let mut stats = FlushStats::default();
        let (width, height) = (self.current.width() as i32, self.current.height() as i32);
        let mut text = String::new();

        for y in 0..height {
            let mut x = 0;
            while x < width {
                if !self.changed(x, y) {
                    x += 1;
                    continue;
                }
                let Some(&first) = self.current.get(x, y) else {
                    break;
                };
                if first.ch == CONTINUATION {
                    // Covered by the wide character to its left.
                    x += 1;
                    continue;
                }
                let start = x;
                text.clear();
                while x < width {
                    let Some(cell) = self.current.get(x, y) else {
                        break;
                    };
                    let trailing = cell.ch == CONTINUATION && x > start;
                    if !trailing && (!self.changed(x, y) || !cell.same_style(&first)) {
                        break;
                    }
                    if cell.ch != CONTINUATION {
                        text.push(cell.ch);
                    }
                    x += 1;
                }
                backend.write_run(start as u16, y as u16, &text, style_of(&first))?;
                stats.runs += 1;
                stats.cells += (x - start) as usize;
            }
        }

        if self.cursor != Some(cursor) {
            backend.set_cursor(cursor)?;
            self.cursor = Some(cursor);
            stats.cursor_moved = true;
        }
        if !stats.is_empty() {
            backend.flush()?;
        }
        tracing::trace!(
            runs = stats.runs,
            cells = stats.cells,
            cursor = stats.cursor_moved,
            full = self.full_redraw,
            "frame flushed"
        );

        self.full_redraw = false;
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
        Ok(stats)
    }
}

fn style_of(cell: &ScreenCell) -> CellStyle {
    CellStyle {
        fg: cell.fg,
        bg: cell.bg,
        attrs: cell.attrs,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, TestBackend};
    use crate::renderer::Canvas;
    use crate::types::{Attr, Rgba};

    fn paint(renderer: &mut DiffRenderer, rows: &[&str]) {
        let mut canvas = Canvas::new(renderer.buffer_mut());
        for (y, row) in rows.iter().enumerate() {
            canvas.fill_text(0, y as i32, row, Rgba::TERMINAL_DEFAULT, Rgba::TERMINAL_DEFAULT, Attr::NONE, 0);
        }
        canvas.finish();
    }

    #[test]
    fn test_first_frame_is_full() {
        let mut renderer = DiffRenderer::new(4, 2);
        let mut backend = TestBackend::new(4, 2);
        paint(&mut renderer, &["ab", "cd"]);
        let stats = renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert_eq!(stats.runs, 2);
        assert_eq!(backend.runs(), vec![(0, 0, "ab  "), (0, 1, "cd  ")]);
        assert_eq!(backend.calls().last(), Some(&BackendCall::Flush));
    }

    #[test]
    fn test_identical_frame_makes_no_calls() {
        let mut renderer = DiffRenderer::new(4, 2);
        let mut backend = TestBackend::new(4, 2);
        paint(&mut renderer, &["ab", "cd"]);
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        backend.take_calls();

        paint(&mut renderer, &["ab", "cd"]);
        let stats = renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert!(stats.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_single_cell_change_is_one_run() {
        let mut renderer = DiffRenderer::new(4, 2);
        let mut backend = TestBackend::new(4, 2);
        paint(&mut renderer, &["ab", "cd"]);
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        backend.take_calls();

        paint(&mut renderer, &["ab", "cx"]);
        let stats = renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert_eq!(stats.cells, 1);
        assert_eq!(backend.runs(), vec![(1, 1, "x")]);
    }

    #[test]
    fn test_style_break_splits_runs() {
        let mut renderer = DiffRenderer::new(3, 1);
        let mut backend = TestBackend::new(3, 1);
        {
            let mut canvas = Canvas::new(renderer.buffer_mut());
            canvas.fill_text(0, 0, "ab", Rgba::WHITE, Rgba::TERMINAL_DEFAULT, Attr::NONE, 0);
            canvas.fill_text(2, 0, "c", Rgba::RED, Rgba::TERMINAL_DEFAULT, Attr::NONE, 0);
            canvas.finish();
        }
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert_eq!(backend.runs(), vec![(0, 0, "ab"), (2, 0, "c")]);
    }

    #[test]
    fn test_cursor_sent_only_on_change() {
        let mut renderer = DiffRenderer::new(2, 1);
        let mut backend = TestBackend::new(2, 1);
        let at = CursorPlacement::At { x: 1, y: 0 };
        renderer.flush(&mut backend, at).unwrap();
        assert!(backend.calls().contains(&BackendCall::Cursor(at)));
        backend.take_calls();

        renderer.flush(&mut backend, at).unwrap();
        assert!(backend.calls().is_empty());
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert_eq!(
            backend.take_calls(),
            vec![BackendCall::Cursor(CursorPlacement::Hidden), BackendCall::Flush]
        );
    }

    #[test]
    fn test_invalidate_redraws_everything() {
        let mut renderer = DiffRenderer::new(2, 1);
        let mut backend = TestBackend::new(2, 1);
        paint(&mut renderer, &["hi"]);
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        backend.take_calls();

        renderer.invalidate();
        paint(&mut renderer, &["hi"]);
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert_eq!(backend.runs(), vec![(0, 0, "hi")]);
    }

    #[test]
    fn test_wide_char_run_skips_continuation() {
        let mut renderer = DiffRenderer::new(3, 1);
        let mut backend = TestBackend::new(3, 1);
        paint(&mut renderer, &["日a"]);
        renderer.flush(&mut backend, CursorPlacement::Hidden).unwrap();
        assert_eq!(backend.runs(), vec![(0, 0, "日a")]);
    }
}
