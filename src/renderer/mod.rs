//! Renderer Module - cell buffers and differential output
//!
//! - [`ScreenBuffer`] - a grid of styled, z-stamped cells
//! - [`Canvas`] - translate/clip stacks and drawing primitives over a buffer
//! - [`DiffRenderer`] - double buffering and minimal flushes to a backend
//!
//! # Example
//!
//! ```ignore
//! use retui::renderer::{Canvas, DiffRenderer};
//!
//! let mut renderer = DiffRenderer::new(80, 24);
//! let mut canvas = Canvas::new(renderer.buffer_mut());
//! canvas.fill_text(0, 0, "hello", fg, bg, Attr::BOLD, 0);
//! canvas.finish();
//! renderer.flush(&mut backend, CursorPlacement::Hidden)?;
//! ```

mod buffer;
mod canvas;
mod diff;

pub use buffer::{CONTINUATION, ScreenBuffer, ScreenCell};
pub use canvas::Canvas;
pub use diff::{DiffRenderer, FlushStats};
