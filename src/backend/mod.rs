//! Backend Module - the terminal seam
//!
//! The renderer never talks to a terminal directly. It hands styled runs
//! and cursor placements to a [`Backend`], and the document loop reads
//! input events back from it.
//!
//! - [`CrosstermBackend`] drives a real terminal through crossterm.
//! - [`TestBackend`] records output and replays scripted input, for tests.
//!
//! # Example
//!
//! ```ignore
//! use retui::backend::{Backend, CrosstermBackend};
//!
//! let mut backend = CrosstermBackend::stdout(&config)?;
//! let (w, h) = backend.size()?;
//! ```

mod crossterm;

use std::io;

use crate::state::Event;
use crate::types::{Attr, Rgba};

pub use self::crossterm::{CrosstermBackend, TerminalGuard};
pub use self::test::{BackendCall, TestBackend};

/// Colors and modifiers shared by every cell of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

/// Where the hardware cursor goes after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorPlacement {
    At { x: u16, y: u16 },
    #[default]
    Hidden,
}

/// A terminal-like output and input device.
pub trait Backend {
    /// Current size in cells (width, height).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Write `text` at (x, y) with one style. `text` never contains a newline.
    fn write_run(&mut self, x: u16, y: u16, text: &str, style: CellStyle) -> io::Result<()>;

    fn set_cursor(&mut self, cursor: CursorPlacement) -> io::Result<()>;

    /// Make everything written so far visible.
    fn flush(&mut self) -> io::Result<()>;

    /// Block until at least one event is available, then return all
    /// events read.
    fn read_events(&mut self) -> io::Result<Vec<Event>>;

    /// Give the terminal back to the shell.
    fn restore(&mut self) -> io::Result<()> {
        Ok(())
    }
}
