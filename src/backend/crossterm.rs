//! Crossterm-backed terminal.
//!
//! [`TerminalGuard`] records the terminal modes (raw mode, alternate screen,
//! mouse capture) entered on the backend's writer. The backend leaves them
//! on that same writer when restored or dropped, so a panic unwinding
//! through the document loop still leaves a usable shell.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self as ct, DisableMouseCapture, EnableMouseCapture, KeyEventKind, KeyModifiers,
    MouseButton as CtButton, MouseEventKind,
};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use super::{Backend, CellStyle, CursorPlacement};
use crate::pipeline::DocumentConfig;
use crate::state::{Event, KeyCode, MouseButtons};
use crate::types::{Attr, Rgba};

// =============================================================================
// TERMINAL GUARD
// =============================================================================

/// Terminal modes entered on construction and left on [`restore`](Self::restore).
#[derive(Debug, Default)]
pub struct TerminalGuard {
    raw: bool,
    alternate_screen: bool,
    mouse_capture: bool,
}

impl TerminalGuard {
    /// Enter the configured modes on `out`. Whatever was entered before a
    /// failure is left again before the error is returned.
    pub fn enter<W: Write>(out: &mut W, config: &DocumentConfig) -> io::Result<Self> {
        let mut guard = Self::default();
        if let Err(err) = guard.enter_modes(out, config) {
            if let Err(restore_err) = guard.restore(out) {
                tracing::warn!(%restore_err, "failed to restore terminal");
            }
            return Err(err);
        }
        Ok(guard)
    }

    fn enter_modes<W: Write>(&mut self, out: &mut W, config: &DocumentConfig) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        if config.alternate_screen {
            execute!(out, EnterAlternateScreen, Clear(ClearType::All))?;
            self.alternate_screen = true;
        }
        if config.mouse_capture {
            execute!(out, EnableMouseCapture)?;
            self.mouse_capture = true;
        }
        execute!(out, Hide)
    }

    /// Leave every mode this guard entered, writing to `out`. Safe to call
    /// twice.
    pub fn restore<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.mouse_capture {
            execute!(out, DisableMouseCapture)?;
            self.mouse_capture = false;
        }
        if self.alternate_screen {
            execute!(out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
            self.alternate_screen = false;
        } else {
            execute!(out, SetAttribute(Attribute::Reset), Show)?;
        }
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }
}

// =============================================================================
// BACKEND
// =============================================================================

pub struct CrosstermBackend<W: Write> {
    out: W,
    guard: TerminalGuard,
    mouse: MouseTracker,
}

impl CrosstermBackend<io::Stdout> {
    pub fn stdout(config: &DocumentConfig) -> io::Result<Self> {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> CrosstermBackend<W> {
    pub fn new(mut out: W, config: &DocumentConfig) -> io::Result<Self> {
        let guard = TerminalGuard::enter(&mut out, config)?;
        Ok(Self {
            out,
            guard,
            mouse: MouseTracker::default(),
        })
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn write_run(&mut self, x: u16, y: u16, text: &str, style: CellStyle) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(x, y),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg)),
        )?;
        for attr in to_attributes(style.attrs) {
            queue!(self.out, SetAttribute(attr))?;
        }
        queue!(self.out, Print(text))
    }

    fn set_cursor(&mut self, cursor: CursorPlacement) -> io::Result<()> {
        match cursor {
            CursorPlacement::At { x, y } => queue!(self.out, MoveTo(x, y), Show),
            CursorPlacement::Hidden => queue!(self.out, Hide),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn read_events(&mut self) -> io::Result<Vec<Event>> {
        let mut events = self.mouse.convert(ct::read()?);
        while ct::poll(Duration::ZERO)? {
            events.extend(self.mouse.convert(ct::read()?));
        }
        Ok(events)
    }

    fn restore(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.guard.restore(&mut self.out)
    }
}

impl<W: Write> Drop for CrosstermBackend<W> {
    fn drop(&mut self) {
        if let Err(err) = self.guard.restore(&mut self.out) {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

fn to_color(c: Rgba) -> Color {
    if c.is_terminal_default() {
        Color::Reset
    } else if c.is_ansi() {
        Color::AnsiValue(c.ansi_index())
    } else {
        Color::Rgb {
            r: c.r.clamp(0, 255) as u8,
            g: c.g.clamp(0, 255) as u8,
            b: c.b.clamp(0, 255) as u8,
        }
    }
}

fn to_attributes(attrs: Attr) -> impl Iterator<Item = Attribute> {
    const TABLE: [(Attr, Attribute); 8] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    TABLE
        .into_iter()
        .filter(move |(flag, _)| attrs.contains(*flag))
        .map(|(_, attr)| attr)
}

fn to_keycode(key: ct::KeyEvent) -> Option<KeyCode> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    Some(match key.code {
        ct::KeyCode::Char(c) if ctrl => KeyCode::Ctrl(c.to_ascii_lowercase()),
        ct::KeyCode::Char(c) if alt => KeyCode::Alt(c),
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Insert => KeyCode::Insert,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    })
}

fn to_buttons(btn: CtButton) -> MouseButtons {
    match btn {
        CtButton::Left => MouseButtons::LEFT,
        CtButton::Right => MouseButtons::RIGHT,
        CtButton::Middle => MouseButtons::MIDDLE,
    }
}

/// Turns crossterm events into document events, synthesizing a click
/// when a button goes down and up on the same cell.
#[derive(Debug, Default)]
struct MouseTracker {
    pressed: Option<(MouseButtons, u16, u16)>,
}

impl MouseTracker {
    fn convert(&mut self, event: ct::Event) -> Vec<Event> {
        match event {
            ct::Event::Key(key) if key.kind != KeyEventKind::Release => {
                to_keycode(key).map(Event::key).into_iter().collect()
            }
            ct::Event::Mouse(m) => {
                let (x, y) = (m.column, m.row);
                match m.kind {
                    MouseEventKind::Down(btn) => {
                        let buttons = to_buttons(btn);
                        self.pressed = Some((buttons, x, y));
                        vec![Event::mouse_down(buttons, x, y)]
                    }
                    MouseEventKind::Up(btn) => {
                        let buttons = to_buttons(btn);
                        let mut out = vec![Event::mouse_up(buttons, x, y)];
                        if self.pressed.take() == Some((buttons, x, y)) {
                            out.push(Event::click(buttons, x, y));
                        }
                        out
                    }
                    MouseEventKind::ScrollUp => vec![Event::scroll(-1, x, y)],
                    MouseEventKind::ScrollDown => vec![Event::scroll(1, x, y)],
                    MouseEventKind::Drag(_) => {
                        self.pressed = None;
                        Vec::new()
                    }
                    _ => Vec::new(),
                }
            }
            ct::Event::Resize(w, h) => vec![Event::resize(w, h)],
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EventKind;

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> ct::Event {
        ct::Event::Mouse(ct::MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_click_synthesized_on_same_cell() {
        let mut tracker = MouseTracker::default();
        assert_eq!(
            tracker.convert(mouse(MouseEventKind::Down(CtButton::Left), 3, 4))[0].kind,
            EventKind::MouseDown
        );
        let up = tracker.convert(mouse(MouseEventKind::Up(CtButton::Left), 3, 4));
        let kinds: Vec<_> = up.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::MouseUp, EventKind::Click]);
        assert_eq!(up[1].position(), Some((3, 4)));
    }

    #[test]
    fn test_no_click_when_released_elsewhere() {
        let mut tracker = MouseTracker::default();
        tracker.convert(mouse(MouseEventKind::Down(CtButton::Left), 3, 4));
        let up = tracker.convert(mouse(MouseEventKind::Up(CtButton::Left), 5, 4));
        assert_eq!(up.len(), 1);
    }

    #[test]
    fn test_key_conversion() {
        let ctrl_c = ct::KeyEvent::new(ct::KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(to_keycode(ctrl_c), Some(KeyCode::Ctrl('c')));
        let shift_tab = ct::KeyEvent::new(ct::KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(to_keycode(shift_tab), Some(KeyCode::BackTab));
        let plain = ct::KeyEvent::new(ct::KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(to_keycode(plain), Some(KeyCode::Char('x')));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut tracker = MouseTracker::default();
        let mut key = ct::KeyEvent::new(ct::KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(tracker.convert(ct::Event::Key(key)).is_empty());
    }

    #[test]
    fn test_colors() {
        assert_eq!(to_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
        let attrs: Vec<_> = to_attributes(Attr::BOLD | Attr::UNDERLINE).collect();
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::Underlined]);
    }

    #[test]
    fn test_restore_writes_to_backend_writer() {
        let mut guard = TerminalGuard {
            raw: false,
            alternate_screen: true,
            mouse_capture: true,
        };
        let mut out = Vec::new();
        guard.restore(&mut out).unwrap();
        let written = String::from_utf8_lossy(&out).into_owned();
        assert!(written.contains("\x1b[?1049l"));
        assert!(!guard.alternate_screen && !guard.mouse_capture);

        out.clear();
        guard.restore(&mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("\x1b[?1049l"));
    }
}
