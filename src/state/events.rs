//! Event model.
//!
//! Events are produced by the backend (or synthesized by the document),
//! consumed by one dispatch pass, and discarded.

use crate::engine::{NodeId, Value};

// =============================================================================
// TYPES
// =============================================================================

/// Event kind tag. Each kind has one handler slot on every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    MouseDown,
    MouseUp,
    KeyPress,
    Scroll,
    Focus,
    Blur,
    Change,
    Close,
    Resize,
    Exit,
}

impl EventKind {
    pub const COUNT: usize = 11;

    pub const ALL: [EventKind; Self::COUNT] = [
        Self::Click,
        Self::MouseDown,
        Self::MouseUp,
        Self::KeyPress,
        Self::Scroll,
        Self::Focus,
        Self::Blur,
        Self::Change,
        Self::Close,
        Self::Resize,
        Self::Exit,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether dispatch continues to the target's ancestors.
    pub const fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur | Self::Close)
    }
}

bitflags::bitflags! {
    /// Mouse buttons held during a mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

/// Decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Ctrl(char),
    Alt(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    None,
    Key(KeyCode),
    Mouse {
        buttons: MouseButtons,
        x: u16,
        y: u16,
    },
    Scroll {
        delta: i32,
        x: u16,
        y: u16,
    },
    Resize {
        width: u16,
        height: u16,
    },
    Change(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Node the event is aimed at. Resolved during dispatch when unset.
    pub target: Option<NodeId>,
    pub payload: Payload,
    stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind, payload: Payload) -> Self {
        Self {
            kind,
            target: None,
            payload,
            stopped: false,
        }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(EventKind::KeyPress, Payload::Key(code))
    }

    pub fn click(buttons: MouseButtons, x: u16, y: u16) -> Self {
        Self::new(EventKind::Click, Payload::Mouse { buttons, x, y })
    }

    pub fn mouse_down(buttons: MouseButtons, x: u16, y: u16) -> Self {
        Self::new(EventKind::MouseDown, Payload::Mouse { buttons, x, y })
    }

    pub fn mouse_up(buttons: MouseButtons, x: u16, y: u16) -> Self {
        Self::new(EventKind::MouseUp, Payload::Mouse { buttons, x, y })
    }

    pub fn scroll(delta: i32, x: u16, y: u16) -> Self {
        Self::new(EventKind::Scroll, Payload::Scroll { delta, x, y })
    }

    pub fn resize(width: u16, height: u16) -> Self {
        Self::new(EventKind::Resize, Payload::Resize { width, height })
    }

    pub fn change(value: impl Into<Value>) -> Self {
        Self::new(EventKind::Change, Payload::Change(value.into()))
    }

    pub fn exit() -> Self {
        Self::new(EventKind::Exit, Payload::None)
    }

    pub(crate) fn for_node(kind: EventKind, target: NodeId) -> Self {
        let mut event = Self::new(kind, Payload::None);
        event.target = Some(target);
        event
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Stop dispatch after the current handler.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn keycode(&self) -> Option<KeyCode> {
        match self.payload {
            Payload::Key(code) => Some(code),
            _ => None,
        }
    }

    /// Cell coordinates for mouse and scroll events.
    pub fn position(&self) -> Option<(u16, u16)> {
        match self.payload {
            Payload::Mouse { x, y, .. } | Payload::Scroll { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Change(v) => Some(v),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
