//! Node properties.
//!
//! Props are a typed record: the fields every node understands, one
//! handler slot per event kind, and an open map for widget-specific data.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::value::Value;
use crate::error::HandlerResult;
use crate::state::{Event, EventContext, EventKind};
use crate::style::StyleMap;

// =============================================================================
// Handlers
// =============================================================================

/// An event handler.
///
/// Handlers read and update state through the [`EventContext`]; reading
/// state at call time rather than capturing it keeps a handler valid
/// across re-renders, since reconciliation never replaces a bound handler.
pub type Handler = Rc<dyn Fn(&mut Event, &mut EventContext<'_>) -> HandlerResult>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Event, &mut EventContext<'_>) -> HandlerResult + 'static,
{
    Rc::new(f)
}

/// Handler table indexed by event kind.
#[derive(Clone, Default)]
pub struct Handlers {
    slots: [Option<Handler>; EventKind::COUNT],
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: EventKind, handler: Handler) {
        self.slots[kind.index()] = Some(handler);
    }

    pub fn get(&self, kind: EventKind) -> Option<&Handler> {
        self.slots[kind.index()].as_ref()
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Kinds with a bound handler, in declaration order of [`EventKind`].
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        EventKind::ALL.into_iter().filter(|k| self.contains(*k))
    }

    /// Merge a freshly rendered table into this one.
    ///
    /// Slots absent from `next` are cleared and slots new in `next` are
    /// adopted; a slot bound on both sides keeps the original handler.
    fn merge(&mut self, next: Handlers) {
        for (slot, incoming) in self.slots.iter_mut().zip(next.slots) {
            match (slot.is_some(), incoming) {
                (_, None) => *slot = None,
                (false, Some(h)) => *slot = Some(h),
                (true, Some(_)) => {}
            }
        }
    }

    fn same_kinds(&self, other: &Handlers) -> bool {
        self.slots
            .iter()
            .zip(other.slots.iter())
            .all(|(a, b)| a.is_some() == b.is_some())
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

// =============================================================================
// Props
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Props {
    /// Inline style. Wins over every stylesheet rule.
    pub style: StyleMap,
    /// Space separated class list.
    pub class_name: Option<String>,
    pub id: Option<String>,
    /// Explicit reconciliation key.
    pub key: Option<String>,
    pub handlers: Handlers,
    /// Content-relative cursor offset shown while the node has focus.
    pub cursor: Option<(i32, i32)>,
    /// Widget-specific data.
    pub extra: BTreeMap<String, Value>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name.as_deref().unwrap_or("").split_whitespace()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Structural equality. Handlers compare by which slots are bound.
    pub fn same_as(&self, other: &Props) -> bool {
        self.style == other.style
            && self.class_name == other.class_name
            && self.id == other.id
            && self.key == other.key
            && self.cursor == other.cursor
            && self.extra == other.extra
            && self.handlers.same_kinds(&other.handlers)
    }

    /// Merge new props in place. Returns true if anything changed.
    pub(crate) fn merge(&mut self, next: Props) -> bool {
        let changed = !self.same_as(&next);
        let Props {
            style,
            class_name,
            id,
            key,
            handlers,
            cursor,
            extra,
        } = next;
        self.style = style;
        self.class_name = class_name;
        self.id = id;
        self.key = key;
        self.cursor = cursor;
        self.extra = extra;
        self.handlers.merge(handlers);
        changed
    }
}

// =============================================================================
// Tests
// =============================================================================
