//! Materialized nodes.

use std::fmt;
use std::rc::Rc;

use super::component::Component;
use super::element::{Child, TextContent};
use super::props::Props;
use super::value::State;
use crate::layout::{LayoutBox, ScrollState};
use crate::types::Rect;

/// Generational index of a node in its [`Tree`](super::Tree).
///
/// A recycled slot gets a new generation, so an id held past its node's
/// removal never resolves to a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Node variants, selected by pattern matching at paint and dispatch time.
#[derive(Clone)]
pub enum NodeKind {
    /// Paints background and border, lays out its children.
    Container,
    /// Paints its text.
    Text(TextContent),
    /// Transparent: paints nothing itself, only its rendered children.
    Component(Rc<dyn Component>),
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("Container"),
            Self::Text(t) => f.debug_tuple("Text").field(&t.text).finish(),
            Self::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
        }
    }
}

impl NodeKind {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Whether this variant draws its own background and border.
    pub fn paints_box(&self) -> bool {
        matches!(self, Self::Container)
    }
}

#[derive(Debug)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) kind: NodeKind,
    pub(crate) props: Props,
    pub(crate) children: Vec<NodeId>,
    /// Children declared on a component's element, passed to render.
    pub(crate) slot: Vec<Child>,
    pub(crate) state: State,
    pub(crate) parent: Option<NodeId>,
    pub(crate) serial: u64,
    pub(crate) dirty: bool,
    pub(crate) mounted: bool,
    pub(crate) layout: LayoutBox,
    pub(crate) scroll: ScrollState,
}

impl Node {
    pub(crate) fn new(tag: String, kind: NodeKind, props: Props) -> Self {
        Self {
            tag,
            kind,
            props,
            children: Vec::new(),
            slot: Vec::new(),
            state: State::new(),
            parent: None,
            serial: 0,
            dirty: true,
            mounted: false,
            layout: LayoutBox::default(),
            scroll: ScrollState::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Creation order within the owning tree.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Geometry from the most recent layout pass.
    pub fn layout(&self) -> Rect {
        self.layout.rect
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// A node takes focus iff it declares at least one handler.
    pub fn is_focusable(&self) -> bool {
        !self.props.handlers.is_empty()
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(t) => Some(&t.text),
            _ => None,
        }
    }
}
