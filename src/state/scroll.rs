//! Scroll State Module
//!
//! Scroll offsets are user state kept on the node; content and viewport
//! extents are written by the layout pass. Offsets are clamped to
//! `[0, content - viewport]` on every change and after every layout.

use crate::engine::{NodeId, Tree};
use crate::layout::ScrollState;

/// Lines per mouse wheel notch.
pub const WHEEL_SCROLL: i32 = 3;

impl ScrollState {
    /// Maximum offsets (x, y).
    pub fn max_scroll(&self) -> (i32, i32) {
        (
            (self.content_width - self.viewport_width).max(0),
            (self.content_height - self.viewport_height).max(0),
        )
    }

    pub(crate) fn clamp(&mut self) {
        let (max_x, max_y) = self.max_scroll();
        self.offset_x = self.offset_x.clamp(0, max_x);
        self.offset_y = self.offset_y.clamp(0, max_y);
    }
}

/// Scroll a node by a delta. Returns true if the offset changed.
pub fn scroll_by(tree: &mut Tree, id: NodeId, dx: i32, dy: i32) -> bool {
    let Some(node) = tree.get_mut(id) else {
        return false;
    };
    if !node.scroll.scrollable {
        return false;
    }
    let before = (node.scroll.offset_x, node.scroll.offset_y);
    node.scroll.offset_x = node.scroll.offset_x.saturating_add(dx);
    node.scroll.offset_y = node.scroll.offset_y.saturating_add(dy);
    node.scroll.clamp();
    before != (node.scroll.offset_x, node.scroll.offset_y)
}

/// Set an absolute offset, clamped.
pub fn scroll_to(tree: &mut Tree, id: NodeId, x: i32, y: i32) -> bool {
    let Some(node) = tree.get(id) else {
        return false;
    };
    let (cx, cy) = (node.scroll.offset_x, node.scroll.offset_y);
    scroll_by(tree, id, x - cx, y - cy)
}

/// Nearest scrollable node at or above `id`.
pub fn scrollable_ancestor(tree: &Tree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id).find(|a| tree[*a].scroll.scrollable)
}

/// Scroll the nearest scrollable ancestor that can still move in the
/// wheel direction, chaining outward when an inner container is at its limit.
pub fn scroll_chain(tree: &mut Tree, id: NodeId, dy: i32) -> Option<NodeId> {
    let chain: Vec<NodeId> = tree
        .ancestors(id)
        .filter(|a| tree[*a].scroll.scrollable)
        .collect();
    chain.into_iter().find(|a| scroll_by(tree, *a, 0, dy))
}

// =============================================================================
// Tests
// =============================================================================
