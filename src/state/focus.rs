//! Focus Module - tab order and focus cycling
//!
//! Tracks the single focused node and the single open (popup-like) node of
//! a document.
//!
//! # Tab order
//!
//! Tab order is a pre-order walk of the materialized tree filtered to
//! focusable nodes (nodes that declare at least one handler). Cycling
//! passes through an explicit "no focus" state at both ends:
//!
//! ```text
//! next: none -> F1 -> F2 -> ... -> Fn -> none -> F1
//! prev: none -> Fn -> ... -> F2 -> F1 -> none -> Fn
//! ```
//!
//! # Example
//!
//! ```ignore
//! let order = focus::focus_order(&tree);
//! let next = focus::next_focus(&tree, state.focused);
//! ```

use crate::engine::{NodeId, Tree};

/// Focused and open element references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    pub focused: Option<NodeId>,
    pub open: Option<NodeId>,
}

impl FocusState {
    /// Forget references to nodes no longer in the tree.
    ///
    /// Returns true if anything was cleared.
    pub fn clear_dropped(&mut self, tree: &Tree) -> bool {
        let mut cleared = false;
        if self.focused.is_some_and(|id| !tree.contains(id)) {
            tracing::debug!("focused node dropped, clearing focus");
            self.focused = None;
            cleared = true;
        }
        if self.open.is_some_and(|id| !tree.contains(id)) {
            tracing::debug!("open node dropped, clearing open element");
            self.open = None;
            cleared = true;
        }
        cleared
    }

    /// Whether `id` is the focused node or an ancestor of it.
    pub fn focus_within(&self, tree: &Tree, id: NodeId) -> bool {
        self.focused
            .is_some_and(|focused| tree.is_ancestor_or_self(id, focused))
    }
}

// =============================================================================
// FOCUS ORDER
// =============================================================================

/// Focusable nodes in tab order.
pub fn focus_order(tree: &Tree) -> Vec<NodeId> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };
    tree.preorder(root)
        .into_iter()
        .filter(|id| tree[*id].is_focusable())
        .collect()
}

/// The node after `current` in tab order, or none after the last one.
pub fn next_focus(tree: &Tree, current: Option<NodeId>) -> Option<NodeId> {
    let order = focus_order(tree);
    match current.and_then(|c| order.iter().position(|id| *id == c)) {
        Some(i) => order.get(i + 1).copied(),
        None => order.first().copied(),
    }
}

/// The node before `current` in tab order, or none before the first one.
pub fn prev_focus(tree: &Tree, current: Option<NodeId>) -> Option<NodeId> {
    let order = focus_order(tree);
    match current.and_then(|c| order.iter().position(|id| *id == c)) {
        Some(0) => None,
        Some(i) => order.get(i - 1).copied(),
        None => order.last().copied(),
    }
}

/// The nearest focusable node at or above `id`.
pub fn focus_target(tree: &Tree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id).find(|a| tree[*a].is_focusable())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{div, span};

    fn tree_with_three_buttons() -> (Tree, Vec<NodeId>) {
        let mut tree = Tree::new();
        let root = tree.mount_root(
            div()
                .child(span().id("f1").on_click(|_, _| Ok(())).child("one"))
                .child(div().child(span().id("f2").on_click(|_, _| Ok(()))))
                .child("plain")
                .child(span().id("f3").on_keypress(|_, _| Ok(()))),
        );
        tree.materialize(root);
        let order = focus_order(&tree);
        (tree, order)
    }

    #[test]
    fn test_focus_order_is_preorder_of_focusable() {
        let (tree, order) = tree_with_three_buttons();
        let ids: Vec<_> = order
            .iter()
            .map(|id| tree[*id].props().id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["f1", "f2", "f3"]);
    }

    #[test]
    fn test_next_focus_wraps_through_none() {
        let (tree, order) = tree_with_three_buttons();
        let mut current = None;
        let mut visited = Vec::new();
        for _ in 0..5 {
            current = next_focus(&tree, current);
            visited.push(current);
        }
        assert_eq!(
            visited,
            vec![Some(order[0]), Some(order[1]), Some(order[2]), None, Some(order[0])]
        );
    }

    #[test]
    fn test_prev_focus_is_inverse() {
        let (tree, order) = tree_with_three_buttons();
        let mut current = None;
        let mut visited = Vec::new();
        for _ in 0..5 {
            current = prev_focus(&tree, current);
            visited.push(current);
        }
        assert_eq!(
            visited,
            vec![Some(order[2]), Some(order[1]), Some(order[0]), None, Some(order[2])]
        );
    }

    #[test]
    fn test_focus_target_walks_up() {
        let (tree, order) = tree_with_three_buttons();
        let label = tree[order[0]].children()[0];
        assert_eq!(focus_target(&tree, label), Some(order[0]));
        let root = tree.root().unwrap();
        assert_eq!(focus_target(&tree, root), None);
    }

    #[test]
    fn test_clear_dropped_references() {
        let (mut tree, order) = tree_with_three_buttons();
        let mut state = FocusState {
            focused: Some(order[1]),
            open: Some(order[2]),
        };
        assert!(state.focus_within(&tree, tree.root().unwrap()));
        tree.remove_subtree(order[1]);
        assert!(state.clear_dropped(&tree));
        assert_eq!(state.focused, None);
        assert_eq!(state.open, Some(order[2]));
    }
}
