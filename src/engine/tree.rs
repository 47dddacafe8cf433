//! Node arena.
//!
//! The tree exclusively owns every node. Parent links are plain ids used
//! for upward walks (inheritance, bubbling, focus) and never for lifetime.

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId, NodeKind};
use super::value::Value;

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: Option<NodeId>,
    next_serial: u64,
    removed: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert(&mut self, mut node: Node) -> NodeId {
        node.serial = self.next_serial;
        self.next_serial += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Drop a node and its whole subtree. The parent's child list is not touched.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index as usize)
                .filter(|s| s.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.removed.push(current);
                stack.extend(node.children);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Ids dropped since the last call.
    pub(crate) fn take_removed(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.removed)
    }

    /// Mark a node dirty and propagate to every ancestor.
    pub fn mark_dirty(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.get_mut(cid) else {
                break;
            };
            node.dirty = true;
            current = node.parent;
        }
    }

    /// Update local state. The node and its ancestors become dirty; no
    /// render happens until the next materialization.
    pub fn set_state(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<Value>) {
        let Some(node) = self.get_mut(id) else {
            tracing::debug!(%id, "state update on dropped node ignored");
            return;
        };
        node.state.set(key, value);
        self.mark_dirty(id);
    }

    pub fn any_dirty(&self) -> bool {
        self.slots.iter().filter_map(|s| s.node.as_ref()).any(|n| n.dirty)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Pre-order ids of the subtree rooted at `from`.
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// `id` followed by each of its ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Indented outline of the tree, for debugging.
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.print_node(root, 0, &mut out);
        }
        out
    }

    fn print_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let r = node.layout.rect;
        let _ = write!(out, "{:indent$}<{}", "", node.tag, indent = depth * 2);
        if let Some(nid) = &node.props.id {
            let _ = write!(out, " #{nid}");
        }
        if let Some(class) = &node.props.class_name {
            let _ = write!(out, " .{}", class.split_whitespace().collect::<Vec<_>>().join("."));
        }
        if let NodeKind::Text(t) = &node.kind {
            let _ = write!(out, " {:?}", t.text);
        }
        let _ = writeln!(out, "> [{}, {}, {}x{}]", r.x, r.y, r.width, r.height);
        for child in &node.children {
            self.print_node(*child, depth + 1, out);
        }
    }
}

pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(|n| n.parent);
        Some(current)
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {id} is not in the tree"),
        }
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("node {id} is not in the tree"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::props::Props;

    fn container(tree: &mut Tree, parent: Option<NodeId>) -> NodeId {
        let mut node = Node::new("div".into(), NodeKind::Container, Props::default());
        node.parent = parent;
        node.dirty = false;
        let id = tree.insert(node);
        if let Some(p) = parent {
            tree[p].children.push(id);
        }
        id
    }

    #[test]
    fn test_generational_ids() {
        let mut tree = Tree::new();
        let a = container(&mut tree, None);
        tree.remove_subtree(a);
        assert!(!tree.contains(a));
        let b = container(&mut tree, None);
        assert_eq!(a.index, b.index);
        assert_ne!(a, b);
        assert!(tree.get(a).is_none());
        assert!(tree.get(b).is_some());
    }

    #[test]
    fn test_serials_are_monotonic() {
        let mut tree = Tree::new();
        let a = container(&mut tree, None);
        let b = container(&mut tree, Some(a));
        assert!(tree[b].serial() > tree[a].serial());
    }

    #[test]
    fn test_remove_subtree_records_all() {
        let mut tree = Tree::new();
        let root = container(&mut tree, None);
        let child = container(&mut tree, Some(root));
        let grandchild = container(&mut tree, Some(child));
        tree.remove_subtree(child);
        let mut removed = tree.take_removed();
        removed.sort();
        assert_eq!(removed, vec![child, grandchild]);
        assert!(tree.contains(root));
        assert!(tree.take_removed().is_empty());
    }

    #[test]
    fn test_set_state_bubbles_dirty() {
        let mut tree = Tree::new();
        let root = container(&mut tree, None);
        let mid = container(&mut tree, Some(root));
        let leaf = container(&mut tree, Some(mid));
        let sibling = container(&mut tree, Some(root));

        tree.set_state(leaf, "on", true);
        assert!(tree[leaf].is_dirty());
        assert!(tree[mid].is_dirty());
        assert!(tree[root].is_dirty());
        assert!(!tree[sibling].is_dirty());
        assert!(tree[leaf].state().bool("on"));
    }

    #[test]
    fn test_preorder_and_ancestors() {
        let mut tree = Tree::new();
        let root = container(&mut tree, None);
        let a = container(&mut tree, Some(root));
        let a1 = container(&mut tree, Some(a));
        let b = container(&mut tree, Some(root));
        assert_eq!(tree.preorder(root), vec![root, a, a1, b]);
        assert_eq!(tree.ancestors(a1).collect::<Vec<_>>(), vec![a1, a, root]);
        assert!(tree.is_ancestor_or_self(root, a1));
        assert!(!tree.is_ancestor_or_self(b, a1));
    }
}
