//! Reconciliation of render output into the materialized tree.
//!
//! Children are compared pairwise by position. A pair is reused when the
//! tags match or both carry the same explicit key; anything else replaces
//! the old subtree. Reconciliation cannot fail.

use super::component::{Component, RenderContext, StateContext};
use super::element::{Element, ElementKind, children_same, normalize, normalize_all};
use super::node::{Node, NodeId, NodeKind};
use super::tree::Tree;

fn equivalent(node: &Node, element: &Element) -> bool {
    if node.tag == element.tag {
        return true;
    }
    matches!((&node.props.key, &element.props.key), (Some(a), Some(b)) if a == b)
}

impl Tree {
    /// Mount an element as the tree root, replacing any previous root.
    pub fn mount_root(&mut self, element: Element) -> NodeId {
        if let Some(old) = self.root() {
            self.remove_subtree(old);
        }
        let id = self.mount(None, element);
        self.set_root(Some(id));
        id
    }

    /// Adopt a new subtree. Every node starts dirty so the next
    /// materialization renders its components.
    pub(crate) fn mount(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let Element {
            tag,
            kind,
            props,
            children,
        } = element;

        let (kind, state, slot, declared) = match kind {
            ElementKind::Host => (NodeKind::Container, Default::default(), Vec::new(), children),
            ElementKind::Text(t) => (NodeKind::Text(t), Default::default(), Vec::new(), Vec::new()),
            ElementKind::Component(c) => {
                let state = c.initial_state(&props);
                (NodeKind::Component(c), state, children, Vec::new())
            }
        };

        let mut node = Node::new(tag, kind, props);
        node.parent = parent;
        node.state = state;
        node.slot = slot;
        let id = self.insert(node);

        let kids: Vec<NodeId> = normalize_all(declared)
            .into_iter()
            .map(|child| self.mount(Some(id), child))
            .collect();
        self[id].children = kids;
        id
    }

    /// Reconcile `parent`'s current children against a normalized list.
    ///
    /// Returns true if the child list changed structurally.
    pub fn reconcile_children(&mut self, parent: NodeId, next: Vec<Element>) -> bool {
        let old = std::mem::take(&mut self[parent].children);
        let mut structural = old.len() != next.len();
        let mut result = Vec::with_capacity(next.len());
        let mut next = next.into_iter();

        for old_id in old.iter().copied() {
            match next.next() {
                Some(element) if equivalent(&self[old_id], &element) => {
                    self.update(old_id, element);
                    result.push(old_id);
                }
                Some(element) => {
                    tracing::debug!(old = %self[old_id].tag, new = %element.tag, "replacing node");
                    self.remove_subtree(old_id);
                    result.push(self.mount(Some(parent), element));
                    structural = true;
                }
                None => self.remove_subtree(old_id),
            }
        }
        for element in next {
            result.push(self.mount(Some(parent), element));
        }

        self[parent].children = result;
        structural
    }

    /// Merge an element into a reused node.
    fn update(&mut self, id: NodeId, element: Element) {
        let Element {
            kind,
            props,
            children,
            ..
        } = element;

        let node = &mut self[id];
        let mut changed = node.props.merge(props);
        if let (NodeKind::Text(current), ElementKind::Text(incoming)) = (&mut node.kind, kind) {
            if *current != incoming {
                *current = incoming;
                changed = true;
            }
        }

        match node.kind {
            NodeKind::Component(_) => {
                if !children_same(&node.slot, &children) {
                    node.slot = children;
                    changed = true;
                }
                if changed {
                    node.dirty = true;
                }
            }
            NodeKind::Container => {
                self.reconcile_children(id, normalize_all(children));
            }
            NodeKind::Text(_) => {}
        }
    }

    /// Render every dirty component below `id` and reconcile the output.
    pub fn materialize(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else {
            return;
        };

        if node.dirty {
            node.dirty = false;
            if let NodeKind::Component(component) = &node.kind {
                let component = component.clone();
                self.render_component(id, component.as_ref());
            }
        }

        let children = self[id].children.clone();
        for child in children {
            self.materialize(child);
        }
    }

    fn render_component(&mut self, id: NodeId, component: &dyn Component) {
        let node = &self[id];
        let output = component.render(&RenderContext {
            id,
            props: &node.props,
            state: &node.state,
            children: &node.slot,
        });
        self.reconcile_children(id, normalize(output));

        // A state change made by the hook dirties the node again.
        if !self[id].mounted {
            self[id].mounted = true;
            component.mounted(&mut StateContext { id, tree: self });
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
