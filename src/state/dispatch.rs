//! Dispatch Module - handler invocation and bubbling
//!
//! One dispatch pass walks from the event target up through its
//! ancestors, calling each node's handler for the event kind. A handler
//! can stop propagation; non-bubbling kinds only reach the target.
//!
//! Handlers never re-enter the pipeline. They mutate state through the
//! [`EventContext`] and leave any follow-up work (focus moves, change
//! events, exit) queued in [`Effects`] for the document to apply.
//!
//! # Example
//!
//! ```ignore
//! button().on_click(|_event, cx| {
//!     let n = cx.state().int("n");
//!     cx.set_state("n", n + 1);
//!     Ok(())
//! })
//! ```

use crate::engine::{NodeId, State, Tree, Value};
use crate::error::{Error, Result};

use super::events::Event;
use super::focus::FocusState;

/// Work requested by handlers, applied by the document after dispatch.
#[derive(Debug, Default)]
pub struct Effects {
    pub exit: bool,
    /// Change events to dispatch after the current pass.
    pub changes: Vec<Event>,
    /// `Some(target)` requests a focus move; `Some(None)` clears focus.
    pub focus: Option<Option<NodeId>>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a handler can see and change while it runs.
pub struct EventContext<'a> {
    tree: &'a mut Tree,
    focus: &'a mut FocusState,
    effects: &'a mut Effects,
    current: NodeId,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        tree: &'a mut Tree,
        focus: &'a mut FocusState,
        effects: &'a mut Effects,
        current: NodeId,
    ) -> Self {
        Self {
            tree,
            focus,
            effects,
            current,
        }
    }

    /// Node whose handler is running.
    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn tree(&self) -> &Tree {
        self.tree
    }

    /// Local state of the current node.
    pub fn state(&self) -> State {
        self.tree
            .get(self.current)
            .map(|n| n.state().clone())
            .unwrap_or_default()
    }

    /// Update the current node's state.
    pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.tree.set_state(self.current, key, value);
    }

    /// Update another node's state, typically the component owning this host node.
    pub fn set_state_of(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<Value>) {
        self.tree.set_state(id, key, value);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused
    }

    /// Move focus after dispatch. `None` clears it.
    pub fn request_focus(&mut self, id: Option<NodeId>) {
        self.effects.focus = Some(id);
    }

    /// Make `id` the open element.
    pub fn open(&mut self, id: NodeId) {
        tracing::debug!(%id, "element opened");
        self.focus.open = Some(id);
    }

    /// Clear the open element.
    pub fn close(&mut self) {
        if let Some(id) = self.focus.open.take() {
            tracing::debug!(%id, "element closed");
        }
    }

    pub fn open_element(&self) -> Option<NodeId> {
        self.focus.open
    }

    /// Raise a Change event at `target`, dispatched after this pass.
    pub fn emit_change(&mut self, target: NodeId, value: impl Into<Value>) {
        self.effects
            .changes
            .push(Event::change(value).with_target(target));
    }

    /// Stop the run loop after this tick.
    pub fn exit(&mut self) {
        self.effects.exit = true;
    }
}

/// Nodes an event visits, target first.
pub fn propagation_path(tree: &Tree, event: &Event) -> Vec<NodeId> {
    let Some(target) = event.target else {
        return Vec::new();
    };
    if event.kind.bubbles() {
        tree.ancestors(target).collect()
    } else {
        tree.contains(target).then_some(target).into_iter().collect()
    }
}

/// Run one dispatch pass. Returns the number of handlers invoked.
///
/// A failing handler aborts the pass and its error is returned.
pub fn dispatch(
    tree: &mut Tree,
    focus: &mut FocusState,
    effects: &mut Effects,
    event: &mut Event,
) -> Result<usize> {
    let kind = event.kind;
    let mut invoked = 0;

    for id in propagation_path(tree, event) {
        let Some(handler) = tree
            .get(id)
            .and_then(|n| n.props().handlers.get(kind))
            .cloned()
        else {
            continue;
        };

        tracing::trace!(?kind, node = %id, "invoking handler");
        let mut cx = EventContext::new(tree, focus, effects, id);
        handler(event, &mut cx).map_err(|source| Error::Handler { kind, source })?;
        invoked += 1;

        if event.is_stopped() {
            tracing::trace!(?kind, node = %id, "propagation stopped");
            break;
        }
    }
    Ok(invoked)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::engine::div;
    use crate::state::{EventKind, MouseButtons};

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn logging(log: &Log, name: &'static str, stop: bool) -> impl Fn(&mut Event, &mut EventContext<'_>) -> crate::error::HandlerResult + 'static {
        let log = log.clone();
        move |event, _| {
            log.borrow_mut().push(name);
            if stop {
                event.stop_propagation();
            }
            Ok(())
        }
    }

    fn nested(log: &Log, stop_inner: bool) -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.mount_root(
            div()
                .on_click(logging(log, "outer", false))
                .on(EventKind::Focus, logging(log, "outer-focus", false))
                .child(
                    div()
                        .on_click(logging(log, "inner", stop_inner))
                        .on(EventKind::Focus, logging(log, "inner-focus", false)),
                ),
        );
        tree.materialize(root);
        let inner = tree[root].children()[0];
        (tree, root, inner)
    }

    #[test]
    fn test_click_bubbles_to_ancestors() {
        let log = Log::default();
        let (mut tree, _, inner) = nested(&log, false);
        let mut event = Event::click(MouseButtons::LEFT, 0, 0).with_target(inner);

        let n = dispatch(&mut tree, &mut FocusState::default(), &mut Effects::new(), &mut event).unwrap();

        assert_eq!(n, 2);
        assert_eq!(*log.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_stop_propagation_halts_bubbling() {
        let log = Log::default();
        let (mut tree, _, inner) = nested(&log, true);
        let mut event = Event::click(MouseButtons::LEFT, 0, 0).with_target(inner);

        dispatch(&mut tree, &mut FocusState::default(), &mut Effects::new(), &mut event).unwrap();

        assert_eq!(*log.borrow(), vec!["inner"]);
        assert!(event.is_stopped());
    }

    #[test]
    fn test_focus_does_not_bubble() {
        let log = Log::default();
        let (mut tree, _, inner) = nested(&log, false);
        let mut event = Event::for_node(EventKind::Focus, inner);

        dispatch(&mut tree, &mut FocusState::default(), &mut Effects::new(), &mut event).unwrap();

        assert_eq!(*log.borrow(), vec!["inner-focus"]);
    }

    #[test]
    fn test_handler_error_aborts_pass() {
        let mut tree = Tree::new();
        let root = tree.mount_root(
            div()
                .on_click(|_, cx| {
                    cx.exit();
                    Ok(())
                })
                .child(div().on_click(|_, _| Err("boom".into()))),
        );
        tree.materialize(root);
        let inner = tree[root].children()[0];
        let mut effects = Effects::new();
        let mut event = Event::click(MouseButtons::LEFT, 0, 0).with_target(inner);

        let err = dispatch(&mut tree, &mut FocusState::default(), &mut effects, &mut event).unwrap_err();

        assert!(matches!(err, Error::Handler { kind: EventKind::Click, .. }));
        assert_eq!(err.to_string(), "Click handler failed: boom");
        assert!(!effects.exit);
    }

    #[test]
    fn test_context_state_and_effects() {
        let mut tree = Tree::new();
        let root = tree.mount_root(div().on_keypress(|_, cx| {
            let n = cx.state().int("n");
            cx.set_state("n", n + 1);
            let me = cx.current();
            cx.open(me);
            cx.emit_change(me, "typed");
            cx.request_focus(None);
            Ok(())
        }));
        tree.materialize(root);
        let mut focus = FocusState::default();
        let mut effects = Effects::new();
        let mut event = Event::key(crate::state::KeyCode::Char('a')).with_target(root);

        dispatch(&mut tree, &mut focus, &mut effects, &mut event).unwrap();

        assert_eq!(tree[root].state().int("n"), 1);
        assert!(tree[root].is_dirty());
        assert_eq!(focus.open, Some(root));
        assert_eq!(effects.changes.len(), 1);
        assert_eq!(effects.changes[0].target, Some(root));
        assert_eq!(effects.focus, Some(None));
    }

    #[test]
    fn test_untargeted_event_reaches_nobody() {
        let log = Log::default();
        let (mut tree, _, _) = nested(&log, false);
        let mut event = Event::click(MouseButtons::LEFT, 0, 0);
        let n = dispatch(&mut tree, &mut FocusState::default(), &mut Effects::new(), &mut event).unwrap();
        assert_eq!(n, 0);
    }
}
