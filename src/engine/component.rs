//! Components: render functions with local state.

use super::element::Child;
use super::node::NodeId;
use super::props::Props;
use super::tree::Tree;
use super::value::{State, Value};

/// A stateful render function.
///
/// A component instance is kept for as long as reconciliation reuses its
/// node; everything it renders from should come through the
/// [`RenderContext`].
pub trait Component {
    /// Tag name used for selector matching and reconciliation.
    fn name(&self) -> &str;

    fn render(&self, cx: &RenderContext<'_>) -> Child;

    /// State installed when the node is first mounted.
    fn initial_state(&self, _props: &Props) -> State {
        State::new()
    }

    /// Called once, after the first render of a newly mounted node.
    fn mounted(&self, _cx: &mut StateContext<'_>) {}
}

/// Inputs of one render call.
pub struct RenderContext<'a> {
    pub id: NodeId,
    pub props: &'a Props,
    pub state: &'a State,
    /// Children declared on the component's element.
    pub children: &'a [Child],
}

impl RenderContext<'_> {
    /// Declared children, cloned for embedding into the render output.
    pub fn children(&self) -> Child {
        Child::List(self.children.to_vec())
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }
}

/// Mutable access to one node's state outside of event dispatch.
pub struct StateContext<'a> {
    pub(crate) id: NodeId,
    pub(crate) tree: &'a mut Tree,
}

impl StateContext<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn state(&self) -> Option<&State> {
        self.tree.get(self.id).map(|n| n.state())
    }

    pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.tree.set_state(self.id, key, value);
    }
}
