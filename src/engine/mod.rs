//! Component tree and reconciler.
//!
//! Render functions describe a tree of [`Element`]s. The engine keeps the
//! materialized [`Tree`] of [`Node`]s and merges each new description into
//! it, preserving node identity and local state wherever a node can be
//! reused:
//!
//! ```text
//! render() -> Child --normalize--> [Element] --reconcile--> Tree
//!                                                 |
//!                              reuse (tag or key match): merge props, recurse
//!                              otherwise: drop old subtree, mount new one
//! ```
//!
//! State updates only set dirty flags; [`Tree::materialize`] re-renders
//! the dirty components on the next tick.

mod component;
mod element;
mod node;
mod props;
mod reconcile;
mod tree;
mod value;

pub use component::*;
pub use element::*;
pub use node::*;
pub use props::*;
pub use tree::*;
pub use value::*;
