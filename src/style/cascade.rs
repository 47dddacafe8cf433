//! Cascade resolution.
//!
//! Order for one node and property:
//!
//! 1. the node's inline style
//! 2. the best matching stylesheet rule
//! 3. the parent's resolved value, for inheritable properties
//! 4. the caller's default
//!
//! Typed accessors below fold step 4 in.

use super::property::{Property, StyleValue};
use super::selector::{MatchTarget, Selector};
use super::stylesheet::Stylesheet;
use crate::engine::{Node, NodeId, Tree};
use crate::state::FocusState;
use crate::types::{
    Align, Attr, Dimension, Display, FlexDirection, Overflow, Position, Rgba, Sides,
};

/// Read-only view for resolving styles during one frame.
#[derive(Clone, Copy)]
pub struct StyleContext<'a> {
    pub tree: &'a Tree,
    pub sheet: &'a Stylesheet,
    pub focus: FocusState,
}

impl<'a> StyleContext<'a> {
    pub fn new(tree: &'a Tree, sheet: &'a Stylesheet, focus: FocusState) -> Self {
        Self { tree, sheet, focus }
    }

    /// Selector-visible facts about a node.
    pub fn target(&self, id: NodeId, node: &'a Node) -> MatchTarget<'a> {
        MatchTarget {
            tag: node.tag(),
            id: node.props().id.as_deref(),
            class_name: node.props().class_name.as_deref(),
            focus_within: self.focus.focus_within(self.tree, id),
            open: self.focus.open == Some(id),
        }
    }

    /// Cascaded value of `prop`, or none.
    pub fn get(&self, id: NodeId, prop: Property) -> Option<&'a StyleValue> {
        let tree = self.tree;
        let mut current = Some(id);
        while let Some(cid) = current {
            let node = tree.get(cid)?;
            if let Some(v) = node.props().style.get(prop) {
                return Some(v);
            }
            if let Some(v) = self.sheet.lookup(&self.target(cid, node), prop) {
                return Some(v);
            }
            if !prop.is_inheritable() {
                return None;
            }
            current = node.parent();
        }
        None
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.tree
            .get(id)
            .is_some_and(|node| selector.matches(&self.target(id, node)))
    }

    /// First node in pre-order matching `selector`.
    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        let root = self.tree.root()?;
        self.tree
            .preorder(root)
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn dimension(&self, id: NodeId, prop: Property) -> Dimension {
        self.get(id, prop)
            .and_then(StyleValue::as_dimension)
            .unwrap_or_default()
    }

    pub fn int(&self, id: NodeId, prop: Property, default: i32) -> i32 {
        self.get(id, prop)
            .and_then(StyleValue::as_int)
            .unwrap_or(default)
    }

    pub fn number(&self, id: NodeId, prop: Property, default: f64) -> f64 {
        self.get(id, prop)
            .and_then(StyleValue::as_number)
            .unwrap_or(default)
    }

    pub fn keyword(&self, id: NodeId, prop: Property) -> Option<&'a str> {
        self.get(id, prop).and_then(StyleValue::as_keyword)
    }

    pub fn color(&self, id: NodeId, prop: Property) -> Rgba {
        self.get(id, prop)
            .and_then(StyleValue::as_color)
            .unwrap_or_default()
    }

    pub fn display(&self, id: NodeId) -> Display {
        self.keyword(id, Property::Display)
            .and_then(Display::from_keyword)
            .unwrap_or_default()
    }

    pub fn flex_direction(&self, id: NodeId) -> FlexDirection {
        self.keyword(id, Property::FlexDirection)
            .and_then(FlexDirection::from_keyword)
            .unwrap_or_default()
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.keyword(id, Property::Position)
            .and_then(Position::from_keyword)
            .unwrap_or_default()
    }

    pub fn overflow(&self, id: NodeId) -> Overflow {
        self.keyword(id, Property::Overflow)
            .and_then(Overflow::from_keyword)
            .unwrap_or_default()
    }

    pub fn align(&self, id: NodeId, prop: Property) -> Option<Align> {
        self.keyword(id, prop).and_then(Align::from_keyword)
    }

    /// Cross-axis alignment: `align-self`, else the parent's `align-items`.
    pub fn cross_align(&self, id: NodeId) -> Align {
        if let Some(a) = self.align(id, Property::AlignSelf) {
            return a;
        }
        self.tree
            .get(id)
            .and_then(Node::parent)
            .and_then(|p| self.align(p, Property::AlignItems))
            .unwrap_or_default()
    }

    /// Whether the node fills the cross axis of its flex parent: true
    /// unless `align-self` or the parent's `align-items` names a position.
    pub fn stretches(&self, id: NodeId) -> bool {
        let keyword = self.keyword(id, Property::AlignSelf).or_else(|| {
            self.tree
                .get(id)
                .and_then(Node::parent)
                .and_then(|p| self.keyword(p, Property::AlignItems))
        });
        matches!(keyword, None | Some("stretch"))
    }

    pub fn z_index(&self, id: NodeId) -> i32 {
        self.int(id, Property::ZIndex, 0)
    }

    pub fn flex_grow(&self, id: NodeId) -> f64 {
        self.number(id, Property::FlexGrow, 0.0).max(0.0)
    }

    pub fn padding(&self, id: NodeId) -> Sides {
        Sides {
            top: self.int(id, Property::PaddingTop, 0).max(0),
            right: self.int(id, Property::PaddingRight, 0).max(0),
            bottom: self.int(id, Property::PaddingBottom, 0).max(0),
            left: self.int(id, Property::PaddingLeft, 0).max(0),
        }
    }

    /// Declared border widths per side. Zero means no border on that side.
    pub fn border_widths(&self, id: NodeId) -> Sides {
        Sides {
            top: self.int(id, Property::BorderTop, 0).max(0),
            right: self.int(id, Property::BorderRight, 0).max(0),
            bottom: self.int(id, Property::BorderBottom, 0).max(0),
            left: self.int(id, Property::BorderLeft, 0).max(0),
        }
    }

    /// Cells taken by the border: one per bordered side.
    pub fn border(&self, id: NodeId) -> Sides {
        let w = self.border_widths(id);
        Sides {
            top: w.top.min(1),
            right: w.right.min(1),
            bottom: w.bottom.min(1),
            left: w.left.min(1),
        }
    }

    /// Padding plus border.
    pub fn insets(&self, id: NodeId) -> Sides {
        self.padding(id).add(&self.border(id))
    }

    /// Font modifiers from font-weight, font-style and text-decoration.
    pub fn attrs(&self, id: NodeId) -> Attr {
        let mut attrs = Attr::NONE;
        for prop in [Property::FontWeight, Property::FontStyle, Property::TextDecoration] {
            let Some(words) = self.keyword(id, prop) else {
                continue;
            };
            for word in words.split_whitespace() {
                attrs |= match word {
                    "bold" | "bolder" => Attr::BOLD,
                    "dim" | "lighter" | "faint" => Attr::DIM,
                    "italic" | "oblique" => Attr::ITALIC,
                    "underline" => Attr::UNDERLINE,
                    "line-through" | "strikethrough" => Attr::STRIKETHROUGH,
                    "blink" => Attr::BLINK,
                    "reverse" | "inverse" => Attr::INVERSE,
                    _ => Attr::NONE,
                };
            }
        }
        attrs
    }

    /// Whether the node asks for the terminal cursor to be hidden.
    pub fn cursor_hidden(&self, id: NodeId) -> bool {
        matches!(self.keyword(id, Property::Cursor), Some("hidden" | "none"))
    }
}

// =============================================================================
// Tests
// =============================================================================
