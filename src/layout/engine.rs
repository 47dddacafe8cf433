//! Layout computation.
//!
//! Two passes over the materialized tree:
//!
//! 1. **Size** (bottom-up). Each node is measured against inbound
//!    [`Constraints`]; own width/height/min/max narrow them, border and
//!    padding shrink the budget handed to children, and the box algorithm
//!    picked by `display`/`flex-direction` sizes the content.
//! 2. **Position** (top-down). Starting from the content origin, children
//!    are placed at the offsets recorded during sizing. Stretched children
//!    grow to their widest sibling (tallest in a row); aligned ones are
//!    offset inside the final content box.
//!
//! Absolute children take no part in their parent's flow: they are sized
//! against the viewport and placed by `top`/`left` or the `align`/`justify`
//! keywords relative to it.
//!
//! Results are collected while styles are resolved against a shared tree,
//! then written back in one step.

use std::collections::HashMap;

use super::text_measure::text_size;
use super::types::{Constraints, LayoutBox, UNBOUNDED};
use crate::engine::{NodeId, NodeKind, Tree};
use crate::state::FocusState;
use crate::style::{Property, StyleContext, Stylesheet};
use crate::types::{Align, Dimension, Display, Position, Rect, Sides};

// =============================================================================
// Measured sizes
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct Measured {
    width: i32,
    height: i32,
    /// Offset inside the parent's content box. Flex containers only use
    /// the main-axis component.
    offset: (i32, i32),
    /// Size of the children's flow, before clamping. For flex containers
    /// the cross component is the widest (or tallest) child, which is what
    /// stretched children grow to.
    content: (i32, i32),
    /// Resolved upper bounds, capping any stretch.
    max: (i32, i32),
    explicit_width: bool,
    explicit_height: bool,
}

/// Resolve a dimension against a basis, treating percentages of an
/// unbounded basis as auto.
fn resolve(dim: Dimension, basis: i32) -> Option<i32> {
    match dim {
        Dimension::Percent(_) if basis >= UNBOUNDED => None,
        other => other.resolve(basis),
    }
}

/// Narrow one axis of the inbound constraints by the node's own values.
fn clamp_axis(c_min: i32, c_max: i32, own: Option<i32>, own_min: i32, own_max: i32) -> (i32, i32) {
    let hi = own_max.min(c_max).max(0);
    let lo = own_min.max(c_min).min(hi);
    match own {
        Some(v) => {
            let v = v.clamp(lo, hi);
            (v, v)
        }
        None => (lo, hi),
    }
}

fn shrink(extent: i32, by: i32) -> i32 {
    if extent >= UNBOUNDED {
        UNBOUNDED
    } else {
        (extent - by).max(0)
    }
}

/// Geometry produced by one layout run, written back with [`LayoutResult::apply`].
#[derive(Debug, Default)]
pub struct LayoutResult {
    boxes: HashMap<NodeId, LayoutBox>,
    /// Scroll containers: (content width, content height).
    scroll: HashMap<NodeId, (i32, i32)>,
}

impl LayoutResult {
    pub fn get(&self, id: NodeId) -> Option<&LayoutBox> {
        self.boxes.get(&id)
    }

    /// Store geometry on the nodes. Nodes that were not laid out get an
    /// empty box; scroll offsets are clamped to the new extents.
    pub fn apply(mut self, tree: &mut Tree) {
        let Some(root) = tree.root() else {
            return;
        };
        for id in tree.preorder(root) {
            let layout = self.boxes.remove(&id).unwrap_or_default();
            let node = &mut tree[id];
            node.layout = layout;
            match self.scroll.get(&id) {
                Some(&(content_width, content_height)) => {
                    let s = &mut node.scroll;
                    s.scrollable = true;
                    s.content_width = content_width;
                    s.content_height = content_height;
                    s.viewport_width = layout.content.width;
                    s.viewport_height = layout.content.height;
                    s.clamp();
                }
                None => node.scroll = Default::default(),
            }
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// One layout run over a tree.
pub struct LayoutEngine<'a> {
    cx: StyleContext<'a>,
    viewport: Rect,
    measured: HashMap<NodeId, Measured>,
    result: LayoutResult,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(cx: StyleContext<'a>, width: i32, height: i32) -> Self {
        Self {
            cx,
            viewport: Rect::new(0, 0, width.max(0), height.max(0)),
            measured: HashMap::new(),
            result: LayoutResult::default(),
        }
    }

    /// Size and place the whole tree inside the viewport.
    pub fn run(mut self) -> LayoutResult {
        let Some(root) = self.cx.tree.root() else {
            return self.result;
        };
        let (w, h) = (self.viewport.width, self.viewport.height);
        let (width, height) = self.measure(root, Constraints::tight(w, h), (w, h));
        self.place(root, Rect::new(0, 0, width, height), 0);
        self.result
    }

    fn flow_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.cx.tree[id]
            .children()
            .iter()
            .copied()
            .filter(|c| self.cx.position(*c) != Position::Absolute)
    }

    fn absolute_children(&self, id: NodeId) -> Vec<NodeId> {
        self.cx.tree[id]
            .children()
            .iter()
            .copied()
            .filter(|c| self.cx.position(*c) == Position::Absolute)
            .collect()
    }

    fn insets(&self, id: NodeId) -> Sides {
        if self.cx.tree[id].kind().paints_box() {
            self.cx.insets(id)
        } else {
            Sides::ZERO
        }
    }

    // =========================================================================
    // Size pass
    // =========================================================================

    /// Measure a node, recording its size. `basis` is the parent's content
    /// extent, used for percentages.
    fn measure(&mut self, id: NodeId, c: Constraints, basis: (i32, i32)) -> (i32, i32) {
        let cx = self.cx;
        if cx.display(id) == Display::None {
            self.measured.insert(id, Measured::default());
            return (0, 0);
        }

        let width = resolve(cx.dimension(id, Property::Width), basis.0);
        let height = resolve(cx.dimension(id, Property::Height), basis.1);
        let min_w = resolve(cx.dimension(id, Property::MinWidth), basis.0).unwrap_or(0);
        let min_h = resolve(cx.dimension(id, Property::MinHeight), basis.1).unwrap_or(0);
        let max_w = resolve(cx.dimension(id, Property::MaxWidth), basis.0).unwrap_or(UNBOUNDED);
        let max_h = resolve(cx.dimension(id, Property::MaxHeight), basis.1).unwrap_or(UNBOUNDED);

        let (lo_w, hi_w) = clamp_axis(c.min_width, c.max_width, width, min_w, max_w);
        let (lo_h, hi_h) = clamp_axis(c.min_height, c.max_height, height, min_h, max_h);

        let mut m = Measured {
            max: (hi_w, hi_h),
            explicit_width: width.is_some(),
            explicit_height: height.is_some(),
            ..Measured::default()
        };

        if let NodeKind::Text(t) = cx.tree[id].kind() {
            let (tw, th) = if t.marker { (0, 0) } else { text_size(&t.text) };
            m.width = tw.clamp(lo_w, hi_w);
            m.height = th.clamp(lo_h, hi_h);
            m.content = (tw, th);
            self.store(id, m);
            return (m.width, m.height);
        }

        let insets = self.insets(id);
        let mut inner = Constraints {
            min_width: (lo_w - insets.horizontal()).max(0),
            min_height: (lo_h - insets.vertical()).max(0),
            max_width: shrink(hi_w, insets.horizontal()),
            max_height: shrink(hi_h, insets.vertical()),
        };
        let row = cx.flex_direction(id).is_row();
        if cx.overflow(id).is_scrollable() {
            inner.min_height = 0;
            inner.max_height = UNBOUNDED;
            if row {
                inner.min_width = 0;
                inner.max_width = UNBOUNDED;
            }
        }

        let content = match cx.display(id) {
            Display::Block => self.block(id, inner),
            _ if row => self.flex(id, inner, true),
            _ => self.flex(id, inner, false),
        };

        for child in self.absolute_children(id) {
            let (vw, vh) = (self.viewport.width, self.viewport.height);
            self.measure(child, Constraints::loose(vw, vh), (vw, vh));
        }

        m.content = content;
        m.width = (content.0 + insets.horizontal()).clamp(lo_w, hi_w);
        m.height = (content.1 + insets.vertical()).clamp(lo_h, hi_h);
        self.store(id, m);
        (m.width, m.height)
    }

    fn store(&mut self, id: NodeId, m: Measured) {
        self.measured.insert(id, m);
    }

    fn set_offset(&mut self, id: NodeId, offset: (i32, i32)) {
        if let Some(m) = self.measured.get_mut(&id) {
            m.offset = offset;
        }
    }

    /// Flex column (or row when `row`). Returns the content size.
    ///
    /// Fixed children are measured first, each with what is left of the
    /// main-axis budget. Growing children then split the remaining space
    /// by weight, `floor(remaining * grow / total_grow)`; the remainder of
    /// the division is left unused. With an unbounded main axis growing
    /// children are sized like fixed ones.
    fn flex(&mut self, id: NodeId, inner: Constraints, row: bool) -> (i32, i32) {
        let cx = self.cx;
        let basis = (inner.max_width, inner.max_height);
        let (main_max, cross_max) = if row {
            (inner.max_width, inner.max_height)
        } else {
            (inner.max_height, inner.max_width)
        };
        let bounded = main_max < UNBOUNDED;
        let children: Vec<(NodeId, f64)> = self
            .flow_children(id)
            .map(|c| (c, if bounded { cx.flex_grow(c) } else { 0.0 }))
            .collect();

        let constraints = |main_lo: i32, main_hi: i32| {
            if row {
                Constraints {
                    min_width: main_lo,
                    min_height: 0,
                    max_width: main_hi,
                    max_height: cross_max,
                }
            } else {
                Constraints {
                    min_width: 0,
                    min_height: main_lo,
                    max_width: cross_max,
                    max_height: main_hi,
                }
            }
        };
        let split = |(w, h): (i32, i32)| if row { (w, h) } else { (h, w) };

        let mut used = 0;
        let mut cross = 0;
        let mut main_sizes: HashMap<NodeId, i32> = HashMap::new();

        for &(child, _) in children.iter().filter(|(_, g)| *g <= 0.0) {
            let remaining = shrink(main_max, used);
            let (main, c) = split(self.measure(child, constraints(0, remaining), basis));
            used += main;
            cross = cross.max(c);
            main_sizes.insert(child, main);
        }

        let total_grow: f64 = children.iter().map(|(_, g)| g.max(0.0)).sum();
        if total_grow > 0.0 {
            let free = (main_max - used).max(0);
            for &(child, grow) in children.iter().filter(|(_, g)| *g > 0.0) {
                let share = (free as f64 * grow / total_grow).floor() as i32;
                let (main, c) = split(self.measure(child, constraints(share, share), basis));
                used += main;
                cross = cross.max(c);
                main_sizes.insert(child, main);
            }
        }

        let mut cursor = 0;
        for (child, _) in &children {
            let offset = if row { (cursor, 0) } else { (0, cursor) };
            self.set_offset(*child, offset);
            cursor += main_sizes.get(child).copied().unwrap_or(0);
        }

        if row { (used, cross) } else { (cross, used) }
    }

    /// Wrapping left-to-right flow. Returns the content size.
    ///
    /// A child that would overflow the line starts a new one, unless it is
    /// the first on its line.
    fn block(&mut self, id: NodeId, inner: Constraints) -> (i32, i32) {
        let basis = (inner.max_width, inner.max_height);
        let wrap = inner.max_width;
        let children: Vec<NodeId> = self.flow_children(id).collect();

        let (mut x, mut y, mut line_h, mut widest) = (0, 0, 0, 0);
        for child in children {
            let (w, h) = self.measure(child, Constraints::loose(inner.max_width, inner.max_height), basis);
            if x > 0 && x + w > wrap {
                y += line_h;
                x = 0;
                line_h = 0;
            }
            self.set_offset(child, (x, y));
            x += w;
            line_h = line_h.max(h);
            widest = widest.max(x);
        }
        (widest, y + line_h)
    }

    // =========================================================================
    // Position pass
    // =========================================================================

    fn place(&mut self, id: NodeId, rect: Rect, parent_z: i32) {
        let cx = self.cx;
        let z = parent_z + cx.z_index(id);
        let insets = self.insets(id);
        let content = insets.inset(rect);
        let overflow = cx.overflow(id);
        self.result.boxes.insert(
            id,
            LayoutBox {
                rect,
                content,
                z,
                clips: overflow.clips(),
            },
        );

        let Some(m) = self.measured.get(&id).copied() else {
            return;
        };
        if overflow.is_scrollable() {
            self.result.scroll.insert(id, m.content);
        }
        if cx.tree[id].kind().is_text() || cx.display(id) == Display::None {
            return;
        }

        let block = cx.display(id) == Display::Block;
        let row = cx.flex_direction(id).is_row();
        let flow: Vec<NodeId> = self.flow_children(id).collect();

        for child in flow {
            if cx.display(child) == Display::None {
                continue;
            }
            let Some(cm) = self.measured.get(&child).copied() else {
                continue;
            };
            let mut r = Rect::new(
                content.x + cm.offset.0,
                content.y + cm.offset.1,
                cm.width,
                cm.height,
            );
            if !block {
                self.align_cross(child, &cm, &m, &content, row, &mut r);
            }
            self.place(child, r, z);
        }

        for child in self.absolute_children(id) {
            self.place_absolute(child, (content.x, content.y), z);
        }
    }

    /// Cross-axis placement: stretch to the widest sibling (tallest in a
    /// row) by default, capped by the child's own max. Otherwise
    /// `align-self` or the parent's `align-items` within the content box.
    fn align_cross(&self, child: NodeId, m: &Measured, parent: &Measured, content: &Rect, row: bool, r: &mut Rect) {
        let cx = self.cx;
        let (explicit, extent, target, cap) = if row {
            (m.explicit_height, content.height, parent.content.1, m.max.1)
        } else {
            (m.explicit_width, content.width, parent.content.0, m.max.0)
        };
        let stretch = cx.stretches(child) && !explicit;
        let (start, size) = if row {
            (&mut r.y, &mut r.height)
        } else {
            (&mut r.x, &mut r.width)
        };
        if stretch {
            *size = (*size).max(target.min(cap));
        } else {
            *start += cx.cross_align(child).offset(extent, *size).max(0);
        }
    }

    fn place_absolute(&mut self, id: NodeId, flow_origin: (i32, i32), parent_z: i32) {
        let cx = self.cx;
        let Some(m) = self.measured.get(&id).copied() else {
            return;
        };
        let vp = self.viewport;
        let row = cx.flex_direction(id).is_row();
        let align = cx.align(id, Property::Align).unwrap_or_default();
        let justify = cx.align(id, Property::Justify).unwrap_or_default();
        let (x_align, y_align) = if row { (justify, align) } else { (align, justify) };

        let axis = |pos: Option<i32>, align: Align, space: i32, size: i32, flow: i32| match pos {
            Some(p) => vp.x + p,
            None if align == Align::Start => flow,
            None => align.offset(space, size),
        };
        let x = axis(
            resolve(cx.dimension(id, Property::Left), vp.width),
            x_align,
            vp.width,
            m.width,
            flow_origin.0,
        );
        let y = axis(
            resolve(cx.dimension(id, Property::Top), vp.height),
            y_align,
            vp.height,
            m.height,
            flow_origin.1,
        );
        self.place(id, Rect::new(x, y, m.width, m.height), parent_z);
    }
}

/// Lay out the whole tree into a `width` x `height` viewport and store the
/// geometry on the nodes.
pub fn compute_layout(tree: &mut Tree, sheet: &Stylesheet, focus: FocusState, width: i32, height: i32) {
    let result = {
        let cx = StyleContext::new(tree, sheet, focus);
        LayoutEngine::new(cx, width, height).run()
    };
    result.apply(tree);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Element, div, el, span, text};

    fn layout(root: Element, sheet: &Stylesheet, w: i32, h: i32) -> Tree {
        let mut tree = Tree::new();
        let id = tree.mount_root(root);
        tree.materialize(id);
        compute_layout(&mut tree, sheet, FocusState::default(), w, h);
        tree
    }

    fn child(tree: &Tree, id: NodeId, i: usize) -> NodeId {
        tree[id].children()[i]
    }

    fn rect(tree: &Tree, id: NodeId) -> (i32, i32, i32, i32) {
        let r = tree[id].layout();
        (r.x, r.y, r.width, r.height)
    }

    #[test]
    fn test_header_body_footer_column() {
        let tree = layout(
            div()
                .child(div().style("height", 1).child("header"))
                .child(div().style("flexGrow", 1).child("body"))
                .child(div().style("height", 1).child("footer")),
            &Stylesheet::new(),
            80,
            25,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, root), (0, 0, 80, 25));
        assert_eq!(rect(&tree, child(&tree, root, 0)), (0, 0, 6, 1));
        assert_eq!(rect(&tree, child(&tree, root, 1)), (0, 1, 6, 23));
        assert_eq!(rect(&tree, child(&tree, root, 2)), (0, 24, 6, 1));
    }

    #[test]
    fn test_row_of_text_leaves() {
        let tree = layout(
            div().child(
                div()
                    .style("flex-direction", "row")
                    .child(text("Text1"))
                    .child(text("Text2")),
            ),
            &Stylesheet::new(),
            80,
            25,
        );
        let row = child(&tree, tree.root().unwrap(), 0);
        let (x1, _, w1, _) = rect(&tree, child(&tree, row, 0));
        let (x2, _, w2, _) = rect(&tree, child(&tree, row, 1));
        assert_eq!((x1, w1), (0, 5));
        assert_eq!((x2, w2), (5, 5));
    }

    #[test]
    fn test_grow_remainder_is_not_redistributed() {
        let tree = layout(
            div()
                .child(div().style("height", 2))
                .child(div().style("flex-grow", 1))
                .child(div().style("flex-grow", 1)),
            &Stylesheet::new(),
            10,
            25,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, child(&tree, root, 1)), (0, 2, 0, 11));
        assert_eq!(rect(&tree, child(&tree, root, 2)), (0, 13, 0, 11));
    }

    #[test]
    fn test_weighted_grow() {
        let tree = layout(
            div()
                .style("flexDirection", "row")
                .child(div().style("flexGrow", 1))
                .child(div().style("flexGrow", 3)),
            &Stylesheet::new(),
            40,
            5,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, child(&tree, root, 0)), (0, 0, 10, 0));
        assert_eq!(rect(&tree, child(&tree, root, 1)), (10, 0, 30, 0));
    }

    #[test]
    fn test_padding_and_border_shrink_content() {
        let tree = layout(
            div()
                .style("border", 1)
                .style("padding", "0 1")
                .child(text("hi")),
            &Stylesheet::new(),
            20,
            5,
        );
        let root = tree.root().unwrap();
        let leaf = child(&tree, root, 0);
        assert_eq!(tree[root].layout.content, Rect::new(2, 1, 16, 3));
        assert_eq!(rect(&tree, leaf), (2, 1, 2, 1));
    }

    #[test]
    fn test_block_wraps_but_never_first_on_line() {
        let tree = layout(
            div().child(
                el("p")
                    .style("width", 8)
                    .child(text("aaaa"))
                    .child(text("bbbb"))
                    .child(text("cc"))
                    .child(text("dddddddddd")),
            ),
            &Stylesheet::with_base().unwrap(),
            80,
            25,
        );
        let p = child(&tree, tree.root().unwrap(), 0);
        assert_eq!(rect(&tree, child(&tree, p, 0)), (0, 0, 4, 1));
        assert_eq!(rect(&tree, child(&tree, p, 1)), (4, 0, 4, 1));
        assert_eq!(rect(&tree, child(&tree, p, 2)), (0, 1, 2, 1));
        assert_eq!(rect(&tree, child(&tree, p, 3)), (0, 2, 8, 1));
        assert_eq!(rect(&tree, p), (0, 0, 8, 3));
    }

    #[test]
    fn test_cross_alignment_center_and_end() {
        let tree = layout(
            div()
                .style("align-items", "center")
                .child(text("abcd"))
                .child(span().style("align-self", "end").child("xy")),
            &Stylesheet::new(),
            10,
            5,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, child(&tree, root, 0)), (3, 0, 4, 1));
        assert_eq!(rect(&tree, child(&tree, root, 1)), (8, 1, 2, 1));
    }

    #[test]
    fn test_percent_sizes() {
        let tree = layout(
            div().child(div().style("width", "50%").style("height", "20%")),
            &Stylesheet::new(),
            80,
            25,
        );
        let c = child(&tree, tree.root().unwrap(), 0);
        assert_eq!(rect(&tree, c), (0, 0, 40, 5));
    }

    #[test]
    fn test_absolute_excluded_from_flow() {
        let tree = layout(
            div()
                .child(text("a"))
                .child(
                    div()
                        .style("position", "absolute")
                        .style("top", 3)
                        .style("left", 4)
                        .style("width", 6)
                        .style("height", 2),
                )
                .child(text("b")),
            &Stylesheet::new(),
            20,
            10,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, child(&tree, root, 1)), (4, 3, 6, 2));
        assert_eq!(rect(&tree, child(&tree, root, 2)).1, 1);
    }

    #[test]
    fn test_absolute_centered_in_viewport() {
        let tree = layout(
            div().child(
                div()
                    .style("position", "absolute")
                    .style("align", "center")
                    .style("justify", "end")
                    .style("width", 10)
                    .style("height", 4),
            ),
            &Stylesheet::new(),
            30,
            10,
        );
        let overlay = child(&tree, tree.root().unwrap(), 0);
        assert_eq!(rect(&tree, overlay), (10, 6, 10, 4));
    }

    #[test]
    fn test_scroll_container_extents() {
        let lines: Vec<Element> = (0..10).map(|i| text(format!("line {i}"))).collect();
        let mut tree = layout(
            div().child(div().style("height", 4).style("overflow", "scroll").children(lines)),
            &Stylesheet::new(),
            20,
            10,
        );
        let scroller = child(&tree, tree.root().unwrap(), 0);
        let s = *tree[scroller].scroll();
        assert!(s.scrollable);
        assert_eq!((s.content_height, s.viewport_height), (10, 4));
        assert_eq!(s.thumb(), Some((0, 1)));
        assert_eq!(rect(&tree, child(&tree, scroller, 9)), (0, 9, 6, 1));

        tree[scroller].scroll.offset_y = 50;
        compute_layout(&mut tree, &Stylesheet::new(), FocusState::default(), 20, 10);
        assert_eq!(tree[scroller].scroll().offset_y, 6);
        assert_eq!(tree[scroller].scroll().thumb(), Some((3, 1)));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let build = || {
            div()
                .style("padding", 1)
                .child(span().child("left").child(div().style("flexGrow", 2)))
                .child(el("p").child("x").child("yy"))
        };
        let mut tree = layout(build(), &Stylesheet::with_base().unwrap(), 30, 12);
        let root = tree.root().unwrap();
        let first: Vec<_> = tree.preorder(root).iter().map(|id| rect(&tree, *id)).collect();
        compute_layout(&mut tree, &Stylesheet::with_base().unwrap(), FocusState::default(), 30, 12);
        let second: Vec<_> = tree.preorder(root).iter().map(|id| rect(&tree, *id)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_none_takes_no_space() {
        let tree = layout(
            div()
                .child(div().style("display", "none").style("height", 3))
                .child(text("after")),
            &Stylesheet::new(),
            20,
            10,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, child(&tree, root, 0)), (0, 0, 0, 0));
        assert_eq!(rect(&tree, child(&tree, root, 1)).1, 0);
    }

    #[test]
    fn test_stretch_to_widest_sibling() {
        let tree = layout(
            div().child(div().style("width", 20).child(text("ab")).child(text("abcd"))),
            &Stylesheet::new(),
            80,
            25,
        );
        let boxed = child(&tree, tree.root().unwrap(), 0);
        assert_eq!(rect(&tree, boxed), (0, 0, 20, 2));
        assert_eq!(rect(&tree, child(&tree, boxed, 0)), (0, 0, 4, 1));
        assert_eq!(rect(&tree, child(&tree, boxed, 1)), (0, 1, 4, 1));
    }

    #[test]
    fn test_row_stretches_to_tallest_child() {
        let tree = layout(
            div()
                .style("flexDirection", "row")
                .child(div().style("width", 2).style("height", 3))
                .child(text("x")),
            &Stylesheet::new(),
            20,
            10,
        );
        let root = tree.root().unwrap();
        assert_eq!(rect(&tree, child(&tree, root, 1)), (2, 0, 1, 3));
    }

    #[test]
    fn test_stretch_respects_max_width() {
        let tree = layout(
            div()
                .child(div().style("max-width", 10).child(text("hi")))
                .child(text("a much longer line of text")),
            &Stylesheet::new(),
            80,
            25,
        );
        let capped = child(&tree, tree.root().unwrap(), 0);
        assert_eq!(rect(&tree, capped), (0, 0, 10, 1));
    }
}
