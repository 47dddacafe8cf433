//! Tree painting.
//!
//! Walks the laid-out tree in pre-order and draws each node into a
//! [`Canvas`]: containers paint background and border, text leaves paint
//! their text, components paint nothing of their own. Every write carries
//! the node's accumulated z-index, so overlap is settled by the canvas z
//! test rather than by walk order.
//!
//! A clipping or scrollable container pushes its content box as a clip and
//! translates its children by minus the scroll offset, then draws a
//! scrollbar thumb in its rightmost content column.

use crate::engine::{NodeId, NodeKind, Tree};
use crate::renderer::Canvas;
use crate::style::{Property, StyleContext};
use crate::types::{Attr, Display, Rgba};

const THUMB: &str = "█";

/// Paint the whole tree.
pub fn paint_tree(cx: &StyleContext<'_>, canvas: &mut Canvas<'_>) {
    if let Some(root) = cx.tree.root() {
        paint_node(cx, canvas, root);
    }
}

fn paint_node(cx: &StyleContext<'_>, canvas: &mut Canvas<'_>, id: NodeId) {
    let Some(node) = cx.tree.get(id) else {
        return;
    };
    if cx.display(id) == Display::None {
        return;
    }
    let lb = node.layout;
    let bg = cx.color(id, Property::Background);

    match node.kind() {
        NodeKind::Container => {
            if !bg.is_terminal_default() {
                canvas.fill_rect(lb.rect, bg, lb.z);
            }
            let widths = cx.border_widths(id);
            if widths != Default::default() {
                let mut fg = cx.color(id, Property::BorderColor);
                if fg.is_terminal_default() {
                    fg = cx.color(id, Property::Color);
                }
                canvas.stroke_rect(lb.rect, widths, fg, bg, lb.z);
            }
        }
        NodeKind::Text(t) => {
            let fg = cx.color(id, Property::Color);
            canvas.push_clip(lb.rect);
            canvas.fill_text(lb.content.x, lb.content.y, &t.text, fg, bg, cx.attrs(id), lb.z);
            canvas.pop_clip();
        }
        NodeKind::Component(_) => {}
    }

    let scroll = *node.scroll();
    let clipped = lb.clips || scroll.scrollable;
    if clipped {
        canvas.push_clip(lb.content);
        canvas.push_translate(-scroll.offset_x, -scroll.offset_y);
    }
    for child in node.children() {
        paint_node(cx, canvas, *child);
    }
    if clipped {
        canvas.pop_translate();
        canvas.pop_clip();
    }

    if let Some((pos, len)) = scroll.thumb() {
        let x = lb.content.right() - 1;
        let fg = cx.color(id, Property::Color);
        for dy in 0..len {
            canvas.fill_text(x, lb.content.y + pos + dy, THUMB, fg, Rgba::TERMINAL_DEFAULT, Attr::NONE, lb.z);
        }
    }
}

/// Sum of the scroll translations applied to `id` by its ancestors.
pub fn scroll_translation(tree: &Tree, id: NodeId) -> (i32, i32) {
    tree.ancestors(id)
        .skip(1)
        .filter_map(|a| tree.get(a))
        .filter(|n| n.scroll().scrollable)
        .fold((0, 0), |(x, y), n| (x - n.scroll().offset_x, y - n.scroll().offset_y))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Element, div, text};
    use crate::layout::compute_layout;
    use crate::renderer::ScreenBuffer;
    use crate::state::FocusState;
    use crate::style::Stylesheet;

    fn render(root: Element, w: u16, h: u16, setup: impl FnOnce(&mut Tree)) -> ScreenBuffer {
        let mut tree = Tree::new();
        let id = tree.mount_root(root);
        tree.materialize(id);
        let sheet = Stylesheet::with_base().unwrap();
        compute_layout(&mut tree, &sheet, FocusState::default(), w as i32, h as i32);
        setup(&mut tree);
        let mut buf = ScreenBuffer::new(w, h);
        let cx = StyleContext::new(&tree, &sheet, FocusState::default());
        let mut canvas = Canvas::new(&mut buf);
        paint_tree(&cx, &mut canvas);
        canvas.finish();
        buf
    }

    #[test]
    fn test_border_and_text() {
        let buf = render(
            div().child(div().style("border", 1).style("width", 6).style("height", 3).child("hi")),
            8,
            3,
            |_| {},
        );
        assert_eq!(buf.row_text(0), "┌────┐  ");
        assert_eq!(buf.row_text(1), "│hi  │  ");
        assert_eq!(buf.row_text(2), "└────┘  ");
    }

    #[test]
    fn test_background_inherited_by_text() {
        let buf = render(
            div().style("background", "blue").style("color", "red").child("x"),
            2,
            1,
            |_| {},
        );
        let cell = buf.get(0, 0).unwrap();
        assert_eq!(cell.bg, Rgba::BLUE);
        assert_eq!(cell.fg, Rgba::RED);
        assert_eq!(buf.get(1, 0).unwrap().bg, Rgba::BLUE);
    }

    #[test]
    fn test_overlay_not_overwritten_by_later_sibling() {
        let buf = render(
            div()
                .child(
                    div()
                        .style("position", "absolute")
                        .style("zIndex", 5)
                        .style("top", 0)
                        .style("left", 0)
                        .style("width", 3)
                        .style("height", 1)
                        .child("TOP"),
                )
                .child(text("under")),
            5,
            1,
            |_| {},
        );
        assert_eq!(buf.row_text(0), "TOPer");
    }

    #[test]
    fn test_scrolled_content_with_thumb() {
        let lines: Vec<Element> = (0..6).map(|i| text(format!("r{i}"))).collect();
        let buf = render(
            div().child(
                div()
                    .id("list")
                    .style("height", 2)
                    .style("width", 4)
                    .style("overflow", "scroll")
                    .children(lines),
            ),
            4,
            3,
            |tree| {
                let root = tree.root().unwrap();
                let list = tree[root].children()[0];
                tree[list].scroll.offset_y = 2;
            },
        );
        assert_eq!(buf.row_text(0), "r2 █");
        assert_eq!(buf.row_text(1), "r3  ");
        assert_eq!(buf.row_text(2), "    ");
    }

    #[test]
    fn test_display_none_not_painted() {
        let buf = render(
            div().child(div().style("display", "none").child("gone")).child("ok"),
            4,
            1,
            |_| {},
        );
        assert_eq!(buf.row_text(0), "ok  ");
    }
}
