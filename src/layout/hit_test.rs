//! Hit testing.
//!
//! `find_element_at` walks the laid-out tree depth-first and keeps the
//! node with the highest effective z-index whose box contains the point.
//! Equal z-index favors the later visit, so a descendant wins over its
//! ancestor and a later sibling over an earlier one. Scroll offsets and
//! clipping match what paint does.

use crate::engine::{NodeId, Tree};
use crate::types::Rect;

/// Topmost node at cell (x, y).
pub fn find_element_at(tree: &Tree, x: i32, y: i32) -> Option<NodeId> {
    let root = tree.root()?;
    let mut best = None;
    visit(tree, root, x, y, (0, 0), None, &mut best);
    best.map(|(_, id)| id)
}

fn visit(
    tree: &Tree,
    id: NodeId,
    x: i32,
    y: i32,
    translate: (i32, i32),
    clip: Option<Rect>,
    best: &mut Option<(i32, NodeId)>,
) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let lb = node.layout;
    let rect = lb.rect.offset(translate.0, translate.1);
    let visible = clip.is_none_or(|c| c.contains(x, y));

    if visible && rect.contains(x, y) && best.is_none_or(|(z, _)| lb.z >= z) {
        *best = Some((lb.z, id));
    }

    let scroll = node.scroll();
    let mut inner_clip = clip;
    if lb.clips || scroll.scrollable {
        let content = lb.content.offset(translate.0, translate.1);
        inner_clip = match clip {
            Some(c) => Some(c.intersect(&content).unwrap_or_default()),
            None => Some(content),
        };
    }
    let inner = (translate.0 - scroll.offset_x, translate.1 - scroll.offset_y);

    for child in node.children() {
        visit(tree, *child, x, y, inner, inner_clip, best);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Element, div, span, text};
    use crate::layout::compute_layout;
    use crate::state::FocusState;
    use crate::style::Stylesheet;

    fn laid_out(root: Element, w: i32, h: i32) -> Tree {
        let mut tree = Tree::new();
        let id = tree.mount_root(root);
        tree.materialize(id);
        let sheet = Stylesheet::with_base().unwrap();
        compute_layout(&mut tree, &sheet, FocusState::default(), w, h);
        tree
    }

    fn by_id(tree: &Tree, name: &str) -> NodeId {
        let root = tree.root().unwrap();
        tree.preorder(root)
            .into_iter()
            .find(|id| tree[*id].props().id.as_deref() == Some(name))
            .unwrap()
    }

    fn hit_owner(tree: &Tree, x: i32, y: i32) -> Option<String> {
        let hit = find_element_at(tree, x, y)?;
        tree.ancestors(hit)
            .find_map(|a| tree[a].props().id.clone())
    }

    fn menu_tree() -> Tree {
        laid_out(
            div()
                .child(
                    span()
                        .child(span().id("menu1").child("Menu1"))
                        .child(span().id("menu2").child("Menu2")),
                )
                .child(span().id("menu3").child("Menu3"))
                .child(
                    span()
                        .id("menu4")
                        .style("position", "absolute")
                        .style("zIndex", 10)
                        .style("top", 1)
                        .style("left", 3)
                        .style("width", 10)
                        .style("height", 1)
                        .child("Menu4"),
                ),
            80,
            24,
        )
    }

    #[test]
    fn test_overlay_wins_by_z_index() {
        let tree = menu_tree();
        assert_eq!(hit_owner(&tree, 0, 0).as_deref(), Some("menu1"));
        assert_eq!(hit_owner(&tree, 6, 0).as_deref(), Some("menu2"));
        assert_eq!(hit_owner(&tree, 2, 1).as_deref(), Some("menu3"));
        assert_eq!(hit_owner(&tree, 4, 1).as_deref(), Some("menu4"));
    }

    #[test]
    fn test_descendant_wins_over_ancestor() {
        let tree = menu_tree();
        let hit = find_element_at(&tree, 1, 0).unwrap();
        assert_eq!(tree[hit].text(), Some("Menu1"));
        assert!(tree.is_ancestor_or_self(by_id(&tree, "menu1"), hit));
    }

    #[test]
    fn test_outside_everything_hits_root_or_nothing() {
        let tree = menu_tree();
        assert_eq!(find_element_at(&tree, 79, 23), tree.root());
        assert_eq!(find_element_at(&tree, 80, 0), None);
    }

    #[test]
    fn test_scrolled_content_is_translated_and_clipped() {
        let lines: Vec<Element> = (0..10).map(|i| text(format!("row{i}"))).collect();
        let mut tree = laid_out(
            div().child(
                div()
                    .id("list")
                    .style("height", 3)
                    .style("overflow", "scroll")
                    .children(lines),
            ),
            20,
            10,
        );
        let list = by_id(&tree, "list");
        tree[list].scroll.offset_y = 4;

        let hit = find_element_at(&tree, 0, 0).unwrap();
        assert_eq!(tree[hit].text(), Some("row4"));
        // Row 7 is scrolled into layout y=3, below the viewport.
        let below = find_element_at(&tree, 0, 3).unwrap();
        assert_eq!(below, tree.root().unwrap());
    }
}
