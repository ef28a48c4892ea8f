//! Tests for the expand/collapse state machine

use generational_arena::Index;
use tmap::{Rect, TreeArena};

/// root
/// ├── x (20)          leaf
/// └── y (80)          internal
///     ├── y1 (30)
///     └── y2 (50)
fn sample_tree() -> (TreeArena, Index, Index, Index, Index, Index) {
    let mut tree = TreeArena::new().with_color_seed(11);
    let x = tree.insert_leaf("x", 20);
    let y1 = tree.insert_leaf("y1", 30);
    let y2 = tree.insert_leaf("y2", 50);
    let y = tree.insert_internal("y", vec![y1, y2]);
    let root = tree.insert_internal("root", vec![x, y]);
    tree.set_root(root);
    (tree, root, x, y, y1, y2)
}

fn expanded(tree: &TreeArena, idx: Index) -> bool {
    tree.get_node(idx).unwrap().expanded
}

/// expanded ⇒ parent expanded, for every node.
fn assert_view_invariant(tree: &TreeArena) {
    for (_, node) in tree.iter() {
        if node.expanded {
            if let Some(parent) = node.parent {
                assert!(
                    tree.get_node(parent).unwrap().expanded,
                    "{:?} expanded under a collapsed parent",
                    node.name
                );
            }
        }
    }
}

// ============================================================
// expand / expand_all
// ============================================================

#[test]
fn given_leaf_when_expanding_then_it_stays_collapsed() {
    let (mut tree, _, x, ..) = sample_tree();

    tree.expand(x);

    assert!(!expanded(&tree, x));
}

#[test]
fn given_internal_when_expanding_then_only_that_node() {
    let (mut tree, root, _, y, ..) = sample_tree();

    tree.expand(root);

    assert!(expanded(&tree, root));
    assert!(!expanded(&tree, y));
    assert_view_invariant(&tree);
}

#[test]
fn given_internal_when_expanding_all_then_every_descendant_opens() {
    let (mut tree, root, x, y, y1, y2) = sample_tree();

    tree.expand_all(root);

    assert!(expanded(&tree, root));
    assert!(expanded(&tree, y));
    // Leaves stay in their degenerate collapsed state
    assert!(!expanded(&tree, x));
    assert!(!expanded(&tree, y1));
    assert!(!expanded(&tree, y2));
    assert_view_invariant(&tree);
}

#[test]
fn given_all_collapsed_when_expanding_all_then_three_visible_leaves() {
    // Arrange
    let (mut tree, root, ..) = sample_tree();
    tree.update_rectangles(Rect::new(0, 0, 100, 10));
    assert_eq!(tree.rectangles().len(), 1);

    // Act
    tree.expand_all(root);

    // Assert: x plus y's two children, not two blocks
    assert_eq!(tree.rectangles().len(), 3);
}

// ============================================================
// collapse
// ============================================================

#[test]
fn given_expanded_parent_when_collapsing_child_then_whole_parent_subtree_closes() {
    // Arrange
    let (mut tree, root, _, y, y1, _) = sample_tree();
    tree.expand_all(root);

    // Act: collapsing y1 collapses its parent y and everything under it
    tree.collapse(y1);

    // Assert
    assert!(!expanded(&tree, y));
    // y's parent chain above is untouched
    assert!(expanded(&tree, root));
    assert_view_invariant(&tree);
}

#[test]
fn given_root_when_collapsing_then_noop() {
    let (mut tree, root, ..) = sample_tree();
    tree.expand_all(root);

    tree.collapse(root);

    assert!(expanded(&tree, root));
}

#[test]
fn given_collapsed_parent_when_collapsing_then_noop() {
    let (mut tree, _, _, _, y1, _) = sample_tree();

    tree.collapse(y1);

    assert_view_invariant(&tree);
    assert_eq!(
        tree.iter().filter(|(_, node)| node.expanded).count(),
        0,
        "nothing should have expanded"
    );
}

// ============================================================
// collapse_all
// ============================================================

#[test]
fn given_deep_node_when_collapsing_all_then_topmost_expanded_ancestor_closes() {
    let (mut tree, root, _, y, y1, _) = sample_tree();
    tree.expand_all(root);

    tree.collapse_all(y1);

    assert!(!expanded(&tree, root));
    assert!(!expanded(&tree, y));
    assert_view_invariant(&tree);
}

#[test]
fn given_partially_expanded_chain_when_collapsing_all_then_chain_top_is_found() {
    // Arrange: only y is expanded, root stays collapsed
    let (mut tree, _, _, y, y1, _) = sample_tree();
    tree.expand(y);

    // Act: walk from y1 stops at y (root is not expanded)
    tree.collapse_all(y1);

    // Assert
    assert!(!expanded(&tree, y));
    assert_view_invariant(&tree);
}

// ============================================================
// Round trip
// ============================================================

#[test]
fn given_collapse_then_expand_all_then_same_leaf_set_as_before() {
    // Arrange
    let (mut tree, root, _, _, y1, _) = sample_tree();
    tree.expand_all(root);
    tree.update_rectangles(Rect::new(0, 0, 100, 10));
    let before = tree.rectangles();

    // Act
    tree.collapse(y1);
    tree.expand_all(root);

    // Assert
    assert_eq!(tree.rectangles(), before);
}
