//! Tests for TreeArena construction and traversal

use tmap::TreeArena;

/// root (100)
/// ├── a (30)
/// └── b (70)
///     ├── b1 (10)
///     ├── b2 (25)
///     └── b3 (35)
fn sample_tree() -> TreeArena {
    let mut tree = TreeArena::new().with_color_seed(7);
    let a = tree.insert_leaf("a", 30);
    let b1 = tree.insert_leaf("b1", 10);
    let b2 = tree.insert_leaf("b2", 25);
    let b3 = tree.insert_leaf("b3", 35);
    let b = tree.insert_internal("b", vec![b1, b2, b3]);
    let root = tree.insert_internal("root", vec![a, b]);
    tree.set_root(root);
    tree
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_leaves_when_wrapping_internal_then_size_is_subtree_sum() {
    // Arrange
    let mut tree = TreeArena::new();
    let b1 = tree.insert_leaf("b1", 10);
    let b2 = tree.insert_leaf("b2", 25);

    // Act
    let b = tree.insert_internal("b", vec![b1, b2]);

    // Assert
    assert_eq!(tree.get_node(b).unwrap().size, 35);
}

#[test]
fn given_nested_internals_when_wrapping_then_size_sums_whole_subtree() {
    let tree = sample_tree();
    let root = tree.root().unwrap();

    assert_eq!(tree.get_node(root).unwrap().size, 100);
}

#[test]
fn given_internal_when_inserting_then_children_point_back_to_parent() {
    // Arrange
    let mut tree = TreeArena::new();
    let a = tree.insert_leaf("a", 1);
    let b = tree.insert_leaf("b", 2);

    // Act
    let parent = tree.insert_internal("parent", vec![a, b]);

    // Assert
    assert_eq!(tree.get_node(a).unwrap().parent, Some(parent));
    assert_eq!(tree.get_node(b).unwrap().parent, Some(parent));
    assert_eq!(tree.get_node(parent).unwrap().parent, None);
    assert_eq!(tree.get_node(parent).unwrap().children, vec![a, b]);
}

#[test]
fn given_empty_child_list_when_wrapping_then_node_is_a_size_zero_leaf() {
    let mut tree = TreeArena::new();

    let node = tree.insert_internal("empty-dir", vec![]);

    let node = tree.get_node(node).unwrap();
    assert!(node.is_leaf());
    assert_eq!(node.size, 0);
}

#[test]
fn given_new_node_then_it_starts_collapsed_with_zero_rect() {
    let tree = sample_tree();
    for (_, node) in tree.iter() {
        assert!(!node.expanded);
        assert_eq!(node.rect, tmap::Rect::ZERO);
    }
}

// ============================================================
// Empty tree sentinel
// ============================================================

#[test]
fn given_fresh_arena_then_it_is_the_empty_tree() {
    let tree = TreeArena::new();

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.depth(), 0);
    assert!(tree.leaf_nodes().is_empty());
    assert!(tree.rectangles().is_empty());
}

#[test]
fn given_rooted_tree_then_it_is_not_empty() {
    let tree = sample_tree();
    assert!(!tree.is_empty());
}

// ============================================================
// Traversal
// ============================================================

#[test]
fn given_tree_when_iterating_preorder_then_parents_before_children_in_declared_order() {
    let tree = sample_tree();

    let names: Vec<&str> = tree.iter().map(|(_, node)| node.name.as_str()).collect();

    assert_eq!(names, vec!["root", "a", "b", "b1", "b2", "b3"]);
}

#[test]
fn given_tree_when_iterating_postorder_then_children_before_parents() {
    let tree = sample_tree();

    let names: Vec<&str> = tree
        .iter_postorder()
        .map(|(_, node)| node.name.as_str())
        .collect();

    assert_eq!(names, vec!["a", "b1", "b2", "b3", "b", "root"]);
}

#[test]
fn given_tree_when_collecting_leaves_then_preorder_leaf_indices() {
    let tree = sample_tree();

    let leaves: Vec<&str> = tree
        .leaf_nodes()
        .into_iter()
        .map(|idx| tree.get_node(idx).unwrap().name.as_str())
        .collect();

    assert_eq!(leaves, vec!["a", "b1", "b2", "b3"]);
}

#[test]
fn given_sample_tree_then_depth_counts_levels() {
    let tree = sample_tree();
    assert_eq!(tree.depth(), 3);
}

// ============================================================
// Colors
// ============================================================

#[test]
fn given_same_seed_when_building_twice_then_colors_are_reproducible() {
    let first = sample_tree();
    let second = sample_tree();

    let colors_first: Vec<_> = first.iter().map(|(_, node)| node.color).collect();
    let colors_second: Vec<_> = second.iter().map(|(_, node)| node.color).collect();

    assert_eq!(colors_first, colors_second);
}

#[test]
fn given_one_arena_then_node_colors_vary() {
    let tree = sample_tree();

    let colors: Vec<_> = tree.iter().map(|(_, node)| node.color).collect();

    // Six nodes from one seeded stream; at least two must differ.
    assert!(colors.windows(2).any(|pair| pair[0] != pair[1]));
}
