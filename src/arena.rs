use generational_arena::{Arena, Index};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use crate::geometry::{Rect, Rgb};
use crate::path::{FileSystemStyle, PathStyle};

/// Secondary leaf attributes carried by dataset-backed trees
/// (e.g. the authors and URL of a paper). Filesystem leaves and
/// internal nodes carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDetail {
    pub authors: String,
    pub url: String,
}

/// Tree node in the arena-based hierarchy structure.
///
/// `size` is authoritative for leaves; for internal nodes it equals the
/// sum of the children's sizes after [`TreeArena::recompute_sizes`] and
/// may diverge transiently between a mutation and the next recompute.
/// `rect` is a cached display region, rewritten by every layout pass.
#[derive(Debug)]
pub struct TreeNode {
    /// Node label (file/folder base name, category, or paper title)
    pub name: String,
    /// Aggregate weight: file bytes, citation count, ...
    pub size: u64,
    /// Display color, fixed at creation
    pub color: Rgb,
    /// View state; meaningful only for nodes with children
    pub expanded: bool,
    /// Last-computed display rectangle
    pub rect: Rect,
    /// Secondary attributes for dataset leaves
    pub detail: Option<LeafDetail>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in declared (draw) order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based multi-way tree for treemap visualization.
///
/// Nodes own their children through the `children` index list; the
/// `parent` back-reference is a plain arena handle, so no ownership
/// cycle exists and dropping the arena reclaims everything. The empty
/// tree is an arena with no root.
///
/// Trees are built bottom-up: leaves first, then internal nodes
/// adopting already-built children, with the aggregate size computed at
/// adoption time.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for the empty tree
    root: Option<Index>,
    /// Color source; per-tree so tests can seed it
    rng: StdRng,
    /// Separator/suffix accessors for path rendering
    style: Box<dyn PathStyle>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self::with_style(Box::new(FileSystemStyle))
    }

    pub fn with_style(style: Box<dyn PathStyle>) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            rng: StdRng::from_entropy(),
            style,
        }
    }

    /// Seed the color generator for reproducible tests.
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Insert a leaf node. Its size is taken verbatim.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_leaf(&mut self, name: impl Into<String> + std::fmt::Debug, size: u64) -> Index {
        self.insert_node(name.into(), size, None, Vec::new())
    }

    /// Insert a leaf node carrying secondary attributes.
    #[instrument(level = "trace", skip(self, detail))]
    pub fn insert_leaf_with_detail(
        &mut self,
        name: impl Into<String> + std::fmt::Debug,
        size: u64,
        detail: LeafDetail,
    ) -> Index {
        self.insert_node(name.into(), size, Some(detail), Vec::new())
    }

    /// Insert an internal node adopting already-built subtrees.
    ///
    /// Each child's parent back-reference is set to the new node, and
    /// the new node's size is the sum of the leaf sizes of the adopted
    /// subtrees at this point. Adopted children must not already have a
    /// parent. With an empty child list this degenerates to a size-0
    /// leaf (an empty directory behaves exactly like that).
    #[instrument(level = "trace", skip(self, children))]
    pub fn insert_internal(
        &mut self,
        name: impl Into<String> + std::fmt::Debug,
        children: Vec<Index>,
    ) -> Index {
        let size = children
            .iter()
            .map(|&child| self.subtree_leaf_size(child))
            .sum();
        self.insert_node(name.into(), size, None, children)
    }

    fn insert_node(
        &mut self,
        name: String,
        size: u64,
        detail: Option<LeafDetail>,
        children: Vec<Index>,
    ) -> Index {
        let color = self.next_color();
        let idx = self.arena.insert(TreeNode {
            name,
            size,
            color,
            expanded: false,
            rect: Rect::ZERO,
            detail,
            parent: None,
            children: children.clone(),
        });
        for child in children {
            if let Some(node) = self.arena.get_mut(child) {
                debug_assert!(node.parent.is_none(), "adopted child already has a parent");
                node.parent = Some(idx);
            }
        }
        idx
    }

    /// Pin the root of the tree. The root must be parentless.
    pub fn set_root(&mut self, idx: Index) {
        debug_assert!(self
            .get_node(idx)
            .map_or(false, |node| node.parent.is_none()));
        self.root = Some(idx);
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// True iff this is the empty tree (no root pinned).
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub(crate) fn style(&self) -> &dyn PathStyle {
        self.style.as_ref()
    }

    fn next_color(&mut self) -> Rgb {
        let [r, g, b] = self.rng.gen::<[u8; 3]>();
        Rgb(r, g, b)
    }

    /// Sum of the leaf sizes of the subtree rooted at `idx`.
    fn subtree_leaf_size(&self, idx: Index) -> u64 {
        match self.get_node(idx) {
            Some(node) if node.is_leaf() => node.size,
            Some(node) => node
                .children
                .iter()
                .map(|&child| self.subtree_leaf_size(child))
                .sum(),
            None => 0,
        }
    }

    /// Pre-order traversal, children in declared order.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Post-order traversal (children before their parent).
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Indices of all leaf nodes in pre-order. Empty trees return an
    /// empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
