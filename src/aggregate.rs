//! Size aggregation and the mutations that disturb it.
//!
//! Mutations update the tree locally and leave ancestor sizes stale on
//! purpose; callers batch mutations and then run
//! [`TreeArena::recompute_sizes`] once before the next layout pass.

use generational_arena::Index;
use tracing::instrument;

use crate::arena::TreeArena;
use crate::geometry::Rect;

impl TreeArena {
    /// Re-establish the aggregation invariant over the whole tree.
    ///
    /// Post-order pass: leaves keep their stored size, internal nodes
    /// store the sum of their children's recomputed sizes. An internal
    /// node whose new size is 0 gets its rectangle reset to
    /// [`Rect::ZERO`]. Returns the root's size, 0 for the empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn recompute_sizes(&mut self) -> u64 {
        // Post-order guarantees children are finalized before their parent.
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            let children = match self.get_node(idx) {
                Some(node) if !node.is_leaf() => node.children.clone(),
                _ => continue,
            };
            let total: u64 = children
                .iter()
                .filter_map(|&child| self.get_node(child))
                .map(|child| child.size)
                .sum();
            if let Some(node) = self.get_node_mut(idx) {
                node.size = total;
                if total == 0 {
                    node.rect = Rect::ZERO;
                }
            }
        }
        self.root()
            .and_then(|root| self.get_node(root))
            .map_or(0, |node| node.size)
    }

    /// Move a leaf to become the last child of `destination`.
    ///
    /// Takes effect only when `node` is currently a leaf with a parent
    /// and `destination` currently has children; otherwise this is a
    /// silent no-op. A vacated parent left childless gets its size
    /// zeroed and its rectangle reset, but ancestors above it stay
    /// stale until the next [`TreeArena::recompute_sizes`].
    #[instrument(level = "debug", skip(self))]
    pub fn move_leaf(&mut self, node: Index, destination: Index) {
        let old_parent = match self.get_node(node) {
            Some(n) if n.is_leaf() => match n.parent {
                Some(parent) => parent,
                None => return,
            },
            _ => return,
        };
        match self.get_node(destination) {
            Some(dest) if !dest.is_leaf() => {}
            _ => return,
        }

        if let Some(parent) = self.get_node_mut(old_parent) {
            parent.children.retain(|&child| child != node);
        }
        if let Some(dest) = self.get_node_mut(destination) {
            dest.children.push(node);
        }
        // Checked after the append so that a move within the same parent
        // never zeroes it.
        if let Some(parent) = self.get_node_mut(old_parent) {
            if parent.children.is_empty() {
                parent.size = 0;
                parent.rect = Rect::ZERO;
            }
        }
        if let Some(n) = self.get_node_mut(node) {
            n.parent = Some(destination);
        }
    }

    /// Scale a leaf's size by `factor`.
    ///
    /// The delta is `ceil(|size * factor|)`, added for non-negative
    /// factors and subtracted otherwise, and the result never drops
    /// below 1 so a leaf cannot silently vanish from the layout.
    /// No-op on internal nodes. Ancestors are not updated.
    #[instrument(level = "debug", skip(self))]
    pub fn change_size(&mut self, node: Index, factor: f64) {
        if let Some(n) = self.get_node_mut(node) {
            if !n.is_leaf() {
                return;
            }
            let delta = (n.size as f64 * factor).abs().ceil() as u64;
            let new_size = if factor >= 0.0 {
                n.size.saturating_add(delta)
            } else {
                n.size.saturating_sub(delta)
            };
            n.size = new_size.max(1);
        }
    }
}
