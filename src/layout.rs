//! Strip-subdivision layout, visible-leaf collection and hit testing.
//!
//! The layout partitions a node's rectangle among its children as
//! consecutive strips along the longer axis, each child's share
//! proportional to its fraction of the node's total size. Shares are
//! floored to integer pixels and the last child absorbs the accumulated
//! rounding error, so the strips always reconstruct the parent
//! rectangle exactly.

use generational_arena::Index;
use tracing::instrument;

use crate::arena::TreeArena;
use crate::geometry::{Pos, Rect, Rgb};

impl TreeArena {
    /// Recompute display rectangles for the whole tree inside `rect`.
    ///
    /// A subtree of size 0 is skipped entirely and keeps whatever
    /// rectangle it had; downstream consumers treat those as
    /// degenerate.
    #[instrument(level = "debug", skip(self))]
    pub fn update_rectangles(&mut self, rect: Rect) {
        if let Some(root) = self.root() {
            self.update_rectangles_at(root, rect);
        }
    }

    fn update_rectangles_at(&mut self, idx: Index, rect: Rect) {
        let (size, children) = match self.get_node(idx) {
            Some(node) => (node.size, node.children.clone()),
            None => return,
        };
        if size == 0 {
            return;
        }
        if let Some(node) = self.get_node_mut(idx) {
            node.rect = rect;
        }

        // Cursor walks along the longer axis; each child except the
        // last gets the floor of its proportional share, the last one
        // gets whatever is left of the parent rectangle.
        let mut x = rect.x;
        let mut y = rect.y;
        let last = children.len().saturating_sub(1);
        for (i, &child) in children.iter().enumerate() {
            let child_size = self.get_node(child).map_or(0, |node| node.size);
            let sub = if i < last {
                if rect.width > rect.height {
                    let w = scaled_share(rect.width, child_size, size);
                    let sub = Rect::new(x, y, w, rect.height);
                    x += w;
                    sub
                } else {
                    let h = scaled_share(rect.height, child_size, size);
                    let sub = Rect::new(x, y, rect.width, h);
                    y += h;
                    sub
                }
            } else if rect.width > rect.height {
                Rect::new(x, y, rect.width + rect.x - x, rect.height)
            } else {
                Rect::new(x, y, rect.width, rect.height + rect.y - y)
            };
            self.update_rectangles_at(child, sub);
        }
    }

    /// The (rectangle, color) pairs of every visible leaf of the
    /// displayed tree, in declared child order. A node with children
    /// that is not expanded is drawn as a single block. The empty tree
    /// produces an empty list.
    #[instrument(level = "debug", skip(self))]
    pub fn rectangles(&self) -> Vec<(Rect, Rgb)> {
        let mut out = Vec::new();
        if let Some(root) = self.root() {
            self.collect_rectangles(root, &mut out);
        }
        out
    }

    fn collect_rectangles(&self, idx: Index, out: &mut Vec<(Rect, Rgb)>) {
        if let Some(node) = self.get_node(idx) {
            if node.is_leaf() || !node.expanded {
                out.push((node.rect, node.color));
            } else {
                for &child in &node.children {
                    self.collect_rectangles(child, out);
                }
            }
        }
    }

    /// The visible leaf whose rectangle contains `pos` (inclusive on
    /// all edges), or None if `pos` lies outside every visible leaf.
    ///
    /// On a shared edge the rectangle whose origin is closer to the
    /// overall origin wins: strictly smaller y, or equal y and strictly
    /// smaller x, replaces the current candidate. With three or more
    /// siblings meeting in one boundary point the winner additionally
    /// depends on traversal order; pairs are always resolved as stated.
    #[instrument(level = "debug", skip(self))]
    pub fn node_at(&self, pos: Pos) -> Option<Index> {
        self.root().and_then(|root| self.node_at_in(root, pos))
    }

    fn node_at_in(&self, idx: Index, pos: Pos) -> Option<Index> {
        let node = self.get_node(idx)?;
        if node.is_leaf() || !node.expanded {
            return node.rect.contains(pos).then_some(idx);
        }

        let mut found: Option<(Index, Rect)> = None;
        for &child in &node.children {
            if let Some(hit) = self.node_at_in(child, pos) {
                let hit_rect = self.get_node(hit)?.rect;
                found = match found {
                    None => Some((hit, hit_rect)),
                    Some((_, best))
                        if hit_rect.y < best.y
                            || (hit_rect.y == best.y && hit_rect.x < best.x) =>
                    {
                        Some((hit, hit_rect))
                    }
                    keep => keep,
                };
            }
        }
        found.map(|(idx, _)| idx)
    }
}

/// floor(axis * size / total) without intermediate overflow.
fn scaled_share(axis: i32, size: u64, total: u64) -> i32 {
    debug_assert!(total > 0);
    (axis as i128 * size as i128 / total as i128) as i32
}
