//! Expand/collapse view state.
//!
//! View state is independent of the underlying data: it only controls
//! which nodes the displayed tree treats as visible leaves. Leaves are
//! permanently collapsed. Every transition leaves the tree in a state
//! where an expanded node's ancestors are expanded and a collapsed
//! node's descendants are collapsed.

use generational_arena::Index;
use tracing::instrument;

use crate::arena::TreeArena;

impl TreeArena {
    /// Expand this node only. No effect on leaves, ancestors or
    /// descendants.
    #[instrument(level = "trace", skip(self))]
    pub fn expand(&mut self, idx: Index) {
        if let Some(node) = self.get_node_mut(idx) {
            if !node.is_leaf() {
                node.expanded = true;
            }
        }
    }

    /// Expand this node and every internal node below it.
    #[instrument(level = "trace", skip(self))]
    pub fn expand_all(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get_node_mut(current) {
                if node.is_leaf() {
                    continue;
                }
                node.expanded = true;
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Collapse the subtree this node lives in, one level up: if the
    /// parent is currently expanded, the parent and everything under it
    /// become collapsed. A root or an already-hidden node is left
    /// alone.
    #[instrument(level = "trace", skip(self))]
    pub fn collapse(&mut self, idx: Index) {
        let parent = self.get_node(idx).and_then(|node| node.parent);
        if let Some(parent) = parent {
            if self.get_node(parent).map_or(false, |node| node.expanded) {
                self.collapse_below(parent);
            }
        }
    }

    /// Collapse the topmost expanded ancestor's entire subtree: walks
    /// up while the parent chain is expanded, then collapses everything
    /// under the node it stopped at.
    #[instrument(level = "trace", skip(self))]
    pub fn collapse_all(&mut self, idx: Index) {
        let mut current = idx;
        while let Some(parent) = self.get_node(current).and_then(|node| node.parent) {
            if !self.get_node(parent).map_or(false, |node| node.expanded) {
                break;
            }
            current = parent;
        }
        self.collapse_below(current);
    }

    /// Collapse `idx` and every internal node below it.
    fn collapse_below(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get_node_mut(current) {
                if node.is_leaf() {
                    continue;
                }
                node.expanded = false;
                stack.extend(node.children.iter().copied());
            }
        }
    }
}
