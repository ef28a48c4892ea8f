//! Path-string rendering over tree variants.
//!
//! Each tree variant supplies a separator and a leaf/internal suffix
//! through an accessor pair; the rendering routine itself is shared.

use std::fmt;
use std::path::MAIN_SEPARATOR_STR;

use generational_arena::Index;

use crate::arena::TreeArena;

/// Separator and suffix accessors a tree variant supplies for path
/// rendering.
pub trait PathStyle: fmt::Debug {
    /// String placed between segment names.
    fn separator(&self) -> &str;

    /// String appended after a segment name, chosen by whether the
    /// segment is a leaf.
    fn suffix(&self, is_leaf: bool) -> &str;
}

/// Filesystem trees: OS path separator, " (file)" / " (folder)".
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemStyle;

impl PathStyle for FileSystemStyle {
    fn separator(&self) -> &str {
        MAIN_SEPARATOR_STR
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf {
            " (file)"
        } else {
            " (folder)"
        }
    }
}

/// Bibliographic category trees: colon separator, " (Paper)" /
/// " (Category)".
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryStyle;

impl PathStyle for CategoryStyle {
    fn separator(&self) -> &str {
        ":"
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf {
            " (Paper)"
        } else {
            " (Category)"
        }
    }
}

impl TreeArena {
    /// Render the chain from the root to `idx` with the tree's
    /// separator. The suffix is appended at the final segment, and also
    /// mid-path at any segment that itself has no children.
    pub fn path_string(&self, idx: Index) -> String {
        self.path_string_in(idx, true)
    }

    fn path_string_in(&self, idx: Index, final_node: bool) -> String {
        let node = match self.get_node(idx) {
            Some(node) => node,
            None => return String::new(),
        };
        match node.parent {
            None => {
                let mut path = node.name.clone();
                if final_node {
                    path.push_str(self.style().suffix(node.is_leaf()));
                }
                path
            }
            Some(parent) => {
                let mut path = format!(
                    "{}{}{}",
                    self.path_string_in(parent, false),
                    self.style().separator(),
                    node.name
                );
                if final_node || node.is_leaf() {
                    path.push_str(self.style().suffix(node.is_leaf()));
                }
                path
            }
        }
    }
}
