//! Interactive treemap core.
//!
//! A multi-way tree ([`TreeArena`]) whose nodes carry an aggregate
//! size, a display color and expand/collapse view state, plus the
//! operations a treemap client needs:
//!
//! - strip-subdivision layout into a target rectangle
//!   ([`TreeArena::update_rectangles`]),
//! - the visible-leaf rendering surface ([`TreeArena::rectangles`])
//!   and position hit-testing ([`TreeArena::node_at`]),
//! - mutations that preserve the aggregation invariant together with
//!   an explicit [`TreeArena::recompute_sizes`] pass,
//! - builders that populate trees from a filesystem subtree or a
//!   nested category mapping ([`builder`]).
//!
//! Everything is synchronous and in-memory; I/O happens only in the
//! builders at construction time.

pub mod arena;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod geometry;
pub mod path;
pub mod util;

mod aggregate;
mod layout;
mod view;

pub use arena::{LeafDetail, TreeArena, TreeNode};
pub use errors::{TreeError, TreeResult};
pub use geometry::{Pos, Rect, Rgb};
