//! Node allocation strategies
//!
//! Two ways to obtain tree nodes:
//! - [`NaiveAllocator`]: one heap allocation per node, nodes own their children
//! - [`BufferedAllocator`]: one contiguous arena sized for a whole tree,
//!   children are indices into it
//!
//! An allocator instance builds exactly one tree and is dropped with it.

mod buffered;
mod naive;

use std::fmt;
use std::str::FromStr;

pub use buffered::{ArenaNode, BufferedAllocator, NodeId};
pub use naive::{HeapNode, NaiveAllocator};

use crate::tree::build_tree;
use crate::BenchError;

/// Capability shared by both strategies
///
/// `Link` is whatever a parent holds to reach a child: an owned box for the
/// naive strategy, an arena index for the buffered one.
pub trait NodeAllocator {
    /// Handle to one allocated node
    type Link;

    /// Fresh allocator able to hold one complete tree of `depth`
    fn for_depth(depth: u32) -> Self
    where
        Self: Sized;

    /// Allocate a single childless node
    fn new_node(&mut self) -> Self::Link;

    /// Hang `right` and `left` under `parent`
    fn attach(&mut self, parent: &mut Self::Link, right: Self::Link, left: Self::Link);

    /// Children of `node` as `(right, left)`, or `None` for a leaf
    fn children<'a>(&'a self, node: &'a Self::Link) -> Option<(&'a Self::Link, &'a Self::Link)>;
}

/// Allocation strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AllocatorKind {
    /// Heap allocation per node
    #[default]
    Naive,

    /// Pre-sized arena per tree
    Buffered,
}

impl AllocatorKind {
    /// All supported kinds
    pub const ALL: [AllocatorKind; 2] = [AllocatorKind::Naive, AllocatorKind::Buffered];

    /// Selector spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocatorKind::Naive => "naive",
            AllocatorKind::Buffered => "buffered",
        }
    }

    /// Build one tree of `depth` with a fresh allocator of this kind and
    /// return its check value.
    pub fn tree_check(self, depth: u32) -> u32 {
        match self {
            AllocatorKind::Naive => build_tree(depth, NaiveAllocator::for_depth(depth)).item_check(),
            AllocatorKind::Buffered => {
                build_tree(depth, BufferedAllocator::for_depth(depth)).item_check()
            }
        }
    }
}

impl fmt::Display for AllocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocatorKind {
    type Err = BenchError;

    /// Accepts the names and the legacy numeric selectors (`0`, `1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" | "0" => Ok(AllocatorKind::Naive),
            "buffered" | "1" => Ok(AllocatorKind::Buffered),
            _ => Err(BenchError::UnsupportedAllocator(s.to_string())),
        }
    }
}
