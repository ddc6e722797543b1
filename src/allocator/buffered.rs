//! Arena allocation: one contiguous buffer per tree
//!
//! The buffer holds `2^(depth+1)` slots, one more than a complete tree of
//! `depth` needs (`2^(depth+1) - 1`). Nodes are handed out by bumping a
//! cursor and refer to their children by index, so the arena is the only
//! owner and the whole tree is freed in one deallocation.

use std::fmt;

use super::NodeAllocator;

/// Index of a node inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the arena buffer
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaNode {
    /// Left child
    pub left: Option<NodeId>,

    /// Right child
    pub right: Option<NodeId>,
}

/// Pre-sized arena for exactly one tree
///
/// Slots start out as leaves and are never recycled. Allocating past
/// capacity is a sizing bug: debug builds assert on it and linking such a
/// node panics on the out-of-range index.
#[derive(Debug)]
pub struct BufferedAllocator {
    nodes: Vec<ArenaNode>,
    cursor: usize,
}

impl BufferedAllocator {
    /// Arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: vec![ArenaNode::default(); capacity],
            cursor: 0,
        }
    }

    /// Slots in the arena
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of `new_node` calls served so far
    pub fn allocated(&self) -> usize {
        self.cursor
    }

    /// Slots still free
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.cursor)
    }

    /// Slot behind `id`
    #[inline]
    pub fn node(&self, id: NodeId) -> &ArenaNode {
        &self.nodes[id.index()]
    }
}

impl NodeAllocator for BufferedAllocator {
    type Link = NodeId;

    fn for_depth(depth: u32) -> Self {
        Self::with_capacity(1usize << (depth + 1))
    }

    #[inline]
    fn new_node(&mut self) -> Self::Link {
        debug_assert!(
            self.cursor < self.nodes.len(),
            "arena of {} nodes exhausted",
            self.nodes.len()
        );
        let id = self.cursor;
        self.cursor += 1;
        NodeId(id as u32)
    }

    #[inline]
    fn attach(&mut self, parent: &mut Self::Link, right: Self::Link, left: Self::Link) {
        let slot = &mut self.nodes[parent.index()];
        slot.right = Some(right);
        slot.left = Some(left);
    }

    #[inline]
    fn children<'a>(&'a self, node: &'a Self::Link) -> Option<(&'a Self::Link, &'a Self::Link)> {
        let slot = &self.nodes[node.index()];
        match (&slot.right, &slot.left) {
            (Some(right), Some(left)) => Some((right, left)),
            _ => None,
        }
    }
}
