//! Heap allocation per node

use super::NodeAllocator;

/// Independently boxed node; owns its subtree
#[derive(Debug, Default)]
pub struct HeapNode {
    /// Left child
    pub left: Option<Box<HeapNode>>,

    /// Right child
    pub right: Option<Box<HeapNode>>,
}

/// Stateless strategy: every call is a fresh `Box`
///
/// Dropping the root releases the whole tree node by node.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveAllocator;

impl NodeAllocator for NaiveAllocator {
    type Link = Box<HeapNode>;

    fn for_depth(_depth: u32) -> Self {
        NaiveAllocator
    }

    #[inline]
    fn new_node(&mut self) -> Self::Link {
        Box::default()
    }

    #[inline]
    fn attach(&mut self, parent: &mut Self::Link, right: Self::Link, left: Self::Link) {
        parent.right = Some(right);
        parent.left = Some(left);
    }

    #[inline]
    fn children<'a>(&'a self, node: &'a Self::Link) -> Option<(&'a Self::Link, &'a Self::Link)> {
        match (&node.right, &node.left) {
            (Some(right), Some(left)) => Some((right, left)),
            _ => None,
        }
    }
}
