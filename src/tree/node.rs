//! Tree handle: a root link plus the allocator that owns the nodes

use crate::allocator::NodeAllocator;

/// One complete binary tree
///
/// The tree keeps its allocator alive. With the buffered strategy that
/// allocator is the arena holding every node, so dropping the tree frees
/// them all at once; with the naive strategy the root box owns the rest.
#[derive(Debug)]
pub struct Tree<A: NodeAllocator> {
    pub(super) allocator: A,
    pub(super) root: A::Link,
    pub(super) depth: u32,
}

impl<A: NodeAllocator> Tree<A> {
    /// Depth the tree was built at
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Allocator that produced the nodes
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Root link
    pub fn root(&self) -> &A::Link {
        &self.root
    }

    /// Structural check: number of nodes in the tree
    pub fn item_check(&self) -> u32 {
        self.check_from(&self.root)
    }

    fn check_from(&self, node: &A::Link) -> u32 {
        match self.allocator.children(node) {
            Some((right, left)) => 1 + self.check_from(right) + self.check_from(left),
            None => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{BufferedAllocator, NaiveAllocator};

    #[test]
    fn test_single_node_checks_one() {
        let mut allocator = NaiveAllocator;
        let root = allocator.new_node();
        let tree = Tree { allocator, root, depth: 0 };
        assert_eq!(tree.item_check(), 1);
    }

    #[test]
    fn test_hand_linked_arena_tree() {
        let mut allocator = BufferedAllocator::for_depth(1);
        let mut root = allocator.new_node();
        let right = allocator.new_node();
        let left = allocator.new_node();
        allocator.attach(&mut root, right, left);

        let tree = Tree { allocator, root, depth: 1 };
        assert_eq!(tree.item_check(), 3);
        assert_eq!(tree.allocator().allocated(), 3);
    }
}
