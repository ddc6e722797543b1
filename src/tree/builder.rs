//! Recursive top-down construction

use super::Tree;
use crate::allocator::NodeAllocator;

/// Build a complete binary tree of `depth`, taking ownership of `allocator`
///
/// Each node is allocated before its children; the right subtree is built
/// before the left one so an arena's cursor ends up in the same state on
/// every run. Depth 0 is a single leaf.
pub fn build_tree<A: NodeAllocator>(depth: u32, mut allocator: A) -> Tree<A> {
    let root = grow(depth, &mut allocator);
    Tree {
        allocator,
        root,
        depth,
    }
}

fn grow<A: NodeAllocator>(depth: u32, allocator: &mut A) -> A::Link {
    let mut node = allocator.new_node();
    if depth > 0 {
        let right = grow(depth - 1, allocator);
        let left = grow(depth - 1, allocator);
        allocator.attach(&mut node, right, left);
    }
    node
}
