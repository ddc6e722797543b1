//! Complete binary trees
//!
//! A tree is built top-down by [`build_tree`] through a [`NodeAllocator`]
//! and checked by counting its nodes. Every node has zero or two children;
//! a tree of depth `d` always has `2^(d+1) - 1` nodes.
//!
//! [`NodeAllocator`]: crate::allocator::NodeAllocator

mod builder;
mod node;

pub use builder::build_tree;
pub use node::Tree;

/// Node count of a complete tree of `depth`, saturating at `u32::MAX`
pub fn expected_check(depth: u32) -> u32 {
    1u32
        .checked_shl(depth.saturating_add(1))
        .map_or(u32::MAX, |slots| slots - 1)
}
