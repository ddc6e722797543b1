//! Tree construction and check values across both strategies

use binary_trees::tree::expected_check;
use binary_trees::{build_tree, AllocatorKind, BufferedAllocator, NaiveAllocator, NodeAllocator};
use proptest::prelude::*;

proptest! {
    #[test]
    fn check_counts_every_node(depth in 0u32..14) {
        let naive = build_tree(depth, NaiveAllocator::for_depth(depth));
        let buffered = build_tree(depth, BufferedAllocator::for_depth(depth));

        prop_assert_eq!(naive.item_check(), expected_check(depth));
        prop_assert_eq!(buffered.item_check(), naive.item_check(), "strategies must agree");
    }

    #[test]
    fn buffered_allocates_exactly_one_tree(depth in 0u32..14) {
        let tree = build_tree(depth, BufferedAllocator::for_depth(depth));
        let arena = tree.allocator();

        prop_assert_eq!(arena.allocated() as u32, expected_check(depth));
        prop_assert!(arena.allocated() < arena.capacity(), "never past capacity");
    }
}

#[test]
fn every_internal_node_has_two_children() {
    let tree = build_tree(6, BufferedAllocator::for_depth(6));
    let arena = tree.allocator();

    let mut stack = vec![*tree.root()];
    let mut leaves = 0;
    while let Some(id) = stack.pop() {
        let slot = arena.node(id);
        match (slot.left, slot.right) {
            (Some(left), Some(right)) => {
                stack.push(left);
                stack.push(right);
            }
            (None, None) => leaves += 1,
            _ => panic!("node {} has a single child", id),
        }
    }
    assert_eq!(leaves, 1 << 6);
}

#[test]
fn factory_builds_matching_trees() {
    for depth in [0, 1, 4, 6, 7, 10] {
        let checks: Vec<u32> = AllocatorKind::ALL
            .iter()
            .map(|kind| kind.tree_check(depth))
            .collect();
        assert!(checks.iter().all(|&check| check == expected_check(depth)));
    }
}
