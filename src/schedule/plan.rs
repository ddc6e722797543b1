//! Depth enumeration and position tags
//!
//! For problem size `n`:
//! - `max_depth = max(n, min_depth + 2)`
//! - `stretch_depth = max_depth + 1`
//! - one iterated item per depth `min_depth, min_depth + 2, ..= max_depth`,
//!   repeated `2^(max_depth - depth + min_depth)` times
//! - a stretch tree (tag 0, reported first) and a long-lived tree
//!   (tag `u32::MAX`, reported last)

use crate::BenchError;

/// Default minimum depth
pub const MIN_DEPTH: u32 = 4;

/// Deepest long-lived tree a plan may ask for
///
/// The stretch tree sits one level lower and its node count must fit a `u32`.
pub const MAX_DEPTH: u32 = 29;

/// Ordering key assigned at enumeration time
pub type PositionTag = u32;

/// Tag of the stretch tree
pub const STRETCH_TAG: PositionTag = 0;

/// Tag of the long-lived tree
pub const LONG_LIVED_TAG: PositionTag = PositionTag::MAX;

/// What a work item computes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WorkKind {
    /// One tree at `max_depth + 1`
    Stretch,

    /// `iterations` fresh trees, checks summed
    Iterated {
        /// Trees built
        iterations: u32,
    },

    /// One tree at `max_depth`
    LongLived,
}

/// One unit of scheduled work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    /// Report position
    pub tag: PositionTag,

    /// Tree depth
    pub depth: u32,

    /// Stretch, iterated or long-lived
    pub kind: WorkKind,
}

impl WorkItem {
    /// Trees this item builds
    pub fn iterations(&self) -> u32 {
        match self.kind {
            WorkKind::Iterated { iterations } => iterations,
            WorkKind::Stretch | WorkKind::LongLived => 1,
        }
    }
}

/// Full work-item set for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthPlan {
    min_depth: u32,
    max_depth: u32,
    depth_items: Vec<WorkItem>,
}

impl DepthPlan {
    /// Enumerate work for problem size `size`
    ///
    /// Fails when the deepest tree would exceed [`MAX_DEPTH`].
    pub fn new(size: u32, min_depth: u32) -> Result<Self, BenchError> {
        let max_depth = size.max(min_depth.saturating_add(2));
        if max_depth > MAX_DEPTH {
            return Err(BenchError::DepthOutOfRange {
                max_depth,
                limit: MAX_DEPTH,
            });
        }

        let depth_items = (min_depth..=max_depth)
            .step_by(2)
            .zip(1..)
            .map(|(depth, tag)| WorkItem {
                tag,
                depth,
                kind: WorkKind::Iterated {
                    iterations: 1 << (max_depth - depth + min_depth),
                },
            })
            .collect();

        Ok(Self {
            min_depth,
            max_depth,
            depth_items,
        })
    }

    /// Smallest iterated depth
    pub fn min_depth(&self) -> u32 {
        self.min_depth
    }

    /// Depth of the long-lived tree and the deepest iterated item
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Depth of the stretch tree
    pub fn stretch_depth(&self) -> u32 {
        self.max_depth + 1
    }

    /// Iterated items in ascending depth order
    pub fn depth_items(&self) -> &[WorkItem] {
        &self.depth_items
    }

    /// The stretch item
    pub fn stretch(&self) -> WorkItem {
        WorkItem {
            tag: STRETCH_TAG,
            depth: self.stretch_depth(),
            kind: WorkKind::Stretch,
        }
    }

    /// The long-lived item
    pub fn long_lived(&self) -> WorkItem {
        WorkItem {
            tag: LONG_LIVED_TAG,
            depth: self.max_depth,
            kind: WorkKind::LongLived,
        }
    }

    /// Number of results a run must collect
    pub fn expected_count(&self) -> usize {
        self.depth_items.len() + 2
    }

    /// Items in launch order: iterated depths, then stretch, then long-lived
    pub fn dispatch_order(&self) -> Vec<WorkItem> {
        let mut items = Vec::with_capacity(self.expected_count());
        items.extend_from_slice(&self.depth_items);
        items.push(self.stretch());
        items.push(self.long_lived());
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_zero() {
        let plan = DepthPlan::new(0, MIN_DEPTH).unwrap();
        assert_eq!(plan.min_depth(), MIN_DEPTH);
        assert_eq!(plan.max_depth(), 6);
        assert_eq!(plan.stretch_depth(), 7);

        let items: Vec<(u32, u32)> = plan
            .depth_items()
            .iter()
            .map(|item| (item.depth, item.iterations()))
            .collect();
        assert_eq!(items, vec![(4, 64), (6, 16)]);
        assert_eq!(plan.expected_count(), 4);
    }

    #[test]
    fn test_odd_size_stops_below_max() {
        let plan = DepthPlan::new(7, MIN_DEPTH).unwrap();
        let depths: Vec<u32> = plan.depth_items().iter().map(|item| item.depth).collect();
        assert_eq!(depths, vec![4, 6]);
        assert_eq!(plan.long_lived().depth, 7);
        assert_eq!(plan.stretch().depth, 8);
    }

    #[test]
    fn test_tags_strictly_between_fixed_items() {
        let plan = DepthPlan::new(21, MIN_DEPTH).unwrap();
        let tags: Vec<PositionTag> = plan.depth_items().iter().map(|item| item.tag).collect();

        assert!(tags.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(tags.iter().all(|&tag| STRETCH_TAG < tag && tag < LONG_LIVED_TAG));
    }

    #[test]
    fn test_depth_limit() {
        let plan = DepthPlan::new(MAX_DEPTH, MIN_DEPTH).unwrap();
        assert_eq!(plan.stretch_depth(), MAX_DEPTH + 1);
        assert_eq!(plan.depth_items()[0].iterations(), 1 << MAX_DEPTH);

        for (size, min_depth) in [(MAX_DEPTH + 1, MIN_DEPTH), (32, MIN_DEPTH), (0, u32::MAX)] {
            assert!(matches!(
                DepthPlan::new(size, min_depth),
                Err(BenchError::DepthOutOfRange { limit: MAX_DEPTH, .. })
            ));
        }
    }

    #[test]
    fn test_dispatch_order_holds_every_item_once() {
        let plan = DepthPlan::new(10, MIN_DEPTH).unwrap();
        let order = plan.dispatch_order();
        assert_eq!(order.len(), plan.expected_count());
        assert_eq!(order[order.len() - 2].kind, WorkKind::Stretch);
        assert_eq!(order[order.len() - 1].kind, WorkKind::LongLived);
    }
}
