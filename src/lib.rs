//! # Binary Trees under Two Allocation Strategies
//!
//! Builds and checks many complete binary trees of varying depth, once
//! with a heap allocation per node and once with a pre-sized arena per
//! tree, fanned out over a worker pool bounded by hardware parallelism.
//!
//! ## Core Pieces
//!
//! 1. **Allocators**: [`NaiveAllocator`] boxes every node, [`BufferedAllocator`]
//!    carves nodes from one buffer of `2^(depth+1)` slots
//! 2. **Builder**: [`build_tree`] grows a complete tree top-down, right
//!    subtree first; [`Tree::item_check`] counts its nodes
//! 3. **Scheduler**: [`Scheduler::run`] enumerates the depth plan, runs one
//!    task per item under a [`PermitPool`], and sorts tagged results
//! 4. **Report**: [`Report`] renders lines in position-tag order
//!
//! ## Usage Example
//!
//! ```no_run
//! use binary_trees::{AllocatorKind, BenchConfig, Scheduler};
//!
//! # async fn demo() -> Result<(), binary_trees::BenchError> {
//! let config = BenchConfig::new(10, "buffered".parse::<AllocatorKind>()?);
//! let report = Scheduler::new(config).run().await?;
//! print!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod allocator; // Node allocation strategies
pub mod report;    // Ordered text output
pub mod schedule;  // Depth plan, permit pool, scheduler
pub mod stats;     // Allocation counters
pub mod tree;      // Complete binary trees

// Re-exports for convenience
pub use allocator::{AllocatorKind, BufferedAllocator, NaiveAllocator, NodeAllocator};
pub use report::{Report, ReportLine};
pub use schedule::{DepthPlan, PermitPool, Scheduler, WorkItem, WorkKind, MAX_DEPTH, MIN_DEPTH};
pub use tree::{build_tree, Tree};

use std::num::NonZeroUsize;

use thiserror::Error;

/// Parameters of one benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Problem size `n`
    pub size: u32,

    /// Shallowest iterated depth
    pub min_depth: u32,

    /// Node allocation strategy
    pub allocator: AllocatorKind,

    /// Permit pool size; `None` uses the available parallelism
    pub parallelism: Option<NonZeroUsize>,
}

impl BenchConfig {
    /// Configuration with the default minimum depth and pool size
    pub fn new(size: u32, allocator: AllocatorKind) -> Self {
        Self {
            size,
            min_depth: MIN_DEPTH,
            allocator,
            parallelism: None,
        }
    }

    /// Override the permit pool size
    pub fn with_parallelism(mut self, jobs: usize) -> Result<Self, BenchError> {
        self.parallelism = Some(NonZeroUsize::new(jobs).ok_or(BenchError::InvalidParallelism)?);
        Ok(self)
    }

    /// `max(size, min_depth + 2)`
    pub fn max_depth(&self) -> u32 {
        self.size.max(self.min_depth.saturating_add(2))
    }

    /// One level below the deepest iterated tree
    pub fn stretch_depth(&self) -> u32 {
        self.max_depth().saturating_add(1)
    }

    /// Permits the scheduler will hand out
    pub fn permits(&self) -> NonZeroUsize {
        self.parallelism.unwrap_or_else(|| {
            std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
        })
    }

    /// Work items for this configuration
    pub fn plan(&self) -> Result<DepthPlan, BenchError> {
        DepthPlan::new(self.size, self.min_depth)
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new(0, AllocatorKind::default())
    }
}

/// Errors that end a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    /// Allocator selector names no known strategy
    #[error("unsupported allocator: {0}")]
    UnsupportedAllocator(String),

    /// Problem size or minimum depth asks for trees deeper than supported
    #[error("max depth {max_depth} exceeds the supported limit of {limit}")]
    DepthOutOfRange {
        /// Depth the configuration asked for
        max_depth: u32,
        /// Deepest supported long-lived tree
        limit: u32,
    },

    /// Permit pool of size zero requested
    #[error("parallelism must be at least 1")]
    InvalidParallelism,

    /// Permit pool closed while work was outstanding
    #[error("permit pool closed while work items were outstanding")]
    PermitPoolClosed,

    /// A work item panicked or was cancelled
    #[error("work item {tag} failed: {source}")]
    TaskFailed {
        /// Position tag of the failed item
        tag: schedule::PositionTag,
        /// Join failure from the runtime
        #[source]
        source: tokio::task::JoinError,
    },

    /// Dispatcher task panicked or was cancelled
    #[error("dispatcher failed: {0}")]
    Dispatcher(#[source] tokio::task::JoinError),

    /// All senders went away before every result arrived
    #[error("result channel closed after {received} of {expected} results")]
    ChannelClosed {
        /// Results collected
        received: usize,
        /// Results the plan called for
        expected: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_bounds() {
        let config = BenchConfig::new(0, AllocatorKind::Naive);
        assert_eq!(config.max_depth(), 6);
        assert_eq!(config.stretch_depth(), 7);

        let config = BenchConfig::new(21, AllocatorKind::Naive);
        assert_eq!(config.max_depth(), 21);
        assert_eq!(config.stretch_depth(), 22);
    }

    #[test]
    fn test_oversized_plan_rejected() {
        let config = BenchConfig::new(32, AllocatorKind::Buffered);
        assert_eq!(config.max_depth(), 32);
        assert!(matches!(
            config.plan(),
            Err(BenchError::DepthOutOfRange { max_depth: 32, limit: MAX_DEPTH })
        ));
    }

    #[test]
    fn test_parallelism_override() {
        let config = BenchConfig::default().with_parallelism(3).unwrap();
        assert_eq!(config.permits().get(), 3);
        assert!(matches!(
            BenchConfig::default().with_parallelism(0),
            Err(BenchError::InvalidParallelism)
        ));
    }

    #[test]
    fn test_default_permits_nonzero() {
        assert!(BenchConfig::default().permits().get() >= 1);
    }
}
