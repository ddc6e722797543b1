//! Bounded fan-out scheduler
//!
//! A run moves through: enumerate the [`DepthPlan`], dispatch one task per
//! work item from a dispatcher task, collect exactly `expected_count`
//! tagged results from a channel, then sort by tag. Each task holds a
//! [`PoolPermit`] while it builds trees, so at most `permits` trees are
//! under construction at once. Report order depends only on the tags.

mod permits;
mod plan;

pub use permits::{PermitPool, PoolPermit};
pub use plan::{
    DepthPlan, PositionTag, WorkItem, WorkKind, LONG_LIVED_TAG, MAX_DEPTH, MIN_DEPTH,
    STRETCH_TAG,
};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{self, JoinSet};
use tracing::{debug, info, instrument, warn};

use crate::allocator::AllocatorKind;
use crate::report::{Report, ReportLine};
use crate::{BenchConfig, BenchError};

/// Extra time a task spends after acquiring its permit
///
/// Used to shake up completion order.
pub type DelayFn = Arc<dyn Fn(&WorkItem) -> Duration + Send + Sync>;

type Outcome = Result<ReportLine, BenchError>;

/// Drives one benchmark run
#[derive(Clone)]
pub struct Scheduler {
    config: BenchConfig,
    pool: PermitPool,
    delay: Option<DelayFn>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("delay", &self.delay.is_some())
            .finish()
    }
}

impl Scheduler {
    /// Scheduler with a fresh pool of `config.permits()` permits
    pub fn new(config: BenchConfig) -> Self {
        let pool = PermitPool::new(config.permits());
        Self::with_pool(config, pool)
    }

    /// Scheduler drawing from an existing pool
    pub fn with_pool(config: BenchConfig, pool: PermitPool) -> Self {
        Self {
            config,
            pool,
            delay: None,
        }
    }

    /// Install a per-task delay
    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(&WorkItem) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Arc::new(delay));
        self
    }

    /// Run configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Permit pool shared by all tasks of this scheduler
    pub fn pool(&self) -> &PermitPool {
        &self.pool
    }

    /// Work items for this configuration
    pub fn plan(&self) -> Result<DepthPlan, BenchError> {
        self.config.plan()
    }

    /// Build and check every tree of the plan and return the ordered report
    ///
    /// Any failure aborts the whole run: the pool is closed, queued items
    /// are cancelled, and no partial report is produced.
    #[instrument(skip(self), fields(size = self.config.size, allocator = %self.config.allocator))]
    pub async fn run(&self) -> Result<Report, BenchError> {
        let plan = self.plan()?;
        let expected = plan.expected_count();
        info!(
            max_depth = plan.max_depth(),
            expected,
            permits = self.pool.capacity(),
            "dispatching work items"
        );

        let (tx, mut rx) = mpsc::channel::<Outcome>(self.pool.capacity());
        let dispatcher = tokio::spawn(dispatch(
            plan.dispatch_order(),
            self.config.allocator,
            self.pool.clone(),
            self.delay.clone(),
            tx,
        ));

        let mut lines = Vec::with_capacity(expected);
        while lines.len() < expected {
            match rx.recv().await {
                Some(Ok(line)) => lines.push(line),
                Some(Err(err)) => {
                    warn!(error = %err, received = lines.len(), "aborting run");
                    self.pool.close();
                    // Dropping the dispatcher's task set cancels every queued item.
                    dispatcher.abort();
                    return Err(err);
                }
                None => {
                    return Err(BenchError::ChannelClosed {
                        received: lines.len(),
                        expected,
                    })
                }
            }
        }
        dispatcher.await.map_err(BenchError::Dispatcher)?;

        let report = Report::from_unordered(lines);
        info!(fingerprint = %report.fingerprint(), "run complete");
        Ok(report)
    }
}

/// Spawn one task per item and keep them owned until they finish
async fn dispatch(
    items: Vec<WorkItem>,
    allocator: AllocatorKind,
    pool: PermitPool,
    delay: Option<DelayFn>,
    tx: mpsc::Sender<Outcome>,
) {
    let mut tasks = JoinSet::new();
    for item in items {
        tasks.spawn(run_item(item, allocator, pool.clone(), delay.clone(), tx.clone()));
    }
    drop(tx);

    while tasks.join_next().await.is_some() {}
}

async fn run_item(
    item: WorkItem,
    allocator: AllocatorKind,
    pool: PermitPool,
    delay: Option<DelayFn>,
    tx: mpsc::Sender<Outcome>,
) {
    let permit = match pool.acquire().await {
        Ok(permit) => permit,
        Err(err) => {
            let _ = tx.send(Err(err)).await;
            return;
        }
    };
    debug!(tag = item.tag, depth = item.depth, iterations = item.iterations(), "work item started");

    let built = task::spawn_blocking(move || {
        if let Some(delay) = delay {
            std::thread::sleep(delay(&item));
        }
        execute(&item, allocator)
    })
    .await;

    // The collector may already have stopped after a failure, so send errors are ignored.
    match built {
        Ok(line) => {
            debug!(tag = item.tag, check = line.check, "work item finished");
            drop(permit);
            let _ = tx.send(Ok(line)).await;
        }
        Err(source) => {
            // Report the failure and close the pool while still holding the
            // permit, so no other item starts building after it.
            let _ = tx
                .send(Err(BenchError::TaskFailed {
                    tag: item.tag,
                    source,
                }))
                .await;
            pool.close();
            drop(permit);
        }
    }
}

/// Build and check the trees of one work item on the current thread
///
/// Every tree gets its own allocator sized for `item.depth`.
pub fn execute(item: &WorkItem, allocator: AllocatorKind) -> ReportLine {
    let check = (0..item.iterations())
        .map(|_| u64::from(allocator.tree_check(item.depth)))
        .sum();

    ReportLine {
        tag: item.tag,
        kind: item.kind,
        depth: item.depth,
        check,
    }
}
