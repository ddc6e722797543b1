//! Counting permit pool bounding concurrent tree construction

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::BenchError;

/// Holder counts, for observing the bound
#[derive(Debug, Default)]
struct Gauge {
    active: AtomicUsize,
    peak: AtomicUsize,
}

/// Shared semaphore sized to the available parallelism
///
/// Clones share the same permits.
#[derive(Debug, Clone)]
pub struct PermitPool {
    semaphore: Arc<Semaphore>,
    capacity: NonZeroUsize,
    gauge: Arc<Gauge>,
}

/// One unit of the pool; returned on drop
#[derive(Debug)]
pub struct PoolPermit {
    _permit: OwnedSemaphorePermit,
    gauge: Arc<Gauge>,
}

impl Drop for PoolPermit {
    fn drop(&mut self) {
        // Runs before the semaphore permit is released.
        self.gauge.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PermitPool {
    /// Pool with `capacity` permits
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.get())),
            capacity,
            gauge: Arc::new(Gauge::default()),
        }
    }

    /// Total permits
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Permits not currently held
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Permits currently held
    pub fn active(&self) -> usize {
        self.gauge.active.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous holders seen
    pub fn peak(&self) -> usize {
        self.gauge.peak.load(Ordering::SeqCst)
    }

    /// Wait for a permit
    ///
    /// Fails only once the pool has been closed.
    pub async fn acquire(&self) -> Result<PoolPermit, BenchError> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| BenchError::PermitPoolClosed)?;

        let now = self.gauge.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.gauge.peak.fetch_max(now, Ordering::SeqCst);

        Ok(PoolPermit {
            _permit: permit,
            gauge: Arc::clone(&self.gauge),
        })
    }

    /// Close the pool; pending and future acquisitions fail
    pub fn close(&self) {
        self.semaphore.close();
    }
}
