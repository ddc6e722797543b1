//! Process allocation counters
//!
//! [`CountingAllocator`] wraps the system allocator and keeps live and
//! cumulative byte counts. The binary installs it as the global allocator
//! and prints a [`MemStats`] line after the report.

use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

const MIB: f64 = 1024.0 * 1024.0;

/// Counting wrapper around [`System`]
#[derive(Debug)]
pub struct CountingAllocator {
    live: AtomicUsize,
    total: AtomicUsize,
}

impl CountingAllocator {
    /// Allocator with zeroed counters
    pub const fn new() -> Self {
        Self {
            live: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
        }
    }

    /// Current counter values
    pub fn snapshot(&self) -> MemStats {
        MemStats {
            live_bytes: self.live.load(Ordering::Relaxed),
            total_bytes: self.total.load(Ordering::Relaxed),
        }
    }

    fn grew(&self, bytes: usize) {
        self.live.fetch_add(bytes, Ordering::Relaxed);
        self.total.fetch_add(bytes, Ordering::Relaxed);
    }

    fn shrank(&self, bytes: usize) {
        self.live.fetch_sub(bytes, Ordering::Relaxed);
    }
}

// SAFETY: every call is forwarded to `System` unchanged; only counters are added.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            self.grew(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            self.grew(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        self.shrank(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size > old_size {
                self.grew(new_size - old_size);
            } else {
                self.shrank(old_size - new_size);
            }
        }
        new_ptr
    }
}

/// Allocation counters at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemStats {
    /// Bytes currently allocated
    pub live_bytes: usize,

    /// Bytes allocated over the process lifetime
    pub total_bytes: usize,
}

impl fmt::Display for MemStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alloc: {:.3}/{:.3}",
            self.live_bytes as f64 / MIB,
            self.total_bytes as f64 / MIB
        )
    }
}
