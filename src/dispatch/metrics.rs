//! Counters for the async dispatch queue
//!
//! Tracks how much work went through an [`AsyncLogger`](super::AsyncLogger),
//! how often producers had to wait for queue space, and how many calls were
//! turned away after shutdown.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single async dispatch queue
///
/// # Example
///
/// ```
/// use rust_log_registry::dispatch::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_executed();
///
/// assert_eq!(metrics.pending(), 0);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Jobs accepted onto the queue
    enqueued: AtomicU64,

    /// Jobs run by the worker (including ones that panicked)
    executed: AtomicU64,

    /// Sends that found the queue full and had to wait
    blocked_sends: AtomicU64,

    /// Emit calls refused because the logger was shut down
    rejected: AtomicU64,

    /// Jobs that panicked inside the wrapped logger
    panicked: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            executed: AtomicU64::new(0),
            blocked_sends: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn executed(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocked_sends(&self) -> u64 {
        self.blocked_sends.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }

    /// Jobs accepted but not yet run
    pub fn pending(&self) -> u64 {
        self.enqueued().saturating_sub(self.executed())
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_executed(&self) -> u64 {
        self.executed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_blocked(&self) -> u64 {
        self.blocked_sends.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous count
    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panicked(&self) -> u64 {
        self.panicked.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            executed: AtomicU64::new(self.executed()),
            blocked_sends: AtomicU64::new(self.blocked_sends()),
            rejected: AtomicU64::new(self.rejected()),
            panicked: AtomicU64::new(self.panicked()),
        }
    }
}
