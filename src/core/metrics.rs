//! Router metrics for observability
//!
//! Counters for monitoring routing health: how many records were emitted,
//! filtered by a channel threshold, dropped by a processor, or lost because
//! a sink failed and the failure group swallowed the error.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for router observability
///
/// # Example
///
/// ```
/// use log_channel_router::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RouterMetrics {
    /// Records handed to a handler chain
    emitted_count: AtomicU64,

    /// Records rejected by a channel severity threshold
    filtered_count: AtomicU64,

    /// Records dropped by a processor short-circuit
    processor_dropped_count: AtomicU64,

    /// Sink errors (or panics) swallowed by failure groups
    failures_swallowed: AtomicU64,

    /// Records dropped by a sampling decorator
    sampled_out_count: AtomicU64,
}

impl RouterMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted_count: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            processor_dropped_count: AtomicU64::new(0),
            failures_swallowed: AtomicU64::new(0),
            sampled_out_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn processor_dropped_count(&self) -> u64 {
        self.processor_dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failures_swallowed(&self) -> u64 {
        self.failures_swallowed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sampled_out_count(&self) -> u64 {
        self.sampled_out_count.load(Ordering::Relaxed)
    }

    /// Record a dispatch into a handler chain
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a threshold rejection
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a processor drop
    #[inline]
    pub fn record_processor_dropped(&self) -> u64 {
        self.processor_dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a swallowed sink failure
    #[inline]
    pub fn record_failure_swallowed(&self) -> u64 {
        self.failures_swallowed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a sampled-out record
    #[inline]
    pub fn record_sampled_out(&self) -> u64 {
        self.sampled_out_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted_count.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.processor_dropped_count.store(0, Ordering::Relaxed);
        self.failures_swallowed.store(0, Ordering::Relaxed);
        self.sampled_out_count.store(0, Ordering::Relaxed);
    }
}
