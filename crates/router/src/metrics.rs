//! Router metrics
//!
//! Atomic counters observing the router's drop points and hand-offs.
//! Dropping stays silent on the data path; these counters are how the
//! drops become visible at all. Relaxed ordering: values are eventually
//! consistent, not real-time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one router instance.
///
/// All methods are safe to call concurrently.
#[derive(Debug, Default)]
pub struct RouterMetrics {
    /// Batches handed to `consume`
    batches_received: AtomicU64,

    /// Resource items copied into at least one accumulator
    resources_routed: AtomicU64,

    /// Resource items without the namespace attribute
    dropped_no_namespace: AtomicU64,

    /// Resource items without any workload-identity attribute
    dropped_no_workload: AtomicU64,

    /// Resource items whose workload key has no routing-table entry
    dropped_no_route: AtomicU64,

    /// Pipeline matches skipped because no hand-off is resolved for the name
    dropped_unresolved_pipeline: AtomicU64,

    /// Successful hand-off invocations
    forwards: AtomicU64,

    /// Failed hand-off invocations (each also fails its call)
    forward_errors: AtomicU64,
}

impl RouterMetrics {
    /// Create a metrics instance with all counters at zero.
    pub const fn new() -> Self {
        Self {
            batches_received: AtomicU64::new(0),
            resources_routed: AtomicU64::new(0),
            dropped_no_namespace: AtomicU64::new(0),
            dropped_no_workload: AtomicU64::new(0),
            dropped_no_route: AtomicU64::new(0),
            dropped_unresolved_pipeline: AtomicU64::new(0),
            forwards: AtomicU64::new(0),
            forward_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_batch_received(&self) {
        self.batches_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_resource_routed(&self) {
        self.resources_routed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped_no_namespace(&self) {
        self.dropped_no_namespace.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped_no_workload(&self) {
        self.dropped_no_workload.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped_no_route(&self) {
        self.dropped_no_route.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped_unresolved_pipeline(&self) {
        self.dropped_unresolved_pipeline
            .fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_forward(&self) {
        self.forwards.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_forward_error(&self) {
        self.forward_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> RouterMetricsSnapshot {
        RouterMetricsSnapshot {
            batches_received: self.batches_received.load(Ordering::Relaxed),
            resources_routed: self.resources_routed.load(Ordering::Relaxed),
            dropped_no_namespace: self.dropped_no_namespace.load(Ordering::Relaxed),
            dropped_no_workload: self.dropped_no_workload.load(Ordering::Relaxed),
            dropped_no_route: self.dropped_no_route.load(Ordering::Relaxed),
            dropped_unresolved_pipeline: self.dropped_unresolved_pipeline.load(Ordering::Relaxed),
            forwards: self.forwards.load(Ordering::Relaxed),
            forward_errors: self.forward_errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`RouterMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterMetricsSnapshot {
    pub batches_received: u64,
    pub resources_routed: u64,
    pub dropped_no_namespace: u64,
    pub dropped_no_workload: u64,
    pub dropped_no_route: u64,
    pub dropped_unresolved_pipeline: u64,
    pub forwards: u64,
    pub forward_errors: u64,
}

impl RouterMetricsSnapshot {
    /// Total resource items dropped, across all drop reasons.
    pub fn total_dropped(&self) -> u64 {
        self.dropped_no_namespace
            + self.dropped_no_workload
            + self.dropped_no_route
            + self.dropped_unresolved_pipeline
    }
}
