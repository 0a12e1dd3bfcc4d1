//! Weir - Router
//!
//! The runtime signal router. One instance per signal kind holds an
//! immutable routing table built from its configured data streams, plus a
//! name-deduplicated map of downstream pipeline hand-offs.
//!
//! # Per-call algorithm
//!
//! ```text
//! [SignalBatch] ──→ per resource: attributes → workload key → table lookup
//!                          │
//!              per-call accumulators (one per matched pipeline)
//!                          │
//!              one hand-off per non-empty accumulator
//! ```
//!
//! Resources that cannot be identified or matched are dropped silently by
//! design; the drop points are observable through [`RouterMetrics`]. A
//! hand-off failure aborts the whole call and propagates to the caller.
//!
//! Because the table and hand-off map never change after construction,
//! `consume` takes `&self` and needs no locking however the host engine
//! schedules concurrent calls.

mod error;
mod handle;
mod metrics;
mod router;


pub use error::{Result, RouterError};
pub use handle::PipelineHandle;
pub use metrics::{RouterMetrics, RouterMetricsSnapshot};
pub use router::{RouterConfig, SignalRouter};

// Re-export key types from dependencies for convenience
pub use weir_protocol::{ResourceBatch, SignalBatch};
pub use weir_routing::{RoutingTable, WorkloadKey, WorkloadKind};

/// Default channel buffer size for pipeline hand-off channels
pub const DEFAULT_CHANNEL_SIZE: usize = 1000;
