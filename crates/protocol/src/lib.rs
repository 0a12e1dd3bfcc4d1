//! Weir - Protocol
//!
//! Data-plane batch types. A [`SignalBatch`] is what the engine hands the
//! router on every call: one signal kind, many resource-scoped items. Each
//! [`ResourceBatch`] carries the resource attributes that identify the
//! producing workload plus the encoded telemetry records themselves.
//!
//! Records are opaque `bytes::Bytes`, so copying a resource between batches
//! shares the underlying buffers instead of duplicating payload memory.

pub mod attrs;
mod batch;

pub use batch::{AttributeMap, ResourceBatch, SignalBatch};

// Re-export for convenience: every batch is tagged with its signal.
pub use weir_model::Signal;
