//! Batch containers for resource-scoped telemetry
//!
//! One incoming call carries one [`SignalBatch`]; the router regroups its
//! [`ResourceBatch`] items into per-pipeline batches. Batches are immutable
//! once handed to the router, so a clone is a safe deep copy from the
//! router's point of view while record payloads stay reference-counted.

use std::collections::BTreeMap;

use bytes::Bytes;

use weir_model::Signal;

/// Resource attributes, sorted by key.
pub type AttributeMap = BTreeMap<String, String>;

/// One resource-scoped item: the attributes identifying the producing
/// workload, and the encoded telemetry records it emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBatch {
    attributes: AttributeMap,
    records: Vec<Bytes>,
}

impl ResourceBatch {
    /// Create an empty resource item with the given attributes.
    pub fn new(attributes: AttributeMap) -> Self {
        Self {
            attributes,
            records: Vec::new(),
        }
    }

    /// Look up a resource attribute.
    #[inline]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All resource attributes.
    #[inline]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Append one encoded record.
    #[inline]
    pub fn push_record(&mut self, record: Bytes) {
        self.records.push(record);
    }

    /// Append one encoded record, builder style.
    pub fn with_record(mut self, record: impl Into<Bytes>) -> Self {
        self.records.push(record.into());
        self
    }

    /// The encoded records.
    #[inline]
    pub fn records(&self) -> &[Bytes] {
        &self.records
    }

    /// Number of records in this resource item.
    #[inline]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// A batch of resource-scoped items for one signal kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalBatch {
    signal: Signal,
    resources: Vec<ResourceBatch>,
}

impl SignalBatch {
    /// Create an empty batch for one signal.
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            resources: Vec::new(),
        }
    }

    /// Create a batch from pre-built resource items.
    pub fn with_resources(signal: Signal, resources: Vec<ResourceBatch>) -> Self {
        Self { signal, resources }
    }

    /// The signal this batch carries.
    #[inline]
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Append one resource item.
    #[inline]
    pub fn push_resource(&mut self, resource: ResourceBatch) {
        self.resources.push(resource);
    }

    /// The resource items.
    #[inline]
    pub fn resources(&self) -> &[ResourceBatch] {
        &self.resources
    }

    /// Number of resource items.
    #[inline]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Total records across all resource items.
    #[inline]
    pub fn record_count(&self) -> usize {
        self.resources.iter().map(ResourceBatch::record_count).sum()
    }

    /// True when the batch holds no resource items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
