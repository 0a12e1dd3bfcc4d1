//! Per-compile resource status report
//!
//! Degraded failures never abort a compile; they land here, keyed by
//! resource ID, for the caller to reflect into user-visible status.

use std::collections::BTreeMap;

/// Per-compile report of destination and processor outcomes.
///
/// `None` marks a successfully configured resource, `Some(message)` a
/// degraded one. Sorted maps keep the report order stable across compiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceStatuses {
    pub destinations: BTreeMap<String, Option<String>>,
    pub processors: BTreeMap<String, Option<String>>,
}

impl ResourceStatuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a destination as successfully configured.
    pub fn record_destination_ok(&mut self, id: impl Into<String>) {
        self.destinations.insert(id.into(), None);
    }

    /// Record a destination failure.
    pub fn record_destination_error(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.destinations.insert(id.into(), Some(message.into()));
    }

    /// Record a processor failure.
    pub fn record_processor_error(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.processors.insert(id.into(), Some(message.into()));
    }

    /// Iterate over failed destinations as `(id, message)`.
    pub fn destination_failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.destinations
            .iter()
            .filter_map(|(id, status)| status.as_deref().map(|message| (id.as_str(), message)))
    }

    /// Iterate over failed processors as `(id, message)`.
    pub fn processor_failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.processors
            .iter()
            .filter_map(|(id, status)| status.as_deref().map(|message| (id.as_str(), message)))
    }

    /// True when any destination or processor failed.
    pub fn has_failures(&self) -> bool {
        self.destination_failures().next().is_some() || self.processor_failures().next().is_some()
    }
}
