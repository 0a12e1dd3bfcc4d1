//! Data streams
//!
//! A data stream binds a named set of source workloads to a set of
//! destinations, per signal. The compiler embeds the full list into the
//! router connector's configuration, and the runtime router rebuilds its
//! routing table from the same structure at start time.

use serde::{Deserialize, Serialize};

use crate::Signal;

/// Identifies one concrete source workload.
///
/// The kind is carried as supplied; normalization to a canonical token
/// happens when the routing table is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilter {
    pub namespace: String,
    pub kind: String,
    pub name: String,
}

impl SourceFilter {
    pub fn new(
        namespace: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// One destination selection inside a data stream: which destination, and
/// which subset of its signals this stream feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStreamDestination {
    pub destination_name: String,

    #[serde(default)]
    pub signals: Vec<Signal>,
}

impl DataStreamDestination {
    pub fn new(
        destination_name: impl Into<String>,
        signals: impl IntoIterator<Item = Signal>,
    ) -> Self {
        Self {
            destination_name: destination_name.into(),
            signals: signals.into_iter().collect(),
        }
    }
}

/// A named policy: these workloads' telemetry, for these signals, goes to
/// these destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStream {
    pub name: String,

    #[serde(default)]
    pub sources: Vec<SourceFilter>,

    #[serde(default)]
    pub destinations: Vec<DataStreamDestination>,
}

impl DataStream {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            destinations: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: SourceFilter) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_destination(mut self, destination: DataStreamDestination) -> Self {
        self.destinations.push(destination);
        self
    }
}
