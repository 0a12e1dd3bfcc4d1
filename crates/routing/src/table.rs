//! Routing table compiled from data streams
//!
//! The table maps workload keys to per-signal sets of pipeline names. All
//! allocation happens at build time; lookups return references into
//! pre-built sorted sets, so iteration order is stable wherever the table
//! feeds serialized output.

use std::collections::{BTreeSet, HashMap};

use weir_model::{names, DataStream, Signal};

use crate::{WorkloadKey, WorkloadKind};

/// How overlapping claims on the same workload+signal combine.
///
/// Two data streams may both list the same workload for the same signal.
/// `Union` accumulates both streams' pipelines; `Replace` keeps only the
/// last stream's, matching plain map assignment. Union is the default;
/// whether a single-stream-per-workload invariant should instead hold is
/// still an open product question, so the old behavior stays selectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    #[default]
    Union,
    Replace,
}

/// Per-signal pipeline-name sets for one workload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalPipelines {
    traces: BTreeSet<String>,
    metrics: BTreeSet<String>,
    logs: BTreeSet<String>,
}

impl SignalPipelines {
    /// Pipeline names for one signal.
    #[inline]
    pub fn for_signal(&self, signal: Signal) -> &BTreeSet<String> {
        match signal {
            Signal::Traces => &self.traces,
            Signal::Metrics => &self.metrics,
            Signal::Logs => &self.logs,
        }
    }

    fn for_signal_mut(&mut self, signal: Signal) -> &mut BTreeSet<String> {
        match signal {
            Signal::Traces => &mut self.traces,
            Signal::Metrics => &mut self.metrics,
            Signal::Logs => &mut self.logs,
        }
    }

    /// True when no signal has any pipeline.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.metrics.is_empty() && self.logs.is_empty()
    }
}

/// Compiled lookup from workload identity to applicable pipelines.
///
/// Read-only after [`RoutingTableBuilder::build`]; safe to share across
/// threads without locking.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: HashMap<WorkloadKey, SignalPipelines>,
}

impl RoutingTable {
    /// Compile a table from data streams with the default merge strategy.
    pub fn from_datastreams(datastreams: &[DataStream]) -> Self {
        let mut builder = RoutingTableBuilder::new();
        builder.add_datastreams(datastreams);
        builder.build()
    }

    /// Pipelines for a workload and signal.
    ///
    /// Returns `None` when the workload is unknown or has no pipelines for
    /// this signal; the caller drops in either case.
    pub fn pipelines(&self, key: &WorkloadKey, signal: Signal) -> Option<&BTreeSet<String>> {
        self.routes
            .get(key)
            .map(|pipelines| pipelines.for_signal(signal))
            .filter(|names| !names.is_empty())
    }

    /// Check whether a workload has any route.
    #[inline]
    pub fn has_route(&self, key: &WorkloadKey) -> bool {
        self.routes.contains_key(key)
    }

    /// Number of workloads with routes.
    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// True when no workload has a route.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All distinct pipeline names referenced by the table, sorted.
    pub fn pipeline_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for pipelines in self.routes.values() {
            for signal in Signal::ALL {
                names.extend(pipelines.for_signal(signal).iter().cloned());
            }
        }
        names
    }

    /// Iterate over all routes.
    pub fn iter(&self) -> impl Iterator<Item = (&WorkloadKey, &SignalPipelines)> {
        self.routes.iter()
    }
}

/// Builder accumulating data streams into a [`RoutingTable`].
#[derive(Debug, Default)]
pub struct RoutingTableBuilder {
    merge_strategy: MergeStrategy,
    routes: HashMap<WorkloadKey, SignalPipelines>,
}

impl RoutingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select how overlapping workload+signal claims combine.
    pub fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    /// Add one data stream's routes.
    ///
    /// Source filters with an unrecognized workload kind are skipped with a
    /// warning; the rest of the stream still routes.
    pub fn add_datastream(&mut self, datastream: &DataStream) -> &mut Self {
        let mut signals: BTreeSet<Signal> = BTreeSet::new();
        for destination in &datastream.destinations {
            signals.extend(destination.signals.iter().copied());
        }

        for source in &datastream.sources {
            let kind = match WorkloadKind::parse(&source.kind) {
                Ok(kind) => kind,
                Err(err) => {
                    tracing::warn!(
                        datastream = %datastream.name,
                        namespace = %source.namespace,
                        workload = %source.name,
                        error = %err,
                        "skipping source filter with unrecognized workload kind"
                    );
                    continue;
                }
            };
            let key = WorkloadKey::new(source.namespace.clone(), kind, source.name.clone());
            let route = self.routes.entry(key).or_default();

            for &signal in &signals {
                let pipeline = names::datastream_pipeline_name(signal, &datastream.name);
                let entry = route.for_signal_mut(signal);
                if self.merge_strategy == MergeStrategy::Replace {
                    entry.clear();
                }
                entry.insert(pipeline);
            }
        }

        self
    }

    /// Add several data streams in order.
    pub fn add_datastreams(&mut self, datastreams: &[DataStream]) -> &mut Self {
        for datastream in datastreams {
            self.add_datastream(datastream);
        }
        self
    }

    /// Finish building. Workloads whose every signal set ended up empty are
    /// dropped so `has_route` reflects routable workloads only.
    pub fn build(self) -> RoutingTable {
        let routes = self
            .routes
            .into_iter()
            .filter(|(_, pipelines)| !pipelines.is_empty())
            .collect();
        RoutingTable { routes }
    }
}
