//! The per-signal runtime router

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use weir_model::{DataStream, Signal};
use weir_protocol::{attrs, ResourceBatch, SignalBatch};
use weir_routing::{RoutingTable, WorkloadKey, WorkloadKind};

use crate::metrics::RouterMetrics;
use crate::{PipelineHandle, Result};

/// Workload-identity attributes in match precedence order.
///
/// A resource carrying more than one identity attribute resolves to the
/// first entry present: a fixed, documented tie-break rather than an
/// artifact of map iteration order.
const IDENTITY_PRECEDENCE: [(&str, WorkloadKind); 3] = [
    (attrs::DEPLOYMENT_NAME, WorkloadKind::Deployment),
    (attrs::STATEFULSET_NAME, WorkloadKind::StatefulSet),
    (attrs::DAEMONSET_NAME, WorkloadKind::DaemonSet),
];

/// Configuration surface of the routing connector.
///
/// The `datastreams` key holds the same structure the compiler embedded
/// into the connector's config entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub datastreams: Vec<DataStream>,
}

/// A long-lived router for one signal kind.
///
/// The routing table and the hand-off map are built at construction and
/// never mutated, so [`SignalRouter::consume`] is safe under whatever
/// concurrency the host engine applies. Picking up new data streams means
/// building a new instance.
pub struct SignalRouter {
    signal: Signal,
    table: RoutingTable,
    handoffs: HashMap<String, PipelineHandle>,
    metrics: Arc<RouterMetrics>,
}

impl SignalRouter {
    /// Build a router from data streams and downstream hand-offs.
    ///
    /// Distinct pipeline names are deduplicated into one shared hand-off
    /// each; when several handles carry the same name the first wins.
    /// Table entries naming a pipeline with no handle stay in the table
    /// and drop at consume time.
    pub fn new(
        signal: Signal,
        datastreams: &[DataStream],
        handles: Vec<PipelineHandle>,
    ) -> Self {
        let table = RoutingTable::from_datastreams(datastreams);

        let mut handoffs: HashMap<String, PipelineHandle> = HashMap::new();
        for handle in handles {
            handoffs.entry(handle.name().to_string()).or_insert(handle);
        }

        tracing::info!(
            signal = %signal,
            routes = table.route_count(),
            handoffs = handoffs.len(),
            "signal router ready"
        );

        Self {
            signal,
            table,
            handoffs,
            metrics: Arc::new(RouterMetrics::new()),
        }
    }

    /// Build a router from the connector configuration surface.
    pub fn from_config(
        signal: Signal,
        config: &RouterConfig,
        handles: Vec<PipelineHandle>,
    ) -> Self {
        Self::new(signal, &config.datastreams, handles)
    }

    /// The signal this router instance serves.
    #[inline]
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// The compiled routing table.
    #[inline]
    pub fn routing_table(&self) -> &RoutingTable {
        &self.table
    }

    /// Shared metrics handle; stays valid for the router's lifetime.
    pub fn metrics(&self) -> Arc<RouterMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Route one incoming batch.
    ///
    /// Splits the batch's resource items by workload identity, regroups
    /// them into per-pipeline batches, and forwards each non-empty group
    /// exactly once. Unidentifiable or unmatched resources drop silently.
    ///
    /// # Errors
    ///
    /// The first failing hand-off aborts the call with
    /// `RouterError::Forward`; accumulators not yet forwarded are
    /// discarded with it.
    pub async fn consume(&self, batch: &SignalBatch) -> Result<()> {
        self.metrics.record_batch_received();

        // Per-call accumulators, keyed by pipeline name in first-occurrence
        // order. Local to this call; nothing is retained across calls.
        let mut accumulators: Vec<(String, SignalBatch)> = Vec::new();

        for resource in batch.resources() {
            let Some(key) = self.workload_key(resource) else {
                continue;
            };

            let Some(pipelines) = self.table.pipelines(&key, self.signal) else {
                self.metrics.record_dropped_no_route();
                tracing::trace!(signal = %self.signal, key = %key, "no route for workload");
                continue;
            };

            let mut routed = false;
            for pipeline_name in pipelines {
                if !self.handoffs.contains_key(pipeline_name) {
                    self.metrics.record_dropped_unresolved_pipeline();
                    tracing::trace!(
                        signal = %self.signal,
                        pipeline = %pipeline_name,
                        "route names a pipeline with no resolved hand-off"
                    );
                    continue;
                }

                match accumulators
                    .iter_mut()
                    .find(|(name, _)| name == pipeline_name)
                {
                    Some((_, accumulator)) => accumulator.push_resource(resource.clone()),
                    None => {
                        let mut accumulator = SignalBatch::new(self.signal);
                        accumulator.push_resource(resource.clone());
                        accumulators.push((pipeline_name.clone(), accumulator));
                    }
                }
                routed = true;
            }

            if routed {
                self.metrics.record_resource_routed();
            }
        }

        // Forward each accumulator exactly once; the first failure fails
        // the whole call.
        for (pipeline_name, accumulator) in accumulators {
            let Some(handle) = self.handoffs.get(&pipeline_name) else {
                continue;
            };
            match handle.send(accumulator).await {
                Ok(()) => self.metrics.record_forward(),
                Err(err) => {
                    self.metrics.record_forward_error();
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Derive the workload key from resource attributes.
    ///
    /// Missing namespace or identity attributes drop the resource for this
    /// call, silently.
    fn workload_key(&self, resource: &ResourceBatch) -> Option<WorkloadKey> {
        let Some(namespace) = resource.attribute(attrs::NAMESPACE_NAME) else {
            self.metrics.record_dropped_no_namespace();
            tracing::trace!(signal = %self.signal, "resource without namespace attribute");
            return None;
        };

        for (attribute_key, kind) in IDENTITY_PRECEDENCE {
            if let Some(name) = resource.attribute(attribute_key) {
                return Some(WorkloadKey::new(namespace, kind, name));
            }
        }

        self.metrics.record_dropped_no_workload();
        tracing::trace!(
            signal = %self.signal,
            namespace = %namespace,
            "resource without workload-identity attribute"
        );
        None
    }
}

impl std::fmt::Debug for SignalRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalRouter")
            .field("signal", &self.signal)
            .field("routes", &self.table.route_count())
            .field("handoffs", &self.handoffs.len())
            .finish()
    }
}
