//! Compile-time feature toggles

use std::time::Duration;

/// Feature toggles for one gateway compile.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Enable tail sampling by time window: prepends a trace-grouping
    /// processor to the traces root pipeline.
    pub sampling_enabled: bool,

    /// How long the trace-grouping processor waits for a trace to complete.
    pub sampling_wait: Duration,

    /// Skip the service-graph wiring even when traces are enabled.
    pub disable_service_graph: bool,

    /// Wire the cluster-metrics receiver into the metrics root pipeline.
    pub cluster_metrics_enabled: bool,

    /// Namespace the gateway runs in; owns the leader-election lease.
    pub namespace: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            sampling_enabled: false,
            sampling_wait: Duration::from_secs(10),
            disable_service_graph: false,
            cluster_metrics_enabled: false,
            namespace: "weir-system".into(),
        }
    }
}
