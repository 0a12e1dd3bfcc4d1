//! Optional feature wiring
//!
//! Service-graph and cluster-metrics insertions. Both run after the main
//! wiring and only touch components that already exist.

use serde_json::json;

use weir_model::{names, Config, Pipeline, Signal};

use crate::self_telemetry::SELF_METRICS_RECEIVER;

const SERVICE_GRAPH_CONNECTOR: &str = "servicegraph";
const SERVICE_GRAPH_EXPORTER: &str = "prometheus/servicegraph";
const SERVICE_GRAPH_PIPELINE: &str = "metrics/servicegraph";
const SERVICE_GRAPH_PORT: u16 = 9091;

const LEADER_ELECTOR_EXTENSION: &str = "k8s_leader_elector";
const CLUSTER_METRICS_RECEIVER: &str = "k8s_cluster";

/// Attach the service-graph connector to the traces root pipeline and
/// expose its metrics for the self-metrics scraper.
pub(crate) fn insert_service_graph(config: &mut Config) {
    config.connectors.insert(
        SERVICE_GRAPH_CONNECTOR.to_string(),
        json!({
            "latency_histogram_buckets": [
                "2ms", "8ms", "50ms", "100ms", "200ms", "800ms", "2s", "5s", "15s",
            ],
            "store": {
                "ttl": "2s",
                "max_items": 1000,
            },
            "metrics_flush_interval": "60s",
        }),
    );

    if let Some(pipeline) = config.pipeline_mut(&names::root_pipeline_name(Signal::Traces)) {
        pipeline.exporters.push(SERVICE_GRAPH_CONNECTOR.to_string());
    }

    config.exporters.insert(
        SERVICE_GRAPH_EXPORTER.to_string(),
        json!({
            "endpoint": format!("0.0.0.0:{SERVICE_GRAPH_PORT}"),
            "namespace": "servicegraph",
        }),
    );

    config.service.pipelines.insert(
        SERVICE_GRAPH_PIPELINE.to_string(),
        Pipeline {
            receivers: vec![SERVICE_GRAPH_CONNECTOR.to_string()],
            processors: vec![names::GENERIC_BATCH_PROCESSOR.to_string()],
            exporters: vec![SERVICE_GRAPH_EXPORTER.to_string()],
        },
    );

    // When the self-telemetry hook configured its scraper, add the
    // service-graph endpoint to its scrape targets.
    if let Some(receiver) = config.receivers.get_mut(SELF_METRICS_RECEIVER) {
        if let Some(scrape_configs) = receiver
            .get_mut("config")
            .and_then(|c| c.get_mut("scrape_configs"))
            .and_then(|s| s.as_array_mut())
        {
            scrape_configs.push(json!({
                "job_name": "servicegraph",
                "scrape_interval": "10s",
                "static_configs": [
                    { "targets": [format!("127.0.0.1:{SERVICE_GRAPH_PORT}")] },
                ],
            }));
        }
    }
}

/// Wire the cluster-metrics receiver into the metrics root pipeline behind
/// a leader-election extension, so exactly one gateway replica scrapes the
/// cluster state.
pub(crate) fn insert_cluster_metrics(config: &mut Config, namespace: &str) {
    config.extensions.insert(
        LEADER_ELECTOR_EXTENSION.to_string(),
        json!({
            "auth_type": "serviceAccount",
            "lease_name": "weir-cluster-metrics",
            "lease_namespace": namespace,
        }),
    );
    if !config
        .service
        .extensions
        .iter()
        .any(|name| name == LEADER_ELECTOR_EXTENSION)
    {
        config
            .service
            .extensions
            .push(LEADER_ELECTOR_EXTENSION.to_string());
    }

    config.receivers.insert(
        CLUSTER_METRICS_RECEIVER.to_string(),
        json!({
            "auth_type": "serviceAccount",
            "collection_interval": "10s",
            "k8s_leader_elector": LEADER_ELECTOR_EXTENSION,
        }),
    );

    if let Some(pipeline) = config.pipeline_mut(&names::root_pipeline_name(Signal::Metrics)) {
        pipeline
            .receivers
            .push(CLUSTER_METRICS_RECEIVER.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(signal: Signal) -> Config {
        let mut config = Config::default();
        config.service.pipelines.insert(
            names::root_pipeline_name(signal),
            Pipeline {
                receivers: vec![names::OTLP_RECEIVER.to_string()],
                processors: vec![names::MEMORY_LIMITER_PROCESSOR.to_string()],
                exporters: vec![names::router_connector_name(signal)],
            },
        );
        config
    }

    #[test]
    fn test_service_graph_wiring() {
        let mut config = config_with_root(Signal::Traces);
        insert_service_graph(&mut config);

        assert!(config.connectors.contains_key(SERVICE_GRAPH_CONNECTOR));
        let root = &config.service.pipelines["traces/in"];
        assert!(root.exporters.contains(&SERVICE_GRAPH_CONNECTOR.to_string()));

        let graph = &config.service.pipelines[SERVICE_GRAPH_PIPELINE];
        assert_eq!(graph.receivers, vec![SERVICE_GRAPH_CONNECTOR]);
        assert_eq!(graph.exporters, vec![SERVICE_GRAPH_EXPORTER]);
    }

    #[test]
    fn test_service_graph_extends_self_scraper_when_present() {
        let mut config = config_with_root(Signal::Traces);
        config.receivers.insert(
            SELF_METRICS_RECEIVER.to_string(),
            json!({ "config": { "scrape_configs": [{ "job_name": "otelcol" }] } }),
        );

        insert_service_graph(&mut config);

        let scrapes = config.receivers[SELF_METRICS_RECEIVER]["config"]["scrape_configs"]
            .as_array()
            .unwrap();
        assert_eq!(scrapes.len(), 2);
        assert_eq!(scrapes[1]["job_name"], "servicegraph");
    }

    #[test]
    fn test_service_graph_without_self_scraper() {
        let mut config = config_with_root(Signal::Traces);
        insert_service_graph(&mut config);
        assert!(!config.receivers.contains_key(SELF_METRICS_RECEIVER));
    }

    #[test]
    fn test_cluster_metrics_wiring() {
        let mut config = config_with_root(Signal::Metrics);
        insert_cluster_metrics(&mut config, "weir-system");

        assert_eq!(
            config.extensions[LEADER_ELECTOR_EXTENSION]["lease_namespace"],
            "weir-system"
        );
        assert!(config
            .service
            .extensions
            .contains(&LEADER_ELECTOR_EXTENSION.to_string()));

        let root = &config.service.pipelines["metrics/in"];
        assert_eq!(root.receivers, vec!["otlp", CLUSTER_METRICS_RECEIVER]);
    }
}
