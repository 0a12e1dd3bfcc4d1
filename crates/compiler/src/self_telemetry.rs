//! Collector self-observability
//!
//! An optional hook that runs after all wiring with full visibility of the
//! final pipeline names. Unlike destination failures, a hook failure is
//! fatal: a gateway that cannot report on itself is considered
//! misconfigured.

use serde_json::json;

use weir_model::{Config, Pipeline};

use crate::{CompileError, Result};

/// Receiver scraping the collector's own metrics endpoint.
pub const SELF_METRICS_RECEIVER: &str = "prometheus/self-metrics";

/// Processor measuring exported traffic volume per pipeline.
const TRAFFIC_METRICS_PROCESSOR: &str = "weirtrafficmetrics";

/// Exporter shipping the gateway's own telemetry to the UI backend.
const OWN_TELEMETRY_EXPORTER: &str = "otlp/weir-own-telemetry";

/// Pipeline carrying the gateway's own metrics.
const OWN_TELEMETRY_PIPELINE: &str = "metrics/weir-internal";

/// Mutates the final document given the destination and root pipeline names.
pub trait SelfTelemetryHook {
    /// Apply self-telemetry wiring to the compiled config.
    ///
    /// # Errors
    ///
    /// Any error fails the whole compile.
    fn apply(
        &self,
        config: &mut Config,
        destination_pipelines: &[String],
        root_pipelines: &[String],
    ) -> Result<()>;
}

/// The standard self-telemetry wiring: scrape the collector's own metrics,
/// stamp the pod name, and ship to the UI backend. Also appends the
/// traffic-metrics processor to every destination pipeline so per-pipeline
/// export volume is measurable.
#[derive(Debug, Clone)]
pub struct OwnTelemetryPipeline {
    /// Port the collector serves its own metrics on.
    pub metrics_port: u16,

    /// Namespace the UI service runs in.
    pub namespace: String,
}

impl OwnTelemetryPipeline {
    pub fn new(metrics_port: u16, namespace: impl Into<String>) -> Self {
        Self {
            metrics_port,
            namespace: namespace.into(),
        }
    }
}

impl SelfTelemetryHook for OwnTelemetryPipeline {
    fn apply(
        &self,
        config: &mut Config,
        destination_pipelines: &[String],
        _root_pipelines: &[String],
    ) -> Result<()> {
        if config.service.pipelines.is_empty() {
            return Err(CompileError::self_telemetry(
                "no pipeline was configured, cannot add self telemetry pipeline",
            ));
        }

        config.receivers.insert(
            SELF_METRICS_RECEIVER.to_string(),
            json!({
                "config": {
                    "scrape_configs": [
                        {
                            "job_name": "otelcol",
                            "scrape_interval": "10s",
                            "static_configs": [
                                { "targets": [format!("127.0.0.1:{}", self.metrics_port)] },
                            ],
                            "metric_relabel_configs": [
                                {
                                    "source_labels": ["__name__"],
                                    "regex": "(.*weir.*|^otelcol_exporter_sent.*)",
                                    "action": "keep",
                                },
                            ],
                        },
                    ],
                },
            }),
        );

        config.processors.insert(
            "resource/pod-name".to_string(),
            json!({
                "attributes": [
                    { "key": "k8s.pod.name", "value": "${POD_NAME}", "action": "upsert" },
                ],
            }),
        );
        config
            .processors
            .insert(TRAFFIC_METRICS_PROCESSOR.to_string(), json!({}));

        config.exporters.insert(
            OWN_TELEMETRY_EXPORTER.to_string(),
            json!({
                "endpoint": format!("ui.{}:4317", self.namespace),
                "tls": { "insecure": true },
                "retry_on_failure": { "enabled": false },
            }),
        );

        config.service.pipelines.insert(
            OWN_TELEMETRY_PIPELINE.to_string(),
            Pipeline {
                receivers: vec![SELF_METRICS_RECEIVER.to_string()],
                processors: vec!["resource/pod-name".to_string()],
                exporters: vec![OWN_TELEMETRY_EXPORTER.to_string()],
            },
        );

        config.service.telemetry.metrics = crate::base::object(json!({
            "readers": [
                {
                    "pull": {
                        "exporter": {
                            "prometheus": { "host": "0.0.0.0", "port": self.metrics_port },
                        },
                    },
                },
            ],
        }));

        // Traffic metrics go on destination pipelines only: that is where
        // export volume is attributable to a single backend.
        for name in destination_pipelines {
            if let Some(pipeline) = config.pipeline_mut(name) {
                pipeline
                    .processors
                    .push(TRAFFIC_METRICS_PROCESSOR.to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use weir_model::{names, Signal};

    fn config_with_pipeline() -> Config {
        let mut config = Config::default();
        config.service.pipelines.insert(
            "traces/generic-d1".to_string(),
            Pipeline::exporting_to(vec!["otlp/generic-d1".to_string()]),
        );
        config.service.pipelines.insert(
            names::root_pipeline_name(Signal::Traces),
            Pipeline::exporting_to(vec![names::router_connector_name(Signal::Traces)]),
        );
        config
    }

    #[test]
    fn test_rejects_empty_document() {
        let hook = OwnTelemetryPipeline::new(8888, "weir-system");
        let mut config = Config::default();
        let err = hook
            .apply(&mut config, &[], &[])
            .unwrap_err();
        assert!(err.to_string().contains("no pipeline"));
    }

    #[test]
    fn test_adds_internal_pipeline() {
        let hook = OwnTelemetryPipeline::new(8888, "weir-system");
        let mut config = config_with_pipeline();

        hook.apply(
            &mut config,
            &["traces/generic-d1".to_string()],
            &["traces/in".to_string()],
        )
        .unwrap();

        assert!(config.receivers.contains_key(SELF_METRICS_RECEIVER));
        assert!(config.exporters.contains_key(OWN_TELEMETRY_EXPORTER));
        let internal = &config.service.pipelines[OWN_TELEMETRY_PIPELINE];
        assert_eq!(internal.receivers, vec![SELF_METRICS_RECEIVER]);
        assert!(!config.service.telemetry.is_empty());
    }

    #[test]
    fn test_traffic_metrics_on_destination_pipelines_only() {
        let hook = OwnTelemetryPipeline::new(8888, "weir-system");
        let mut config = config_with_pipeline();

        hook.apply(
            &mut config,
            &["traces/generic-d1".to_string()],
            &["traces/in".to_string()],
        )
        .unwrap();

        assert!(config.service.pipelines["traces/generic-d1"]
            .processors
            .contains(&TRAFFIC_METRICS_PROCESSOR.to_string()));
        assert!(!config.service.pipelines["traces/in"]
            .processors
            .contains(&TRAFFIC_METRICS_PROCESSOR.to_string()));
    }
}
