//! Gateway pipeline compiler
//!
//! The top-level orchestrator: a single synchronous pass over one mutable
//! `Config`, from precondition check to serialized document.

use std::collections::BTreeMap;

use weir_adapters::{AdapterError, AdapterRegistry};
use weir_model::{
    names, Config, DataStream, Destination, GenericMap, Pipeline, ProcessorConfigurer,
    ResourceStatuses, Signal,
};
use weir_routing::RoutingTable;

use crate::base::base_config;
use crate::datastream::build_datastream_pipelines;
use crate::features::{insert_cluster_metrics, insert_service_graph};
use crate::processors::compile_processors;
use crate::self_telemetry::SelfTelemetryHook;
use crate::{CompileError, CompileOptions, Result};

/// A successful compile: the serialized document plus the degraded-resource
/// report and the signals the wired destinations enabled.
#[derive(Debug)]
pub struct GatewayConfig {
    /// The document, ready for the engine.
    pub yaml: String,

    /// Per-destination and per-processor outcomes.
    pub statuses: ResourceStatuses,

    /// Signals with at least one wired destination pipeline.
    pub enabled_signals: Vec<Signal>,
}

/// Compile from the standard base config.
///
/// The memory limiter configuration is supplied by the caller, which sizes
/// it from the gateway's resource settings.
pub fn compile_gateway(
    destinations: &[Destination],
    processors: &[Box<dyn ProcessorConfigurer>],
    datastreams: &[DataStream],
    memory_limiter: GenericMap,
    options: &CompileOptions,
    self_telemetry: Option<&dyn SelfTelemetryHook>,
) -> Result<GatewayConfig> {
    compile_gateway_config(
        base_config(memory_limiter),
        destinations,
        processors,
        datastreams,
        options,
        self_telemetry,
    )
}

/// Compile against a caller-supplied base config.
///
/// Runs the full pass: processor compilation, per-destination wiring with
/// forward connectors, data-stream pipelines, per-signal root pipelines,
/// the optional self-telemetry hook, optional service-graph and
/// cluster-metrics wiring, and the final serialization.
///
/// # Errors
///
/// Fatal only for a base config without the `"otlp"` receiver, a broken
/// adapter registry, a failing self-telemetry hook, or serialization
/// failure. Destination and processor problems degrade the report instead.
pub fn compile_gateway_config(
    mut config: Config,
    destinations: &[Destination],
    processors: &[Box<dyn ProcessorConfigurer>],
    datastreams: &[DataStream],
    options: &CompileOptions,
    self_telemetry: Option<&dyn SelfTelemetryHook>,
) -> Result<GatewayConfig> {
    let registry = AdapterRegistry::load()?;
    let mut statuses = ResourceStatuses::new();

    if !config.has_receiver(names::OTLP_RECEIVER) {
        return Err(CompileError::MissingOtlpReceiver);
    }

    // Compile user-defined processors into document entries and per-signal
    // chains.
    let mut compilation = compile_processors(processors);
    for (id, message) in &compilation.errors {
        statuses.record_processor_error(id, message);
    }
    for (key, processor_config) in std::mem::take(&mut compilation.configs) {
        config.processors.insert(key, processor_config);
    }

    if options.sampling_enabled {
        config.processors.insert(
            names::GROUP_BY_TRACES_PROCESSOR.to_string(),
            serde_json::json!({
                "wait_duration": format!("{}s", options.sampling_wait.as_secs()),
            }),
        );
        compilation
            .traces_pre
            .insert(0, names::GROUP_BY_TRACES_PROCESSOR.to_string());
    }

    // The small-batches processor is applied per traces destination
    // pipeline, never globally on the root pipeline.
    let before = compilation.traces_pre.len();
    compilation
        .traces_pre
        .retain(|name| name != names::SMALL_BATCHES_PROCESSOR);
    let small_batches_enabled = compilation.traces_pre.len() != before;

    // Per-destination wiring: resolve the adapter, let it write its
    // exporter and pipelines, then bridge each pipeline with a dedicated
    // forward connector.
    let mut dest_forward_connectors: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut destination_pipelines: Vec<String> = Vec::new();
    let mut traces_enabled = false;
    let mut metrics_enabled = false;
    let mut logs_enabled = false;

    for dest in destinations {
        let Some(adapter) = registry.get(&dest.kind) else {
            let err = AdapterError::unknown_kind(&dest.kind);
            tracing::warn!(destination = %dest.id, error = %err, "destination not configured");
            statuses.record_destination_error(&dest.id, err.to_string());
            continue;
        };

        // Each adapter writes into its own fragment; merging surfaces name
        // collisions between destinations instead of overwriting.
        let mut fragment = Config::default();
        let pipeline_names = match adapter.modify_config(dest, &mut fragment) {
            Ok(pipeline_names) => pipeline_names,
            Err(err) => {
                tracing::warn!(destination = %dest.id, error = %err, "destination not configured");
                statuses.record_destination_error(&dest.id, err.to_string());
                continue;
            }
        };
        if let Err(err) = config.merge(fragment) {
            tracing::warn!(destination = %dest.id, error = %err, "destination not configured");
            statuses.record_destination_error(&dest.id, err.to_string());
            continue;
        }

        destination_pipelines.extend(pipeline_names.iter().cloned());

        for pipeline_name in &pipeline_names {
            let connector_name = names::forward_connector_name(pipeline_name);
            config.connectors.insert(
                connector_name.clone(),
                serde_json::Value::Object(GenericMap::new()),
            );
            dest_forward_connectors
                .entry(dest.id.clone())
                .or_default()
                .push(connector_name.clone());

            let pipeline = config
                .service
                .pipelines
                .entry(pipeline_name.clone())
                .or_default();
            // The forward connector becomes the pipeline's sole receiver;
            // every destination pipeline batches before export.
            pipeline.receivers = vec![connector_name];
            pipeline.processors = vec![names::GENERIC_BATCH_PROCESSOR.to_string()];

            match Signal::of_pipeline(pipeline_name) {
                Some(Signal::Traces) => {
                    if small_batches_enabled {
                        pipeline
                            .processors
                            .push(names::SMALL_BATCHES_PROCESSOR.to_string());
                    }
                    pipeline
                        .processors
                        .extend(compilation.traces_post.iter().cloned());
                    traces_enabled = true;
                }
                Some(Signal::Metrics) => metrics_enabled = true,
                Some(Signal::Logs) => logs_enabled = true,
                None => {}
            }
        }

        statuses.record_destination_ok(&dest.id);
    }

    let mut enabled_signals = Vec::new();
    if traces_enabled {
        enabled_signals.push(Signal::Traces);
    }
    if metrics_enabled {
        enabled_signals.push(Signal::Metrics);
    }
    if logs_enabled {
        enabled_signals.push(Signal::Logs);
    }

    // Assemble the routing table once at compile time. The runtime router
    // rebuilds the same table at connector start; doing it here surfaces
    // unroutable source filters while the compile is still attributable.
    let routing_table = RoutingTable::from_datastreams(datastreams);
    tracing::debug!(
        routes = routing_table.route_count(),
        pipelines = routing_table.pipeline_names().len(),
        "data-stream routing table assembled"
    );

    // Pipelines bridging the routing connectors to the forward connectors.
    for (name, pipeline) in build_datastream_pipelines(datastreams, &dest_forward_connectors) {
        config.service.pipelines.insert(name, pipeline);
    }

    // One root pipeline and one routing connector per enabled signal. The
    // connector carries the full data-stream definitions so the runtime
    // router can build its own routing table at start time.
    let datastreams_value = serde_json::to_value(datastreams)?;
    for &signal in &enabled_signals {
        let connector_name = names::router_connector_name(signal);
        let mut connector_config = GenericMap::new();
        connector_config.insert(
            names::DATASTREAMS_CONFIG_KEY.to_string(),
            datastreams_value.clone(),
        );
        config.connectors.insert(
            connector_name.clone(),
            serde_json::Value::Object(connector_config),
        );

        let signal_processors = match signal {
            Signal::Traces => &compilation.traces_pre,
            Signal::Metrics => &compilation.metrics,
            Signal::Logs => &compilation.logs,
        };
        let mut pipeline_processors = vec![
            names::MEMORY_LIMITER_PROCESSOR.to_string(),
            names::VERSION_PROCESSOR.to_string(),
        ];
        pipeline_processors.extend(signal_processors.iter().cloned());

        config.service.pipelines.insert(
            names::root_pipeline_name(signal),
            Pipeline {
                receivers: vec![names::OTLP_RECEIVER.to_string()],
                processors: pipeline_processors,
                exporters: vec![connector_name],
            },
        );
    }

    // The hook runs last and sees every pipeline name; its failure is fatal.
    if let Some(hook) = self_telemetry {
        let root_pipelines: Vec<String> = enabled_signals
            .iter()
            .map(|&signal| names::root_pipeline_name(signal))
            .collect();
        hook.apply(&mut config, &destination_pipelines, &root_pipelines)?;
    }

    if traces_enabled && !options.disable_service_graph {
        insert_service_graph(&mut config);
    }

    if metrics_enabled && options.cluster_metrics_enabled {
        insert_cluster_metrics(&mut config, &options.namespace);
    }

    // Freeze pass: every name a pipeline references must resolve before
    // the document ships.
    config.validate()?;

    let yaml = serde_yaml::to_string(&config)?;

    Ok(GatewayConfig {
        yaml,
        statuses,
        enabled_signals,
    })
}
