//! Load-bearing component names
//!
//! The compiler and the runtime router agree on component names by exact
//! string match. Everything that names a component on both sides lives here.

use crate::Signal;

/// The ingress receiver every gateway config must define.
pub const OTLP_RECEIVER: &str = "otlp";

/// Memory limiter, always the first processor on root pipelines.
pub const MEMORY_LIMITER_PROCESSOR: &str = "memory_limiter";

/// Resource processor stamping the gateway version on every root pipeline.
pub const VERSION_PROCESSOR: &str = "resource/weir-version";

/// Generic batch processor applied to every destination pipeline.
pub const GENERIC_BATCH_PROCESSOR: &str = "batch";

/// Small-batches processor, applied per traces destination pipeline when a
/// user-defined processor requests it (never applied globally).
pub const SMALL_BATCHES_PROCESSOR: &str = "batch/small-batches";

/// Trace-grouping processor prepended when time-window sampling is enabled.
pub const GROUP_BY_TRACES_PROCESSOR: &str = "groupbytraces";

/// Component kind of the per-signal routing connector.
pub const ROUTER_CONNECTOR_KIND: &str = "weirrouter";

/// Name prefix of the per-destination-pipeline forward connectors.
pub const FORWARD_CONNECTOR_PREFIX: &str = "forward/";

/// Discriminator of the per-signal root pipelines (`"<signal>/in"`).
pub const ROOT_PIPELINE_DISCRIMINATOR: &str = "in";

/// Config key under which the router connector receives the data streams.
pub const DATASTREAMS_CONFIG_KEY: &str = "datastreams";

/// Forward connector bridging upstream routes into one destination pipeline.
#[inline]
pub fn forward_connector_name(pipeline_name: &str) -> String {
    format!("{FORWARD_CONNECTOR_PREFIX}{pipeline_name}")
}

/// The routing connector instance for one signal (`"weirrouter/<signal>"`).
#[inline]
pub fn router_connector_name(signal: Signal) -> String {
    format!("{ROUTER_CONNECTOR_KIND}/{signal}")
}

/// The root pipeline receiving raw ingress for one signal (`"<signal>/in"`).
#[inline]
pub fn root_pipeline_name(signal: Signal) -> String {
    signal.pipeline_name(ROOT_PIPELINE_DISCRIMINATOR)
}

/// The data-stream pipeline for one (signal, group) pair.
#[inline]
pub fn datastream_pipeline_name(signal: Signal, group_name: &str) -> String {
    signal.pipeline_name(group_name)
}
