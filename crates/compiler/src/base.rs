//! Base gateway configuration
//!
//! The starting document every compile mutates: the OTLP ingress receiver,
//! the processors shared by all pipelines, and the operational extensions.

use serde_json::json;

use weir_model::{names, Config, GenericMap};

/// Keepalive bound on node-collector connections. Forces clients to
/// re-resolve so new gateway replicas pick up traffic after a scale-up.
const MAX_CONNECTION_AGE: &str = "15s";
const MAX_CONNECTION_AGE_GRACE: &str = "2s";

/// A conservative memory limiter for hosts that don't size it themselves.
pub fn default_memory_limiter() -> GenericMap {
    object(json!({
        "check_interval": "1s",
        "limit_percentage": 75,
        "spike_limit_percentage": 15,
    }))
}

/// Build the base config the gateway compiler starts from.
///
/// The memory limiter configuration is supplied by the caller, which sizes
/// it from the gateway's resource settings.
pub fn base_config(memory_limiter: GenericMap) -> Config {
    let mut config = Config::default();

    config.receivers.insert(
        names::OTLP_RECEIVER.to_string(),
        json!({
            "protocols": {
                "grpc": {
                    "endpoint": "0.0.0.0:4317",
                    // Large enough that node collectors never fragment batches.
                    "max_recv_msg_size_mib": 128,
                    "keepalive": {
                        "server_parameters": {
                            "max_connection_age": MAX_CONNECTION_AGE,
                            "max_connection_age_grace": MAX_CONNECTION_AGE_GRACE,
                        },
                    },
                },
                "http": {
                    "endpoint": "0.0.0.0:4318",
                },
            },
        }),
    );

    config.processors.insert(
        names::MEMORY_LIMITER_PROCESSOR.to_string(),
        serde_json::Value::Object(memory_limiter),
    );
    config.processors.insert(
        names::VERSION_PROCESSOR.to_string(),
        json!({
            "attributes": [
                {
                    "key": "weir.version",
                    "value": "${WEIR_VERSION}",
                    "action": "upsert",
                },
            ],
        }),
    );
    // Default values; destination pipelines reference it by name.
    config
        .processors
        .insert(names::GENERIC_BATCH_PROCESSOR.to_string(), json!({}));

    config
        .extensions
        .insert("health_check".to_string(), json!({ "endpoint": "0.0.0.0:13133" }));
    config
        .extensions
        .insert("pprof".to_string(), json!({ "endpoint": "0.0.0.0:1777" }));
    config.service.extensions = vec!["health_check".to_string(), "pprof".to_string()];

    config
}

pub(crate) fn object(value: serde_json::Value) -> GenericMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => GenericMap::new(),
    }
}
