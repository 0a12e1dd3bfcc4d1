//! Generic OTLP gRPC destination

use serde_json::json;

use weir_model::{Config, Destination};

use crate::common::export_pipelines;
use crate::endpoint::parse_otlp_grpc_endpoint;
use crate::registry::DestinationAdapter;
use crate::{AdapterError, Result};

const ENDPOINT_KEY: &str = "OTLP_GRPC_ENDPOINT";
const TLS_ENABLED_KEY: &str = "OTLP_GRPC_TLS_ENABLED";
const COMPRESSION_KEY: &str = "OTLP_GRPC_COMPRESSION";

/// Adapter for any backend speaking plain OTLP over gRPC.
pub struct OtlpGrpcAdapter;

impl DestinationAdapter for OtlpGrpcAdapter {
    fn dest_kind(&self) -> &'static str {
        "otlp"
    }

    fn modify_config(&self, dest: &Destination, config: &mut Config) -> Result<Vec<String>> {
        let raw_endpoint = dest
            .config_value(ENDPOINT_KEY)
            .ok_or_else(|| AdapterError::missing_key(ENDPOINT_KEY))?;

        let tls_enabled = dest.config_value(TLS_ENABLED_KEY) == Some("true");
        let endpoint = parse_otlp_grpc_endpoint(ENDPOINT_KEY, raw_endpoint, tls_enabled)?;

        let mut exporter = json!({
            "endpoint": endpoint,
            "tls": {
                "insecure": !tls_enabled,
            },
        });
        if let Some(compression) = dest.config_value(COMPRESSION_KEY) {
            exporter["compression"] = json!(compression);
        }

        let exporter_name = format!("otlp/generic-{}", dest.id);
        config.exporters.insert(exporter_name.clone(), exporter);

        let discriminator = format!("generic-{}", dest.id);
        Ok(export_pipelines(dest, config, &discriminator, &exporter_name))
    }
}
