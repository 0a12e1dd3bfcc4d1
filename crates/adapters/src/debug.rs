//! Debug destination
//!
//! Prints telemetry to the collector's stdout. Mostly used while setting up
//! a cluster and in tests.

use serde_json::json;

use weir_model::{Config, Destination};

use crate::common::export_pipelines;
use crate::registry::DestinationAdapter;
use crate::Result;

const VERBOSITY_KEY: &str = "DEBUG_VERBOSITY";

/// Adapter writing telemetry to the collector log.
pub struct DebugAdapter;

impl DestinationAdapter for DebugAdapter {
    fn dest_kind(&self) -> &'static str {
        "debug"
    }

    fn modify_config(&self, dest: &Destination, config: &mut Config) -> Result<Vec<String>> {
        let verbosity = dest.config_value(VERBOSITY_KEY).unwrap_or("basic");

        let exporter_name = format!("debug/{}", dest.id);
        config
            .exporters
            .insert(exporter_name.clone(), json!({ "verbosity": verbosity }));

        let discriminator = format!("debug-{}", dest.id);
        Ok(export_pipelines(dest, config, &discriminator, &exporter_name))
    }
}
