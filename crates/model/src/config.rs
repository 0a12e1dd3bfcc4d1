//! The compiled collector configuration document
//!
//! Mirrors the document the processing engine loads: named component
//! sections plus a `service` section tying components into pipelines.
//! Component names are `"<kind>/<discriminator>"`. All sections use sorted
//! maps so repeated compiles serialize byte-identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-form component configuration, keyed by field name.
///
/// Backed by `serde_json::Map`, which sorts keys, so any `GenericMap` that
/// reaches the serializer has a stable field order.
pub type GenericMap = serde_json::Map<String, serde_json::Value>;

/// The full configuration document for the processing engine.
///
/// Each section maps a component name to that component's own configuration.
/// A name referenced by a pipeline must exist in the matching section; the
/// compiler owns that invariant, the document does not check it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "GenericMap::is_empty")]
    pub receivers: GenericMap,

    #[serde(default, skip_serializing_if = "GenericMap::is_empty")]
    pub exporters: GenericMap,

    #[serde(default, skip_serializing_if = "GenericMap::is_empty")]
    pub processors: GenericMap,

    #[serde(default, skip_serializing_if = "GenericMap::is_empty")]
    pub extensions: GenericMap,

    #[serde(default, skip_serializing_if = "GenericMap::is_empty")]
    pub connectors: GenericMap,

    #[serde(default)]
    pub service: Service,
}

impl Config {
    /// Check whether a receiver with the given name is defined.
    #[inline]
    pub fn has_receiver(&self, name: &str) -> bool {
        self.receivers.contains_key(name)
    }

    /// Get a mutable reference to a pipeline, if it exists.
    #[inline]
    pub fn pipeline_mut(&mut self, name: &str) -> Option<&mut Pipeline> {
        self.service.pipelines.get_mut(name)
    }
}

/// The `service` section: enabled extensions, pipelines, and the engine's
/// own telemetry settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pipelines: BTreeMap<String, Pipeline>,

    #[serde(default, skip_serializing_if = "Telemetry::is_empty")]
    pub telemetry: Telemetry,
}

/// Engine self-telemetry settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    #[serde(default, skip_serializing_if = "GenericMap::is_empty")]
    pub metrics: GenericMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource: BTreeMap<String, String>,
}

impl Telemetry {
    /// True when no telemetry settings are present (section omitted on the wire).
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.resource.is_empty()
    }
}

/// One named path through the engine: receivers feed processors in order,
/// processors feed exporters.
///
/// A pipeline expected to deliver data must list at least one exporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exporters: Vec<String>,
}

impl Pipeline {
    /// A pipeline that only declares its exporters; receivers and processors
    /// are filled in by later compile stages.
    pub fn exporting_to(exporters: Vec<String>) -> Self {
        Self {
            exporters,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_config_serializes_to_bare_service() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("receivers"));
        assert!(!yaml.contains("exporters"));
        assert!(yaml.contains("service"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let mut config = Config::default();
        config
            .receivers
            .insert("otlp".into(), json!({ "protocols": { "grpc": {} } }));
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("otlp"));
        assert!(!yaml.contains("connectors"));
        assert!(!yaml.contains("telemetry"));
    }

    #[test]
    fn test_pipeline_roundtrip() {
        let pipeline = Pipeline {
            receivers: vec!["otlp".into()],
            processors: vec!["memory_limiter".into(), "batch".into()],
            exporters: vec!["weirrouter/traces".into()],
        };
        let yaml = serde_yaml::to_string(&pipeline).unwrap();
        let back: Pipeline = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, pipeline);
    }

    #[test]
    fn test_section_keys_serialize_sorted() {
        let mut config = Config::default();
        config.exporters.insert("otlp/b".into(), json!({}));
        config.exporters.insert("debug/a".into(), json!({}));
        let yaml = serde_yaml::to_string(&config).unwrap();
        let debug_pos = yaml.find("debug/a").unwrap();
        let otlp_pos = yaml.find("otlp/b").unwrap();
        assert!(debug_pos < otlp_pos);
    }

    #[test]
    fn test_exporting_to() {
        let pipeline = Pipeline::exporting_to(vec!["otlp/generic-d1".into()]);
        assert!(pipeline.receivers.is_empty());
        assert!(pipeline.processors.is_empty());
        assert_eq!(pipeline.exporters, vec!["otlp/generic-d1"]);
    }
}
