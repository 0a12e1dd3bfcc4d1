//! Fragment merging and document validation
//!
//! Compile stages build their components in separate fragments; merging
//! them here turns a name collision into an error instead of a silent
//! overwrite. `validate` is the freeze pass run once the document is
//! complete: every name a pipeline references must resolve, and a pipeline
//! without exporters cannot deliver data.

use thiserror::Error;

use crate::{Config, GenericMap};

/// Error produced when two fragments claim the same component name.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The same name appears in both fragments' section
    #[error("duplicate {section} '{name}' in merged configs")]
    DuplicateComponent {
        /// Section the collision is in
        section: &'static str,
        /// The colliding component name
        name: String,
    },

    /// The same pipeline name appears in both fragments
    #[error("duplicate pipeline '{name}' in merged configs")]
    DuplicatePipeline {
        /// The colliding pipeline name
        name: String,
    },
}

/// Error produced by the final validation pass.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A pipeline references a name its section does not define
    #[error("pipeline '{pipeline}' references unknown {role} '{name}'")]
    UnknownComponent {
        /// The referencing pipeline
        pipeline: String,
        /// receiver, processor, or exporter
        role: &'static str,
        /// The unresolved name
        name: String,
    },

    /// The service enables an extension that is not defined
    #[error("service extension '{name}' is not defined")]
    UnknownExtension {
        /// The unresolved extension name
        name: String,
    },

    /// A pipeline has no exporters and can never deliver data
    #[error("pipeline '{pipeline}' has no exporters")]
    NoExporters {
        /// The empty pipeline
        pipeline: String,
    },
}

impl Config {
    /// Merge a fragment into this document, rejecting name collisions.
    ///
    /// The merge is atomic: on error, neither document changed. Service
    /// extensions are appended with duplicates dropped; telemetry metrics
    /// keys collide like components, except `readers`, which concatenates.
    ///
    /// # Errors
    ///
    /// Returns a `MergeError` naming the first collision found.
    pub fn merge(&mut self, fragment: Config) -> Result<(), MergeError> {
        let sections = [
            ("receiver", &self.receivers, &fragment.receivers),
            ("exporter", &self.exporters, &fragment.exporters),
            ("processor", &self.processors, &fragment.processors),
            ("extension", &self.extensions, &fragment.extensions),
            ("connector", &self.connectors, &fragment.connectors),
        ];
        for (section, existing, incoming) in sections {
            if let Some(name) = first_collision(existing, incoming) {
                return Err(MergeError::DuplicateComponent {
                    section,
                    name: name.to_string(),
                });
            }
        }
        for name in fragment.service.pipelines.keys() {
            if self.service.pipelines.contains_key(name) {
                return Err(MergeError::DuplicatePipeline {
                    name: name.clone(),
                });
            }
        }
        for (key, _) in fragment.service.telemetry.metrics.iter() {
            if key != "readers" && self.service.telemetry.metrics.contains_key(key) {
                return Err(MergeError::DuplicateComponent {
                    section: "telemetry metric",
                    name: key.clone(),
                });
            }
        }

        self.receivers.extend(fragment.receivers);
        self.exporters.extend(fragment.exporters);
        self.processors.extend(fragment.processors);
        self.extensions.extend(fragment.extensions);
        self.connectors.extend(fragment.connectors);
        self.service.pipelines.extend(fragment.service.pipelines);

        for extension in fragment.service.extensions {
            if !self.service.extensions.contains(&extension) {
                self.service.extensions.push(extension);
            }
        }
        for (key, value) in fragment.service.telemetry.metrics {
            if key == "readers" {
                append_readers(&mut self.service.telemetry.metrics, value);
            } else {
                self.service.telemetry.metrics.insert(key, value);
            }
        }
        self.service
            .telemetry
            .resource
            .extend(fragment.service.telemetry.resource);

        Ok(())
    }

    /// Validate the finished document.
    ///
    /// Every pipeline receiver must be a defined receiver or connector,
    /// every processor a defined processor, every exporter a defined
    /// exporter or connector; enabled extensions must be defined; no
    /// pipeline may have an empty exporter list.
    ///
    /// # Errors
    ///
    /// Returns the first unresolved reference found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (pipeline_name, pipeline) in &self.service.pipelines {
            for receiver in &pipeline.receivers {
                if !self.receivers.contains_key(receiver)
                    && !self.connectors.contains_key(receiver)
                {
                    return Err(ValidationError::UnknownComponent {
                        pipeline: pipeline_name.clone(),
                        role: "receiver",
                        name: receiver.clone(),
                    });
                }
            }
            for processor in &pipeline.processors {
                if !self.processors.contains_key(processor) {
                    return Err(ValidationError::UnknownComponent {
                        pipeline: pipeline_name.clone(),
                        role: "processor",
                        name: processor.clone(),
                    });
                }
            }
            if pipeline.exporters.is_empty() {
                return Err(ValidationError::NoExporters {
                    pipeline: pipeline_name.clone(),
                });
            }
            for exporter in &pipeline.exporters {
                if !self.exporters.contains_key(exporter)
                    && !self.connectors.contains_key(exporter)
                {
                    return Err(ValidationError::UnknownComponent {
                        pipeline: pipeline_name.clone(),
                        role: "exporter",
                        name: exporter.clone(),
                    });
                }
            }
        }

        for extension in &self.service.extensions {
            if !self.extensions.contains_key(extension) {
                return Err(ValidationError::UnknownExtension {
                    name: extension.clone(),
                });
            }
        }

        Ok(())
    }
}

fn first_collision<'a>(existing: &'a GenericMap, incoming: &GenericMap) -> Option<&'a str> {
    existing
        .iter()
        .map(|(name, _)| name.as_str())
        .find(|name| incoming.contains_key(*name))
}

fn append_readers(metrics: &mut GenericMap, value: serde_json::Value) {
    match metrics.get_mut("readers").and_then(|r| r.as_array_mut()) {
        Some(existing) => {
            if let serde_json::Value::Array(incoming) = value {
                existing.extend(incoming);
            }
        }
        None => {
            metrics.insert("readers".to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::Pipeline;

    fn fragment_with_exporter(name: &str) -> Config {
        let mut fragment = Config::default();
        fragment.exporters.insert(name.to_string(), json!({}));
        fragment
    }

    #[test]
    fn test_merge_disjoint_fragments() {
        let mut config = fragment_with_exporter("otlp/generic-d1");
        config.merge(fragment_with_exporter("otlp/generic-d2")).unwrap();
        assert_eq!(config.exporters.len(), 2);
    }

    #[test]
    fn test_merge_detects_component_collision() {
        let mut config = fragment_with_exporter("otlp/generic-d1");
        let err = config
            .merge(fragment_with_exporter("otlp/generic-d1"))
            .unwrap_err();
        assert!(err.to_string().contains("otlp/generic-d1"));
        assert!(err.to_string().contains("duplicate exporter"));
        // Atomic: nothing changed.
        assert_eq!(config.exporters.len(), 1);
    }

    #[test]
    fn test_merge_detects_pipeline_collision() {
        let mut config = Config::default();
        config.service.pipelines.insert(
            "traces/generic-d1".to_string(),
            Pipeline::exporting_to(vec!["otlp/generic-d1".to_string()]),
        );

        let mut fragment = Config::default();
        fragment.service.pipelines.insert(
            "traces/generic-d1".to_string(),
            Pipeline::exporting_to(vec!["otlp/other".to_string()]),
        );

        let err = config.merge(fragment).unwrap_err();
        assert!(matches!(err, MergeError::DuplicatePipeline { .. }));
    }

    #[test]
    fn test_merge_appends_service_extensions_without_duplicates() {
        let mut config = Config::default();
        config.service.extensions = vec!["health_check".to_string()];

        let mut fragment = Config::default();
        fragment.service.extensions =
            vec!["health_check".to_string(), "pprof".to_string()];

        config.merge(fragment).unwrap();
        assert_eq!(config.service.extensions, vec!["health_check", "pprof"]);
    }

    #[test]
    fn test_validate_complete_document() {
        let mut config = Config::default();
        config.receivers.insert("otlp".to_string(), json!({}));
        config.processors.insert("batch".to_string(), json!({}));
        config.connectors.insert("forward/traces/x".to_string(), json!({}));
        config.exporters.insert("otlp/x".to_string(), json!({}));
        config.service.pipelines.insert(
            "traces/x".to_string(),
            Pipeline {
                receivers: vec!["forward/traces/x".to_string()],
                processors: vec!["batch".to_string()],
                exporters: vec!["otlp/x".to_string()],
            },
        );

        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_processor() {
        let mut config = Config::default();
        config.receivers.insert("otlp".to_string(), json!({}));
        config.exporters.insert("otlp/x".to_string(), json!({}));
        config.service.pipelines.insert(
            "traces/x".to_string(),
            Pipeline {
                receivers: vec!["otlp".to_string()],
                processors: vec!["missing".to_string()],
                exporters: vec!["otlp/x".to_string()],
            },
        );

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert!(err.to_string().contains("processor"));
    }

    #[test]
    fn test_validate_accepts_connector_as_receiver_and_exporter() {
        let mut config = Config::default();
        config.receivers.insert("otlp".to_string(), json!({}));
        config.connectors.insert("weirrouter/traces".to_string(), json!({}));
        config.exporters.insert("otlp/x".to_string(), json!({}));
        config.service.pipelines.insert(
            "traces/in".to_string(),
            Pipeline {
                receivers: vec!["otlp".to_string()],
                processors: vec![],
                exporters: vec!["weirrouter/traces".to_string()],
            },
        );
        config.service.pipelines.insert(
            "traces/b".to_string(),
            Pipeline {
                receivers: vec!["weirrouter/traces".to_string()],
                processors: vec![],
                exporters: vec!["otlp/x".to_string()],
            },
        );

        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_exporters() {
        let mut config = Config::default();
        config.receivers.insert("otlp".to_string(), json!({}));
        config.service.pipelines.insert(
            "traces/x".to_string(),
            Pipeline {
                receivers: vec!["otlp".to_string()],
                processors: vec![],
                exporters: vec![],
            },
        );

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::NoExporters { .. }));
    }

    #[test]
    fn test_validate_rejects_unknown_service_extension() {
        let mut config = Config::default();
        config.service.extensions = vec!["health_check".to_string()];

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownExtension { .. }));
    }

    #[test]
    fn test_merge_concatenates_telemetry_readers() {
        let mut config = Config::default();
        config
            .service
            .telemetry
            .metrics
            .insert("readers".to_string(), json!([{ "pull": {} }]));

        let mut fragment = Config::default();
        fragment
            .service
            .telemetry
            .metrics
            .insert("readers".to_string(), json!([{ "periodic": {} }]));

        config.merge(fragment).unwrap();
        let readers = config.service.telemetry.metrics["readers"].as_array().unwrap();
        assert_eq!(readers.len(), 2);
    }
}
