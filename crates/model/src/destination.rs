//! Destination input type
//!
//! A destination is one configured export target. It is supplied fresh on
//! every compile and never mutated; the adapter for its kind reads the
//! key/value configuration and writes the matching exporter into the
//! document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Signal;

/// A configured telemetry export target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Unique across all destinations; used to derive component names.
    pub id: String,

    /// Adapter-resolvable destination kind (e.g. `"otlp"`, `"otlphttp"`).
    pub kind: String,

    /// Signals this destination should receive.
    #[serde(default)]
    pub signals: Vec<Signal>,

    /// Free-form key/value configuration interpreted by the adapter.
    #[serde(default)]
    pub config: BTreeMap<String, String>,

    /// Secret holding credentials, injected into the collector environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

impl Destination {
    /// Create a destination with no signals and no configuration.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            signals: Vec::new(),
            config: BTreeMap::new(),
            secret_name: None,
        }
    }

    /// Set the enabled signals.
    pub fn with_signals(mut self, signals: impl IntoIterator<Item = Signal>) -> Self {
        self.signals = signals.into_iter().collect();
        self
    }

    /// Add one configuration key.
    pub fn with_config_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Check whether a signal is enabled for this destination.
    #[inline]
    pub fn has_signal(&self, signal: Signal) -> bool {
        self.signals.contains(&signal)
    }

    /// Look up a configuration value.
    #[inline]
    pub fn config_value(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_helpers() {
        let dest = Destination::new("d1", "otlp")
            .with_signals([Signal::Traces, Signal::Logs])
            .with_config_value("OTLP_GRPC_ENDPOINT", "collector:4317");

        assert!(dest.has_signal(Signal::Traces));
        assert!(!dest.has_signal(Signal::Metrics));
        assert_eq!(dest.config_value("OTLP_GRPC_ENDPOINT"), Some("collector:4317"));
        assert_eq!(dest.config_value("missing"), None);
    }

    #[test]
    fn test_deserialize_minimal() {
        let dest: Destination =
            serde_json::from_str(r#"{"id": "d1", "kind": "debug"}"#).unwrap();
        assert_eq!(dest.id, "d1");
        assert!(dest.signals.is_empty());
        assert!(dest.config.is_empty());
        assert!(dest.secret_name.is_none());
    }
}
