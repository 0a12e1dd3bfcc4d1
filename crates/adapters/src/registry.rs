//! Adapter trait and registry

use std::collections::HashMap;

use weir_model::{Config, Destination};

use crate::debug::DebugAdapter;
use crate::otlp_grpc::OtlpGrpcAdapter;
use crate::otlp_http::OtlpHttpAdapter;
use crate::{AdapterError, Result};

/// Translates one destination kind into engine components.
///
/// Side effects are confined to the passed `Config`; the returned pipeline
/// names are the only output the compiler treats as authoritative.
pub trait DestinationAdapter: Send + Sync {
    /// The destination kind this adapter resolves.
    fn dest_kind(&self) -> &'static str;

    /// Write the exporter wiring for `dest` into `config`.
    ///
    /// Returns the names of the pipelines created, one per enabled signal,
    /// each named `"<signal>/<discriminator>"`.
    ///
    /// # Errors
    ///
    /// Returns an error when required configuration is missing or invalid.
    /// Such errors degrade the destination, never the compile.
    fn modify_config(&self, dest: &Destination, config: &mut Config) -> Result<Vec<String>>;
}

/// The append-only registration list of built-in adapters.
///
/// New destination kinds are added here.
pub fn builtin_adapters() -> Vec<Box<dyn DestinationAdapter>> {
    vec![
        Box::new(OtlpGrpcAdapter),
        Box::new(OtlpHttpAdapter),
        Box::new(DebugAdapter),
    ]
}

/// Lookup from destination kind to adapter.
pub struct AdapterRegistry {
    adapters: HashMap<&'static str, Box<dyn DestinationAdapter>>,
}

impl AdapterRegistry {
    /// Load the built-in adapters.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::DuplicateKind` if two adapters claim the same
    /// kind, which indicates a registration bug.
    pub fn load() -> Result<Self> {
        Self::with_adapters(builtin_adapters())
    }

    /// Build a registry from an explicit adapter list.
    ///
    /// Used by hosts that extend the built-in set, and by tests.
    pub fn with_adapters(list: Vec<Box<dyn DestinationAdapter>>) -> Result<Self> {
        let mut adapters: HashMap<&'static str, Box<dyn DestinationAdapter>> = HashMap::new();
        for adapter in list {
            let kind = adapter.dest_kind();
            if adapters.contains_key(kind) {
                return Err(AdapterError::duplicate_kind(kind));
            }
            adapters.insert(kind, adapter);
        }
        Ok(Self { adapters })
    }

    /// Resolve the adapter for a destination kind.
    pub fn get(&self, kind: &str) -> Option<&dyn DestinationAdapter> {
        self.adapters.get(kind).map(Box::as_ref)
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// True when no adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
