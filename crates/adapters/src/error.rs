//! Adapter error types

use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors an adapter (or the registry) can produce.
///
/// Adapter errors are recorded per destination in the compile report and
/// never abort the compile.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A required configuration key is absent
    #[error("key '{key}' not specified, destination will not be configured")]
    MissingKey {
        /// The missing configuration key
        key: &'static str,
    },

    /// An endpoint value could not be parsed or violates transport rules
    #[error("invalid value for '{key}': {message}")]
    InvalidEndpoint {
        /// The configuration key holding the endpoint
        key: &'static str,
        /// Why it was rejected
        message: String,
    },

    /// No adapter registered for a destination kind
    #[error("no adapter for destination kind '{kind}'")]
    UnknownKind {
        /// The unresolvable kind
        kind: String,
    },

    /// Two registered adapters claim the same kind
    #[error("duplicate adapter for destination kind '{kind}'")]
    DuplicateKind {
        /// The doubly-claimed kind
        kind: String,
    },
}

impl AdapterError {
    /// Create a MissingKey error
    #[inline]
    pub fn missing_key(key: &'static str) -> Self {
        Self::MissingKey { key }
    }

    /// Create an InvalidEndpoint error
    #[inline]
    pub fn invalid_endpoint(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            key,
            message: message.into(),
        }
    }

    /// Create an UnknownKind error
    #[inline]
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    /// Create a DuplicateKind error
    #[inline]
    pub fn duplicate_kind(kind: impl Into<String>) -> Self {
        Self::DuplicateKind { kind: kind.into() }
    }
}
