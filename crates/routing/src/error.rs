//! Routing error types

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while building or parsing routing identities
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A source filter named a workload kind with no canonical token
    #[error("unknown workload kind '{kind}'")]
    UnknownWorkloadKind {
        /// The unrecognized kind as supplied
        kind: String,
    },

    /// A canonical key string did not have the `namespace/kind/name` form
    #[error("malformed workload key '{key}'")]
    MalformedKey {
        /// The offending key
        key: String,
    },
}

impl RoutingError {
    /// Create an UnknownWorkloadKind error
    #[inline]
    pub fn unknown_workload_kind(kind: impl Into<String>) -> Self {
        Self::UnknownWorkloadKind { kind: kind.into() }
    }

    /// Create a MalformedKey error
    #[inline]
    pub fn malformed_key(key: impl Into<String>) -> Self {
        Self::MalformedKey { key: key.into() }
    }
}
