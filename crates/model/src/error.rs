//! Model error types

use thiserror::Error;

/// Error produced when a processor cannot generate its native configuration.
///
/// Recorded against the processor's ID in the compile report; never fatal.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The processor definition is invalid for its declared kind.
    #[error("processor '{id}' has invalid configuration: {message}")]
    InvalidConfig {
        /// Processor ID
        id: String,
        /// What was wrong
        message: String,
    },

    /// No known translation for this processor kind.
    #[error("unsupported processor kind '{kind}'")]
    UnsupportedKind {
        /// The unrecognized kind
        kind: String,
    },
}

impl ProcessorError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create an UnsupportedKind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }
}
