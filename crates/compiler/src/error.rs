//! Compiler error types
//!
//! Only the errors here abort a compile. Everything recoverable lands in
//! the per-resource status report instead.

use thiserror::Error;

use weir_adapters::AdapterError;
use weir_model::ValidationError;

/// Result type for compile operations
pub type Result<T> = std::result::Result<T, CompileError>;

/// Fatal compile errors.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The supplied base config lacks the required ingress receiver
    #[error("missing required receiver 'otlp' on config")]
    MissingOtlpReceiver,

    /// The adapter registry itself is broken (duplicate registration)
    #[error("failed to load destination adapters: {0}")]
    Registry(#[from] AdapterError),

    /// Data streams could not be encoded into the router connector config
    #[error("failed to encode data streams: {0}")]
    EncodeDatastreams(#[from] serde_json::Error),

    /// The self-telemetry hook rejected the final document
    #[error("self telemetry hook failed: {message}")]
    SelfTelemetry {
        /// What the hook reported
        message: String,
    },

    /// The finished document failed the freeze-pass validation
    #[error("invalid gateway config: {0}")]
    Validation(#[from] ValidationError),

    /// The final document could not be serialized
    #[error("failed to serialize gateway config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl CompileError {
    /// Create a SelfTelemetry error
    pub fn self_telemetry(message: impl Into<String>) -> Self {
        Self::SelfTelemetry {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_receiver_message() {
        let err = CompileError::MissingOtlpReceiver;
        assert!(err.to_string().contains("otlp"));
    }

    #[test]
    fn test_self_telemetry_message() {
        let err = CompileError::self_telemetry("no pipelines configured");
        assert!(err.to_string().contains("no pipelines configured"));
    }
}
