//! Router error types

use thiserror::Error;

/// Result type for router operations
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors surfaced by a router call.
///
/// Unroutable resources are not errors; they drop silently. Only a
/// failing hand-off reaches the caller, and it fails the whole call.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A downstream pipeline hand-off failed (its channel is closed)
    #[error("failed to forward batch to pipeline '{pipeline}': channel closed")]
    Forward {
        /// The pipeline whose hand-off failed
        pipeline: String,
    },
}

impl RouterError {
    /// Create a Forward error
    #[inline]
    pub fn forward(pipeline: impl Into<String>) -> Self {
        Self::Forward {
            pipeline: pipeline.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_error_names_pipeline() {
        let err = RouterError::forward("traces/b");
        assert!(err.to_string().contains("traces/b"));
        assert!(err.to_string().contains("channel closed"));
    }
}
