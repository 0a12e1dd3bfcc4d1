//! Pipeline hand-off handle
//!
//! `PipelineHandle` wraps a channel sender and the pipeline name it feeds,
//! letting the router forward batches without knowing what consumes them.
//! All routes naming the same pipeline share one handle; disambiguation
//! beyond the name is the data-stream pipeline's job downstream.

use tokio::sync::mpsc;

use weir_protocol::SignalBatch;

use crate::{Result, RouterError};

/// Handle to one downstream pipeline.
pub struct PipelineHandle {
    /// Pipeline name as it appears in the routing table
    name: String,

    /// Channel sender for regrouped batches
    sender: mpsc::Sender<SignalBatch>,
}

impl PipelineHandle {
    /// Create a handle over an existing sender.
    #[inline]
    pub fn new(name: impl Into<String>, sender: mpsc::Sender<SignalBatch>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }

    /// Create a handle together with its receiving end.
    pub fn channel(
        name: impl Into<String>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<SignalBatch>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(name, sender), receiver)
    }

    /// The pipeline this handle feeds.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward a batch, waiting for channel capacity.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::Forward` when the channel is closed.
    pub async fn send(&self, batch: SignalBatch) -> Result<()> {
        self.sender
            .send(batch)
            .await
            .map_err(|_| RouterError::forward(&self.name))
    }

    /// Check if the downstream side is gone.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Remaining channel capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    /// Maximum channel capacity.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}

impl std::fmt::Debug for PipelineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineHandle")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use weir_model::Signal;

    #[tokio::test]
    async fn test_send_and_receive() {
        let (handle, mut receiver) = PipelineHandle::channel("traces/b", 4);
        assert_eq!(handle.name(), "traces/b");

        handle.send(SignalBatch::new(Signal::Traces)).await.unwrap();
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.signal(), Signal::Traces);
    }

    #[tokio::test]
    async fn test_send_to_closed_channel_fails() {
        let (handle, receiver) = PipelineHandle::channel("logs/a", 4);
        drop(receiver);

        assert!(handle.is_closed());
        let err = handle.send(SignalBatch::new(Signal::Logs)).await.unwrap_err();
        assert!(err.to_string().contains("logs/a"));
    }

    #[test]
    fn test_debug_format() {
        let (handle, _receiver) = PipelineHandle::channel("metrics/m", 4);
        let debug = format!("{handle:?}");
        assert!(debug.contains("metrics/m"));
        assert!(debug.contains("PipelineHandle"));
    }
}
