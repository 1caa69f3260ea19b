//! Notification sink abstraction.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Telegram API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Destination for notification messages.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver a plain-text message.
    async fn send(&self, message: &str) -> Result<(), AlertError>;
}

/// Sink that only logs messages. Used when no bot is configured or in dry-run mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl AlertSink for LogSink {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        info!(message = message, "Notification (not sent)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_never_fails() {
        assert!(LogSink.send("hello").await.is_ok());
    }
}
