//! Notification delivery.
//!
//! Best-effort by contract: a failed push is logged and dropped, never
//! retried, never escalated. Delivery runs in its own task so a slow
//! endpoint cannot stall event processing.

use async_trait::async_trait;
use bridge_core::Notification;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sink delivery errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Push endpoint returned status {0}")]
    Status(u16),
}

/// Delivers one plain-text notification to the chat platform.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn push(&self, text: &str) -> Result<(), SinkError>;
}

/// HTTP push sink.
///
/// Posts `{"group_id": ..., "message": ...}` as JSON to the configured
/// endpoint.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
    group_id: u64,
}

impl HttpSink {
    #[must_use]
    pub fn new(url: String, group_id: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            group_id,
        }
    }
}

#[async_trait]
impl NotificationSink for HttpSink {
    async fn push(&self, text: &str) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({
                "group_id": self.group_id,
                "message": text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status(status.as_u16()));
        }

        tracing::debug!(group_id = self.group_id, "Notification pushed");
        Ok(())
    }
}

/// Drain the monitor's notification stream into a sink.
///
/// Deliveries run one at a time so messages reach the chat target in
/// emission order; failures are logged at warn and dropped. A slow
/// endpoint delays later deliveries but never the monitor, which only
/// sends on the unbounded channel. The returned handle completes when
/// the notification stream closes.
pub fn spawn_forwarder(
    mut notifications: mpsc::UnboundedReceiver<Notification>,
    sink: Arc<dyn NotificationSink>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            let text = notification.to_string();
            if let Err(e) = sink.push(&text).await {
                tracing::warn!(error = %e, text = %text, "Notification push failed");
            }
        }
        tracing::debug!("Notification stream closed, forwarder exiting");
    })
}
