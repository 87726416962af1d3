//! Upstream gateway client.
//!
//! Maintains a WebSocket connection to the voice gateway, resyncs the
//! presence monitor from the roster delivered on each (re)connect, and
//! feeds voice transitions through in arrival order. Connection faults
//! stay inside this module; the core never sees them.

use bridge_core::PresenceMonitor;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::events::GatewayFrame;

/// Initial reconnect backoff
const BACKOFF_INITIAL: Duration = Duration::from_secs(1);
/// Backoff ceiling
const BACKOFF_MAX: Duration = Duration::from_secs(60);

/// Gateway client errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Gateway closed the connection")]
    Closed,
}

/// WebSocket client for the upstream voice gateway.
pub struct GatewayClient {
    url: String,
    guild_id: u64,
    monitor: Arc<PresenceMonitor>,
}

impl GatewayClient {
    #[must_use]
    pub fn new(url: String, guild_id: u64, monitor: Arc<PresenceMonitor>) -> Self {
        Self {
            url,
            guild_id,
            monitor,
        }
    }

    /// Run the connect/read loop forever, reconnecting with capped
    /// exponential backoff after any failure.
    pub async fn run(&self) {
        let mut backoff = BACKOFF_INITIAL;

        loop {
            match self.run_connection().await {
                Ok(()) => {
                    tracing::warn!("Gateway connection ended, reconnecting");
                    backoff = BACKOFF_INITIAL;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        retry_in_secs = backoff.as_secs(),
                        "Gateway connection failed"
                    );
                }
            }

            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(BACKOFF_MAX);
        }
    }

    /// Run a single connection to completion.
    async fn run_connection(&self) -> Result<(), GatewayError> {
        tracing::info!(url = %self.url, "Connecting to gateway");
        let (stream, _) = connect_async(self.url.as_str()).await?;
        let (_, mut read) = stream.split();

        tracing::info!("Gateway connected, waiting for roster");

        while let Some(message) = read.next().await {
            match message? {
                Message::Text(raw) => self.handle_frame(&raw),
                Message::Close(frame) => {
                    tracing::info!(frame = ?frame, "Gateway sent close");
                    return Err(GatewayError::Closed);
                }
                Message::Ping(_) | Message::Pong(_) => {}
                other => {
                    tracing::debug!(message = ?other, "Ignoring non-text frame");
                }
            }
        }

        Ok(())
    }

    /// Decode one text frame and apply it to the monitor.
    ///
    /// A malformed frame is logged and skipped; it does not tear down
    /// the connection.
    fn handle_frame(&self, raw: &str) {
        let frame = match GatewayFrame::decode(raw) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Undecodable gateway frame, skipping");
                return;
            }
        };

        match frame {
            GatewayFrame::Ready(payload) => {
                if payload.guild_id != self.guild_id {
                    tracing::warn!(
                        guild_id = payload.guild_id,
                        expected = self.guild_id,
                        "Ready frame for a different guild, ignoring"
                    );
                    return;
                }
                self.monitor.resync(&payload.into_roster());
            }
            GatewayFrame::VoiceState(payload) => {
                if let Some(transition) = payload.into_transition(self.guild_id) {
                    self.monitor.handle_transition(&transition);
                }
            }
            GatewayFrame::Heartbeat => {
                tracing::trace!("Gateway heartbeat");
            }
        }
    }
}
