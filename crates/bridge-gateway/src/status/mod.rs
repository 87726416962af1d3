//! Status query endpoint.
//!
//! Read-only view over the presence store, rendered as grouped plain
//! text. Served over HTTP so chat-side commands (or a human with curl)
//! can ask who is currently in voice.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use bridge_core::SharedPresenceStore;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Fixed reply when no one is in any voice channel
const EMPTY_STATUS: &str = "No one is in voice right now.";

/// Build the status router.
pub fn create_router(store: SharedPresenceStore) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/health", get(health_check))
        .with_state(store)
}

/// Serve the status endpoint until the process exits.
pub async fn serve(addr: SocketAddr, store: SharedPresenceStore) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Status endpoint listening");
    axum::serve(listener, create_router(store)).await
}

/// GET /status
async fn status(State(store): State<SharedPresenceStore>) -> String {
    let grouped = store.lock().grouped_by_channel();
    render_status(&grouped)
}

/// GET /health
async fn health_check() -> &'static str {
    "OK"
}

/// Render grouped occupancy as the status reply.
#[must_use]
pub fn render_status(groups: &[(String, Vec<String>)]) -> String {
    if groups.is_empty() {
        return EMPTY_STATUS.to_string();
    }

    let mut lines = vec!["Current voice status:".to_string()];
    for (channel, members) in groups {
        lines.push(format!("\n{channel}:"));
        for member in members {
            lines.push(format!("  - {member}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_status() {
        assert_eq!(render_status(&[]), "No one is in voice right now.");
    }

    #[test]
    fn test_render_grouped_status() {
        let groups = vec![
            (
                "Lobby".to_string(),
                vec!["Alice".to_string(), "Bob".to_string()],
            ),
            ("Kitchen".to_string(), vec!["Carol".to_string()]),
        ];

        let text = render_status(&groups);
        assert_eq!(
            text,
            "Current voice status:\n\nLobby:\n  - Alice\n  - Bob\n\nKitchen:\n  - Carol"
        );
    }
}
