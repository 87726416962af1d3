//! Voice presence bridge entry point
//!
//! Run with:
//! ```bash
//! cargo run -p bridge-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use bridge_common::{try_init_tracing, BridgeConfig, TracingConfig};
use bridge_core::PresenceMonitor;
use bridge_gateway::client::GatewayClient;
use bridge_gateway::sink::{spawn_forwarder, HttpSink, NotificationSink};
use bridge_gateway::status;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing(&TracingConfig::default()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Bridge failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting voice presence bridge...");

    let config = BridgeConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        guild_id = config.gateway.guild_id,
        leave_delay_secs = config.leave_delay_secs,
        "Configuration loaded"
    );

    let (monitor, notifications) = PresenceMonitor::new(config.leave_delay());
    let monitor = Arc::new(monitor);

    // Best-effort notification delivery, decoupled from event handling
    let sink: Arc<dyn NotificationSink> =
        Arc::new(HttpSink::new(config.push.url.clone(), config.push.group_id));
    spawn_forwarder(notifications, sink);

    // Status endpoint
    let status_addr: SocketAddr = config.status.address().parse()?;
    let store = monitor.store();
    tokio::spawn(async move {
        if let Err(e) = status::serve(status_addr, store).await {
            error!(error = %e, "Status endpoint failed");
        }
    });

    // Gateway client runs until the process is stopped
    let client = GatewayClient::new(
        config.gateway.url.clone(),
        config.gateway.guild_id,
        monitor,
    );
    client.run().await;

    Ok(())
}
