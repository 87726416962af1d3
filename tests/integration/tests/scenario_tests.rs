//! End-to-end presence scenarios, driven through the real monitor with
//! paused tokio time.

use integration_tests::{Harness, RecordingSink};
use std::sync::Arc;
use std::time::Duration;

use bridge_gateway::sink::{spawn_forwarder, NotificationSink};
use bridge_gateway::status::render_status;

/// A user leaves and stays gone: exactly one "left" notification, at or
/// after the 60-second delay.
#[tokio::test(start_paused = true)]
async fn scenario_confirmed_departure() {
    let mut harness = Harness::new();
    harness.seed(&[("u1", "U", "Lobby")]);

    harness.event("u1", "U", Some("Lobby"), None);
    assert!(harness.drain().is_empty());

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(harness.drain(), vec!["U left voice channel: Lobby"]);

    // Nothing further ever arrives for this episode
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(harness.drain().is_empty());
}

/// A user drops and reconnects to the same channel within the window:
/// zero notifications total.
#[tokio::test(start_paused = true)]
async fn scenario_reconnect_blip_is_silent() {
    let mut harness = Harness::new();
    harness.seed(&[("u1", "U", "Lobby")]);

    harness.event("u1", "U", Some("Lobby"), None);
    tokio::time::sleep(Duration::from_secs(10)).await;
    harness.event("u1", "U", None, Some("Lobby"));

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(harness.drain().is_empty());
    assert_eq!(
        harness.monitor.store().lock().channel_of("u1"),
        Some("Lobby")
    );
}

/// A user drops and reappears in a different channel within the window:
/// exactly one "switched", zero "left".
#[tokio::test(start_paused = true)]
async fn scenario_reconnect_elsewhere_is_a_switch() {
    let mut harness = Harness::new();
    harness.seed(&[("u1", "U", "Lobby")]);

    harness.event("u1", "U", Some("Lobby"), None);
    tokio::time::sleep(Duration::from_secs(10)).await;
    harness.event("u1", "U", None, Some("Kitchen"));

    assert_eq!(
        harness.drain(),
        vec!["U switched voice channel: Lobby -> Kitchen"]
    );

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(harness.drain().is_empty());
}

/// A fresh user joins: exactly one "joined".
#[tokio::test(start_paused = true)]
async fn scenario_fresh_join() {
    let mut harness = Harness::new();

    harness.event("u1", "U", None, Some("Study"));

    assert_eq!(harness.drain(), vec!["U joined voice channel: Study"]);
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(harness.drain().is_empty());
}

/// Leaves for different users debounce independently.
#[tokio::test(start_paused = true)]
async fn scenario_users_are_independent() {
    let mut harness = Harness::new();
    harness.seed(&[("u1", "Alice", "Lobby"), ("u2", "Bob", "Lobby")]);

    harness.event("u1", "Alice", Some("Lobby"), None);
    tokio::time::sleep(Duration::from_secs(30)).await;
    harness.event("u2", "Bob", Some("Lobby"), None);

    // Alice comes back; Bob does not
    tokio::time::sleep(Duration::from_secs(10)).await;
    harness.event("u1", "Alice", None, Some("Lobby"));

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(harness.drain(), vec!["Bob left voice channel: Lobby"]);
}

/// Notifications flow through the forwarder into a sink.
#[tokio::test(start_paused = true)]
async fn scenario_delivery_through_sink() {
    let mut harness = Harness::new();
    let sink = RecordingSink::new();

    // Hand the receiver to the forwarder; keep feeding the monitor
    let notifications = std::mem::replace(
        &mut harness.notifications,
        tokio::sync::mpsc::unbounded_channel().1,
    );
    spawn_forwarder(notifications, Arc::clone(&sink) as Arc<dyn NotificationSink>);

    harness.event("u1", "U", None, Some("Study"));
    harness.event("u1", "U", Some("Study"), Some("Lobby"));

    // Let the forwarder drain the channel
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(
        sink.messages(),
        vec![
            "U joined voice channel: Study".to_string(),
            "U switched voice channel: Study -> Lobby".to_string(),
        ]
    );
}

/// Status rendering over live store state, including the empty case.
#[tokio::test(start_paused = true)]
async fn scenario_status_rendering() {
    let harness = Harness::new();

    let store = harness.monitor.store();
    assert_eq!(
        render_status(&store.lock().grouped_by_channel()),
        "No one is in voice right now."
    );

    harness.seed(&[
        ("u1", "Alice", "Lobby"),
        ("u2", "Bob", "Kitchen"),
        ("u3", "Carol", "Lobby"),
    ]);

    assert_eq!(
        render_status(&store.lock().grouped_by_channel()),
        "Current voice status:\n\nLobby:\n  - Alice\n  - Carol\n\nKitchen:\n  - Bob"
    );
}
