//! Shared helpers for integration tests.

use async_trait::async_trait;
use bridge_core::{Notification, PresenceMonitor, RosterEntry, VoiceTransition};
use bridge_gateway::sink::{NotificationSink, SinkError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// A monitor plus the receiving end of its notification stream.
pub struct Harness {
    pub monitor: PresenceMonitor,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

impl Harness {
    /// Monitor with the production 60-second leave delay.
    #[must_use]
    pub fn new() -> Self {
        let (monitor, notifications) = PresenceMonitor::new(Duration::from_secs(60));
        Self {
            monitor,
            notifications,
        }
    }

    /// Seed the store with users already in voice.
    pub fn seed(&self, entries: &[(&str, &str, &str)]) {
        let roster: Vec<RosterEntry> = entries
            .iter()
            .map(|(id, name, channel)| RosterEntry {
                user_id: (*id).to_string(),
                display_name: (*name).to_string(),
                channel: (*channel).to_string(),
            })
            .collect();
        self.monitor.resync(&roster);
    }

    /// Feed one transition.
    pub fn event(&self, user: &str, name: &str, before: Option<&str>, after: Option<&str>) {
        self.monitor.handle_transition(&VoiceTransition {
            user_id: user.to_string(),
            display_name: name.to_string(),
            before: before.map(String::from),
            after: after.map(String::from),
        });
    }

    /// All notifications emitted so far, as rendered text.
    pub fn drain(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            out.push(notification.to_string());
        }
        out
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Sink that records every pushed text in memory.
pub struct RecordingSink {
    pushed: Mutex<Vec<String>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pushed: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.pushed.lock().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn push(&self, text: &str) -> Result<(), SinkError> {
        self.pushed.lock().push(text.to_string());
        Ok(())
    }
}
