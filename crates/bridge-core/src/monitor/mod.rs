//! Presence monitor
//!
//! Owns the presence store and the debounce scheduler, consumes voice
//! transitions in arrival order, and emits notifications on an
//! unbounded channel. Delivery to the chat platform happens elsewhere;
//! nothing here blocks on I/O.

pub mod transition;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::debounce::DebounceScheduler;
use crate::event::{RosterEntry, VoiceTransition};
use crate::notification::Notification;
use crate::presence::{PresenceStore, SharedPresenceStore};

use self::transition::decide;

/// Default departure-confirmation delay
pub const DEFAULT_LEAVE_DELAY: Duration = Duration::from_secs(60);

/// Converts raw voice transitions into debounced notifications.
///
/// One instance exclusively owns the store and the scheduler; event
/// handling for a given user is serialized by the single event stream,
/// and the scheduler linearizes its own cancel-versus-fire race.
pub struct PresenceMonitor {
    store: SharedPresenceStore,
    scheduler: DebounceScheduler<String>,
    leave_delay: Duration,
    notify_tx: mpsc::UnboundedSender<Notification>,
}

impl PresenceMonitor {
    /// Create a monitor and the receiving end of its notification
    /// stream.
    #[must_use]
    pub fn new(leave_delay: Duration) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let monitor = Self {
            store: PresenceStore::new_shared(),
            scheduler: DebounceScheduler::new(),
            leave_delay,
            notify_tx,
        };
        (monitor, notify_rx)
    }

    /// Shared handle to the store, for the status query
    #[must_use]
    pub fn store(&self) -> SharedPresenceStore {
        Arc::clone(&self.store)
    }

    /// Number of departures currently awaiting confirmation
    #[must_use]
    pub fn pending_leaves(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Replace all state from a fresh roster snapshot.
    ///
    /// Discards every pending departure confirmation without emitting
    /// anything; they are meaningless against the new snapshot. The
    /// caller has already filtered out non-human accounts.
    pub fn resync(&self, roster: &[RosterEntry]) {
        let discarded = self.scheduler.clear();
        let mut store = self.store.lock();
        store.resync(roster);

        tracing::info!(
            users = store.len(),
            discarded_pending = discarded,
            "Initial sync complete"
        );
    }

    /// Process one voice transition.
    pub fn handle_transition(&self, event: &VoiceTransition) {
        if event.is_noop() {
            tracing::trace!(user_id = %event.user_id, "No-op transition ignored");
            return;
        }

        self.store
            .lock()
            .set_display_name(&event.user_id, &event.display_name);

        // Consume any pending departure for this user up front. Its
        // recorded channel feeds the reconnect comparison; for a direct
        // switch it is discarded silently.
        let pending_from = self.scheduler.cancel(&event.user_id);
        if let Some(from) = &pending_from {
            tracing::debug!(
                user_id = %event.user_id,
                from = %from,
                "Pending departure cancelled"
            );
        }

        let decision = decide(event, pending_from.as_deref());

        if let Some(channel) = decision.set_channel {
            self.store.lock().set_channel(&event.user_id, channel);
        }

        if let Some(from) = decision.schedule_leave {
            self.schedule_leave(&event.user_id, &event.display_name, from);
        }

        if let Some(notification) = decision.notification {
            self.emit(notification);
        }
    }

    fn schedule_leave(&self, user_id: &str, display_name: &str, from: String) {
        tracing::debug!(
            user_id = %user_id,
            from = %from,
            delay_secs = self.leave_delay.as_secs(),
            "Departure debounce started"
        );

        let name = display_name.to_string();
        let tx = self.notify_tx.clone();

        // The store entry was already removed when the leave event was
        // processed; a user who re-entered during the race window must
        // not be touched here.
        self.scheduler
            .schedule(user_id, self.leave_delay, from, move |channel| {
                let notification = Notification::Left { name, channel };
                tracing::info!(notification = %notification, "Departure confirmed");
                let _ = tx.send(notification);
            });
    }

    fn emit(&self, notification: Notification) {
        tracing::info!(notification = %notification, "Presence change");
        let _ = self.notify_tx.send(notification);
    }
}

impl std::fmt::Debug for PresenceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceMonitor")
            .field("users", &self.store.lock().len())
            .field("pending_leaves", &self.scheduler.pending_count())
            .finish()
    }
}
