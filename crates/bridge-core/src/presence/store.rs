//! In-memory presence store.
//!
//! Tracks which users occupy which voice channels plus the last-seen
//! display name per user. A user who is not in any channel has no
//! occupancy entry at all; the display-name cache is kept separately so
//! names survive a user leaving voice.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::event::RosterEntry;

/// Shared handle to the store, held by the monitor and the status query.
pub type SharedPresenceStore = Arc<Mutex<PresenceStore>>;

/// Occupancy record for one user currently in a voice channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    /// Channel the user currently occupies
    pub channel: String,
    /// When the user entered this channel (as observed by us)
    pub since: DateTime<Utc>,
}

/// Current channel occupancy and display-name mapping.
///
/// All operations are total; there are no error paths. Mutation happens
/// only through the presence monitor.
#[derive(Debug, Default)]
pub struct PresenceStore {
    /// Occupancy by user ID; absent means not in any voice channel
    occupancy: HashMap<String, PresenceEntry>,
    /// Last-observed display name per user ID
    names: HashMap<String, String>,
    /// User IDs in first-insertion order, for deterministic grouping
    order: Vec<String>,
}

impl PresenceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store behind a shared handle
    #[must_use]
    pub fn new_shared() -> SharedPresenceStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Clear all state and repopulate from a roster snapshot.
    ///
    /// The caller has already filtered out non-human accounts.
    pub fn resync(&mut self, roster: &[RosterEntry]) {
        self.occupancy.clear();
        self.names.clear();
        self.order.clear();

        for entry in roster {
            self.set_display_name(&entry.user_id, &entry.display_name);
            self.set_channel(&entry.user_id, Some(entry.channel.clone()));
        }

        tracing::debug!(users = self.occupancy.len(), "Store resynced from roster");
    }

    /// Set or clear the user's current channel.
    ///
    /// `None` removes the occupancy entry entirely. Setting the channel
    /// the user is already in keeps the original `since` timestamp.
    pub fn set_channel(&mut self, user_id: &str, channel: Option<String>) {
        match channel {
            Some(channel) => {
                if let Some(existing) = self.occupancy.get_mut(user_id) {
                    if existing.channel != channel {
                        existing.channel = channel;
                        existing.since = Utc::now();
                    }
                } else {
                    self.order.push(user_id.to_string());
                    self.occupancy.insert(
                        user_id.to_string(),
                        PresenceEntry {
                            channel,
                            since: Utc::now(),
                        },
                    );
                }
            }
            None => {
                if self.occupancy.remove(user_id).is_some() {
                    self.order.retain(|id| id != user_id);
                }
            }
        }
    }

    /// Record the user's latest display name
    pub fn set_display_name(&mut self, user_id: &str, name: &str) {
        self.names.insert(user_id.to_string(), name.to_string());
    }

    /// Display name for a user, falling back to the raw ID
    #[must_use]
    pub fn display_name(&self, user_id: &str) -> String {
        self.names
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| user_id.to_string())
    }

    /// Channel the user currently occupies, if any
    #[must_use]
    pub fn channel_of(&self, user_id: &str) -> Option<&str> {
        self.occupancy.get(user_id).map(|e| e.channel.as_str())
    }

    /// Occupancy grouped by channel.
    ///
    /// Channel order is first-seen order; members within a channel are
    /// in user insertion order. Read-only.
    #[must_use]
    pub fn grouped_by_channel(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();

        for user_id in &self.order {
            let Some(entry) = self.occupancy.get(user_id) else {
                continue;
            };
            let name = self.display_name(user_id);

            match groups.iter_mut().find(|(c, _)| *c == entry.channel) {
                Some((_, members)) => members.push(name),
                None => groups.push((entry.channel.clone(), vec![name])),
            }
        }

        groups
    }

    /// Number of users currently in voice
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    /// True when no user is in any voice channel
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }
}
