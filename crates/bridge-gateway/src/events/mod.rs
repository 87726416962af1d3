//! Upstream gateway wire format.
//!
//! The gateway sends JSON frames with an `op` discriminator and a `d`
//! payload: a `ready` frame carrying the full voice roster on connect,
//! then incremental `voice_state` frames. Bot accounts and foreign
//! guilds are filtered here, before anything reaches the core.

use bridge_core::{RosterEntry, VoiceTransition};
use serde::Deserialize;

/// One decoded frame from the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "snake_case")]
pub enum GatewayFrame {
    /// Full roster snapshot, sent once per (re)connection
    Ready(ReadyPayload),
    /// One user's voice-state change
    VoiceState(VoiceStatePayload),
    /// Keepalive; carries nothing we act on
    Heartbeat,
}

impl GatewayFrame {
    /// Decode a text frame.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Roster snapshot payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReadyPayload {
    pub guild_id: u64,
    pub roster: Vec<WireRosterEntry>,
}

impl ReadyPayload {
    /// Convert to core roster entries, dropping bot accounts.
    #[must_use]
    pub fn into_roster(self) -> Vec<RosterEntry> {
        self.roster
            .into_iter()
            .filter(|entry| !entry.is_bot)
            .map(|entry| RosterEntry {
                user_id: entry.user_id,
                display_name: entry.display_name,
                channel: entry.channel,
            })
            .collect()
    }
}

/// One member of the roster snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct WireRosterEntry {
    pub user_id: String,
    pub display_name: String,
    pub channel: String,
    #[serde(default)]
    pub is_bot: bool,
}

/// Voice-state change payload
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceStatePayload {
    pub guild_id: u64,
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub is_bot: bool,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl VoiceStatePayload {
    /// Convert to a core transition if it belongs to `guild_id` and is
    /// not a bot account.
    #[must_use]
    pub fn into_transition(self, guild_id: u64) -> Option<VoiceTransition> {
        if self.guild_id != guild_id || self.is_bot {
            return None;
        }
        Some(VoiceTransition {
            user_id: self.user_id,
            display_name: self.display_name,
            before: self.before,
            after: self.after,
        })
    }
}
