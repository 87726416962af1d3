//! Input events consumed by the presence monitor.
//!
//! The gateway layer decodes wire frames into these types after
//! applying its own filtering (bot accounts, foreign guilds).

use serde::{Deserialize, Serialize};

/// A single voice-state change for one user.
///
/// `before` and `after` are channel names; `None` means the user is not
/// in any voice channel on that side of the transition. A given user's
/// transitions arrive in order; transitions for different users may
/// interleave arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceTransition {
    /// Opaque user identifier
    pub user_id: String,
    /// Display name as of this event
    pub display_name: String,
    /// Channel the user was in before the change
    pub before: Option<String>,
    /// Channel the user is in after the change
    pub after: Option<String>,
}

impl VoiceTransition {
    /// True when the event carries no real change (duplicate delivery).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// One entry of a full roster snapshot, delivered on (re)connect.
///
/// Snapshot entries only exist for users currently in a voice channel,
/// so `channel` is never absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub user_id: String,
    pub display_name: String,
    pub channel: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(before: Option<&str>, after: Option<&str>) -> VoiceTransition {
        VoiceTransition {
            user_id: "u1".to_string(),
            display_name: "Alice".to_string(),
            before: before.map(String::from),
            after: after.map(String::from),
        }
    }

    #[test]
    fn test_noop_detection() {
        assert!(transition(None, None).is_noop());
        assert!(transition(Some("Lobby"), Some("Lobby")).is_noop());
        assert!(!transition(Some("Lobby"), None).is_noop());
        assert!(!transition(None, Some("Lobby")).is_noop());
        assert!(!transition(Some("Lobby"), Some("Kitchen")).is_noop());
    }
}
