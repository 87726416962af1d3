//! Outbound notification types.

use serde::Serialize;

/// A human-readable presence change, ready to be pushed downstream.
///
/// Exactly one notification is produced per logical transition; a
/// reconnect into the same channel within the debounce window produces
/// none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notification {
    /// User entered a voice channel from nothing
    Joined { name: String, channel: String },
    /// User's departure was confirmed after the debounce delay
    Left { name: String, channel: String },
    /// User moved between channels (directly, or via a fast reconnect
    /// into a different channel)
    Switched {
        name: String,
        from: String,
        to: String,
    },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joined { name, channel } => {
                write!(f, "{name} joined voice channel: {channel}")
            }
            Self::Left { name, channel } => {
                write!(f, "{name} left voice channel: {channel}")
            }
            Self::Switched { name, from, to } => {
                write!(f, "{name} switched voice channel: {from} -> {to}")
            }
        }
    }
}
