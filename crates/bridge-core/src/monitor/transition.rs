//! Pure transition logic.
//!
//! [`decide`] maps one voice transition (plus the metadata of any
//! pending departure that was just consumed) to the effects the monitor
//! should apply. It never touches state itself, which keeps every
//! branch of the join/leave/switch/reconnect table unit-testable
//! without timers or tasks.

use crate::event::VoiceTransition;
use crate::notification::Notification;

/// Effects to apply for one processed transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decision {
    /// New occupancy value for the user; outer `None` means leave the
    /// store untouched, inner `None` means remove the entry.
    pub set_channel: Option<Option<String>>,
    /// Channel to confirm the user's departure from after the debounce
    /// delay
    pub schedule_leave: Option<String>,
    /// Notification to emit now, if any
    pub notification: Option<Notification>,
}

impl Decision {
    fn ignore() -> Self {
        Self::default()
    }
}

/// Decide the effects of `event`.
///
/// `pending_from` is the channel recorded by a pending departure for
/// this user, already cancelled by the caller. It is only a comparison
/// value for the reconnect case; for a direct channel-to-channel move
/// the event's own `before` field is authoritative.
#[must_use]
pub fn decide(event: &VoiceTransition, pending_from: Option<&str>) -> Decision {
    let name = event.display_name.clone();

    match (event.before.as_deref(), event.after.as_deref()) {
        // Duplicate delivery, no real change
        (before, after) if before == after => Decision::ignore(),
        (None, None) => Decision::ignore(),

        // Left voice entirely: confirm later, say nothing now
        (Some(from), None) => Decision {
            set_channel: Some(None),
            schedule_leave: Some(from.to_string()),
            notification: None,
        },

        // Entered voice from nothing
        (None, Some(to)) => {
            let notification = match pending_from {
                // Back in the same channel within the window: a
                // dropped-connection blip, not a real event
                Some(prior) if prior == to => None,
                Some(prior) => Some(Notification::Switched {
                    name,
                    from: prior.to_string(),
                    to: to.to_string(),
                }),
                None => Some(Notification::Joined {
                    name,
                    channel: to.to_string(),
                }),
            };
            Decision {
                set_channel: Some(Some(to.to_string())),
                schedule_leave: None,
                notification,
            }
        }

        // Direct move between channels: never delayed. Any pending
        // departure was already discarded silently by the caller.
        (Some(from), Some(to)) => Decision {
            set_channel: Some(Some(to.to_string())),
            schedule_leave: None,
            notification: Some(Notification::Switched {
                name,
                from: from.to_string(),
                to: to.to_string(),
            }),
        },
    }
}
