//! # bridge-core
//!
//! Domain layer for the voice presence bridge: channel occupancy
//! tracking, the per-user leave debounce, and the monitor that turns
//! raw voice transitions into notifications. This crate has zero
//! dependencies on network I/O.

pub mod debounce;
pub mod event;
pub mod monitor;
pub mod notification;
pub mod presence;

// Re-export commonly used types at crate root
pub use debounce::DebounceScheduler;
pub use event::{RosterEntry, VoiceTransition};
pub use monitor::PresenceMonitor;
pub use notification::Notification;
pub use presence::{PresenceEntry, PresenceStore, SharedPresenceStore};
