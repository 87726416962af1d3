//! Channel occupancy and display-name tracking.

mod store;

pub use store::{PresenceEntry, PresenceStore, SharedPresenceStore};
