//! # bridge-gateway
//!
//! Network edge of the voice presence bridge: the upstream gateway
//! WebSocket client, the best-effort notification push, and the status
//! HTTP endpoint. All presence logic lives in `bridge-core`.

pub mod client;
pub mod events;
pub mod sink;
pub mod status;
