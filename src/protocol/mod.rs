pub mod client2server;
pub mod server2client;

pub use client2server::ClientIntent;
pub use server2client::{ServerEvent, Snapshot};

/// Session-scoped identity handed out by the server on connect.
pub type PlayerId = String;
/// Short room code, normalized to uppercase.
pub type RoomId = String;
