//! Signaling relay for one-to-one calls.
//!
//! Participants connect over a WebSocket, ask for a call, and get paired with
//! another waiting participant (or with a synthetic partner for test calls).
//! Offers, answers and ICE candidates are then forwarded verbatim between the
//! two; media never passes through the relay.

#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod error;
pub mod lobby;
pub mod signaling;

pub use app::{build_router, start_lobby};
pub use config::{ConfigError, ServerConfig};
pub use error::LobbyError;
pub use lobby::{Lobby, LobbyCommand, Matchmaker};
pub use signaling::{SignalingOutput, SignalingService, ws_handler};
