//! Realtime quiz relay.
//!
//! Clients connect over WebSocket and emit named events; the relay fans
//! quiz, question and answer events out to every connected session.

pub mod events;
pub mod hub;
pub mod server;

pub use events::{ClientEvent, Participant, Payload, ServerEvent, SessionId};
pub use hub::{Relay, RelayHandle};
pub use server::serve;
