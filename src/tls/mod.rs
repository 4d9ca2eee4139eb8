//! Handshake integration seam.
//!
//! The validation core does not run a TLS stack of its own. This module
//! defines the surfaces a handshake driver plugs into: per-endpoint
//! policy, an event sink for handshake progress, and session ticket
//! plumbing for resumption.

mod config;
mod events;
mod level;
mod ticket;

pub use config::{EndpointTlsConfig, Side};
pub use events::{HandshakeAdapter, HandshakeEvents};
pub use level::CryptoLevel;
pub use ticket::{SessionTicketAppData, SessionTicketHooks, TicketAction};
