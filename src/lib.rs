//! # Causeway Validation
//!
//! Address validation and connection hardening primitives for the Causeway
//! UDP transport. Everything an endpoint needs flows from one 32-byte
//! secret:
//!
//! - **Retry tokens**: AEAD-sealed proof that a client can receive at the
//!   address it claims
//! - **Stateless reset tokens**: recognizable 16-byte tags derivable with
//!   no per-connection state
//! - **Flow labels**: stable per-path IPv6 labels that do not leak the
//!   secret they derive from
//! - **Retry packets**: token minting and buffer budgeting around a
//!   pluggable packet encoder
//! - **Agility**: SHA-256/SHA-384 schedules over AES-GCM or
//!   ChaCha20-Poly1305, chosen per endpoint
//!
//! ## Feature Flags
//!
//! - `tls` (default): Handshake adapter seam (event sink, endpoint TLS
//!   policy, session tickets)
//!
//! ## Modules
//!
//! - [`core`]: Constants and error types (always included)
//! - [`crypto`]: Suite selection, key schedules, AEAD seal/open
//! - [`addr`]: Socket address encoding for token binding
//! - [`cid`]: Connection IDs
//! - [`token`]: Retry tokens, stateless reset tokens, the server secret
//! - [`flow`]: IPv6 flow label derivation
//! - [`packet`]: Retry packet assembly
//! - [`tls`]: Handshake adapter seam (requires `tls` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use std::net::SocketAddr;
//!
//! use causeway_validation::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Long-lived endpoint state: one secret, one token codec.
//! let secret = TokenSecret::generate();
//! let codec = RetryTokenCodec::default();
//!
//! let client: SocketAddr = "203.0.113.9:4433".parse()?;
//! let odcid = ConnectionId::try_from_slice(&[0xc7; 8])?;
//!
//! // Mint a token for the client, then accept it back.
//! let token = codec.generate(&secret, &client, &odcid)?;
//! let recovered = codec.validate(&secret, &client, token.as_bytes())?;
//! assert_eq!(recovered, odcid);
//!
//! // Reset tokens and flow labels fall out of the same secret.
//! let reset = stateless_reset_token(&CryptoContext::initial(), &secret, &odcid)?;
//! assert_eq!(reset.as_bytes().len(), 16);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Cryptographic building blocks
pub mod crypto;

// Wire encodings tokens bind to
pub mod addr;
pub mod cid;

// Token derivation and validation
pub mod token;

// Path-level derivations
pub mod flow;

// Retry packet assembly
pub mod packet;

// Handshake seam (feature-gated)
#[cfg(feature = "tls")]
#[cfg_attr(docsrs, doc(cfg(feature = "tls")))]
pub mod tls;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::addr::AddressBytes;
    pub use crate::cid::ConnectionId;
    pub use crate::core::*;
    pub use crate::crypto::{AeadAlgorithm, CryptoContext, HashAlgorithm};
    pub use crate::flow::{FlowLabel, flow_label};
    pub use crate::packet::{RetryPacket, RetryPacketAssembler, RetryPacketEncoder};
    pub use crate::token::{
        RetryToken, RetryTokenCodec, StatelessResetToken, TokenSecret, stateless_reset_token,
    };

    // Handshake seam (when enabled)
    #[cfg(feature = "tls")]
    pub use crate::tls::*;
}

// Re-export commonly used items at crate root
pub use crate::cid::ConnectionId;
pub use crate::core::{CryptoError, InvalidToken, PacketError};
pub use crate::crypto::CryptoContext;
pub use crate::flow::flow_label;
pub use crate::token::{RetryTokenCodec, TokenSecret, stateless_reset_token};
