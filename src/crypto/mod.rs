//! Causeway validation - key schedules and AEAD sealing.
//!
//! Primitive consumption only: hashes, HKDF, and AEAD come from their
//! crates; this module wires them into the protocol's schedules.

mod aead;
mod ctx;
mod kdf;

pub use aead::{open, seal};
pub use ctx::{AeadAlgorithm, CryptoContext, HashAlgorithm};
pub use kdf::{
    derive_packet_protection_key, derive_token_key, hkdf_expand, hkdf_expand_label, hkdf_extract,
};
