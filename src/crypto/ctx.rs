//! Cipher suite descriptors.
//!
//! Algorithm choices come out of the TLS negotiation; this module only
//! records the outcome so key schedules know their sizes. The validation
//! layer never selects algorithms on its own.

use crate::core::AEAD_TAG_SIZE;

/// Hash function driving the key-derivation schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
}

impl HashAlgorithm {
    /// Digest output size in bytes.
    pub const fn output_size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
        }
    }
}

/// AEAD cipher used for sealing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AeadAlgorithm {
    /// AES-128-GCM.
    Aes128Gcm,
    /// AES-256-GCM.
    Aes256Gcm,
    /// ChaCha20-Poly1305.
    ChaCha20Poly1305,
}

impl AeadAlgorithm {
    /// Key size in bytes.
    pub const fn key_size(&self) -> usize {
        match self {
            Self::Aes128Gcm => 16,
            Self::Aes256Gcm | Self::ChaCha20Poly1305 => 32,
        }
    }

    /// Nonce size in bytes. Every supported suite takes a 96-bit nonce.
    pub const fn iv_size(&self) -> usize {
        12
    }

    /// Authentication tag size in bytes.
    pub const fn tag_size(&self) -> usize {
        AEAD_TAG_SIZE
    }
}

/// The hash and AEAD pair a cryptographic level operates under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CryptoContext {
    /// Hash function for key derivation.
    pub hash: HashAlgorithm,
    /// AEAD cipher for sealing.
    pub aead: AeadAlgorithm,
}

impl CryptoContext {
    /// The fixed initial-level suite: AES-128-GCM with SHA-256.
    ///
    /// Initial packets must be readable before any negotiation has
    /// happened, so this pairing cannot depend on the handshake outcome.
    pub const fn initial() -> Self {
        Self {
            hash: HashAlgorithm::Sha256,
            aead: AeadAlgorithm::Aes128Gcm,
        }
    }
}

impl Default for CryptoContext {
    fn default() -> Self {
        Self::initial()
    }
}
