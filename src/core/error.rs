//! Error types for the Causeway validation layer.

use thiserror::Error;

/// Errors in the crypto layer.
///
/// These are operational faults on the token generation path. They are
/// surfaced distinctly so operators can tell a broken key schedule from a
/// broken cipher call; neither is ever caused by peer input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Key derivation failed.
    #[error("key derivation failed")]
    KeyDerivationFailed,

    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    EncryptionFailed,

    /// AEAD decryption failed (invalid tag or corrupted).
    #[error("AEAD decryption failed (invalid tag or corrupted)")]
    DecryptionFailed,

    /// Token plaintext exceeds the fixed bound.
    #[error("token plaintext too large")]
    PlaintextTooLarge,
}

/// Retry token rejection.
///
/// Deliberately carries no detail: a presented token is either acceptable
/// or it is not, and the peer must not learn which check failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid retry token")]
pub struct InvalidToken;

/// Connection ID length outside the protocol bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("connection ID longer than 20 bytes")]
pub struct CidLengthError;

/// Errors a retry packet encoder reports back to the assembler.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PacketEncodeError {
    /// Output buffer too small for the encoded packet.
    #[error("output buffer too small for retry packet")]
    InsufficientSpace,

    /// Packet inputs violate the wire format.
    #[error("retry packet inputs violate the wire format")]
    Malformed,
}

/// Errors when assembling a retry packet.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// Token generation failed.
    #[error("token generation failed: {0}")]
    Token(#[from] CryptoError),

    /// Packet encoding failed.
    #[error("packet encoding failed: {0}")]
    Encode(#[from] PacketEncodeError),
}

impl PacketError {
    /// Whether the failure happened before any bytes were encoded.
    pub fn is_token_failure(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}
