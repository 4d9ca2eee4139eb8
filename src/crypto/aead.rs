//! AEAD sealing for tokens.
//!
//! Suite dispatch over the three protocol ciphers. Keys and nonces arrive
//! pre-sized from the key schedule; a length mismatch is reported as an
//! error, never a panic. All three suites share the 96-bit nonce and
//! 128-bit tag, so the wire layout is suite-independent.

use aes_gcm::{Aes128Gcm, Aes256Gcm};
use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit, Payload},
};

use super::ctx::AeadAlgorithm;
use crate::core::{AEAD_TAG_SIZE, CryptoError};

/// Encrypt `plaintext` bound to `aad`, returning ciphertext with the tag
/// appended.
pub fn seal(
    alg: AeadAlgorithm,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != alg.key_size() || nonce.len() != alg.iv_size() {
        return Err(CryptoError::EncryptionFailed);
    }

    match alg {
        AeadAlgorithm::Aes128Gcm => Aes128Gcm::new_from_slice(key)
            .map_err(|_| CryptoError::EncryptionFailed)?
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::EncryptionFailed),
        AeadAlgorithm::Aes256Gcm => Aes256Gcm::new_from_slice(key)
            .map_err(|_| CryptoError::EncryptionFailed)?
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::EncryptionFailed),
        AeadAlgorithm::ChaCha20Poly1305 => ChaCha20Poly1305::new_from_slice(key)
            .map_err(|_| CryptoError::EncryptionFailed)?
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::EncryptionFailed),
    }
}

/// Decrypt `ciphertext` (tag appended) bound to `aad`.
///
/// Any authentication failure, whatever the cause, comes back as the same
/// `DecryptionFailed`.
pub fn open(
    alg: AeadAlgorithm,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != alg.key_size() || nonce.len() != alg.iv_size() {
        return Err(CryptoError::DecryptionFailed);
    }
    if ciphertext.len() < AEAD_TAG_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    match alg {
        AeadAlgorithm::Aes128Gcm => Aes128Gcm::new_from_slice(key)
            .map_err(|_| CryptoError::DecryptionFailed)?
            .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
            .map_err(|_| CryptoError::DecryptionFailed),
        AeadAlgorithm::Aes256Gcm => Aes256Gcm::new_from_slice(key)
            .map_err(|_| CryptoError::DecryptionFailed)?
            .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
            .map_err(|_| CryptoError::DecryptionFailed),
        AeadAlgorithm::ChaCha20Poly1305 => ChaCha20Poly1305::new_from_slice(key)
            .map_err(|_| CryptoError::DecryptionFailed)?
            .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
            .map_err(|_| CryptoError::DecryptionFailed),
    }
}
