//! Endpoint token secret.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use crate::core::TOKEN_SECRET_SIZE;

/// The long-lived secret every piece of validation material derives from.
///
/// Established once at endpoint startup and read-only afterwards; shared
/// across workers, and across cluster members when tokens must validate on
/// any of them. Zeroized on drop, and `Debug` never prints the bytes.
#[derive(Clone)]
pub struct TokenSecret {
    secret: [u8; TOKEN_SECRET_SIZE],
}

impl TokenSecret {
    /// Generate a fresh random secret.
    pub fn generate() -> Self {
        let mut secret = [0u8; TOKEN_SECRET_SIZE];
        OsRng.fill_bytes(&mut secret);
        Self { secret }
    }

    /// Create a secret from existing key material.
    pub fn from_bytes(secret: [u8; TOKEN_SECRET_SIZE]) -> Self {
        Self { secret }
    }

    /// Get the raw secret bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8; TOKEN_SECRET_SIZE] {
        &self.secret
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secrets_differ() {
        let a = TokenSecret::generate();
        let b = TokenSecret::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes().len(), TOKEN_SECRET_SIZE);
    }

    #[test]
    fn test_from_bytes_roundtrip() {
        let raw = [0x5au8; TOKEN_SECRET_SIZE];
        let secret = TokenSecret::from_bytes(raw);
        assert_eq!(secret.as_bytes(), &raw);
    }

    #[test]
    fn test_debug_redacts_content() {
        let secret = TokenSecret::from_bytes([0x42u8; TOKEN_SECRET_SIZE]);
        assert_eq!(format!("{secret:?}"), "TokenSecret(..)");
    }
}
