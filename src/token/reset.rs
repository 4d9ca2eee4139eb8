//! Stateless reset tokens.
//!
//! A reset token is a pure function of the endpoint secret and a
//! connection ID, so an endpoint that lost every bit of connection state
//! (crash, restart) can still prove ownership of a CID it once issued.
//! Peers learn the token through a transport parameter and match incoming
//! short packets against it; nothing is ever stored on the issuing side.

use std::fmt;

use crate::cid::ConnectionId;
use crate::core::{CryptoError, RESET_TOKEN_SIZE};
use crate::crypto::{CryptoContext, hkdf_expand, hkdf_extract};
use crate::token::TokenSecret;

/// Domain separation for reset token derivation.
const RESET_TOKEN_INFO: &[u8] = b"causeway stateless reset";

/// A 16-byte stateless reset token.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatelessResetToken([u8; RESET_TOKEN_SIZE]);

impl StatelessResetToken {
    /// Build a token from raw bytes (e.g. one received in a transport
    /// parameter).
    pub fn from_bytes(bytes: [u8; RESET_TOKEN_SIZE]) -> Self {
        Self(bytes)
    }

    /// The token bytes.
    pub fn as_bytes(&self) -> &[u8; RESET_TOKEN_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for StatelessResetToken {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for StatelessResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatelessResetToken(0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Derive the reset token for `cid` under `secret`.
///
/// Deterministic: the same `(secret, cid)` pair always yields the same
/// token, which is the entire point - a rebooted endpoint recomputes it
/// instead of looking it up.
///
/// # Errors
/// Only on primitive misconfiguration; no input-dependent failure exists.
pub fn stateless_reset_token(
    ctx: &CryptoContext,
    secret: &TokenSecret,
    cid: &ConnectionId,
) -> Result<StatelessResetToken, CryptoError> {
    let prk = hkdf_extract(ctx.hash, cid.as_bytes(), secret.as_bytes());
    let mut token = [0u8; RESET_TOKEN_SIZE];
    hkdf_expand(ctx.hash, &prk, RESET_TOKEN_INFO, &mut token)?;
    Ok(StatelessResetToken(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HashAlgorithm;
    use std::collections::HashSet;

    fn secret() -> TokenSecret {
        TokenSecret::from_bytes([0x31u8; 32])
    }

    #[test]
    fn test_deterministic() {
        let ctx = CryptoContext::initial();
        let cid = ConnectionId::try_from_slice(&[0xab; 8]).unwrap();

        let a = stateless_reset_token(&ctx, &secret(), &cid).unwrap();
        let b = stateless_reset_token(&ctx, &secret(), &cid).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes().len(), RESET_TOKEN_SIZE);
    }

    #[test]
    fn test_cid_sensitivity() {
        let ctx = CryptoContext::initial();
        let a = stateless_reset_token(&ctx, &secret(), &ConnectionId::try_from_slice(&[1]).unwrap())
            .unwrap();
        let b = stateless_reset_token(&ctx, &secret(), &ConnectionId::try_from_slice(&[2]).unwrap())
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_secret_sensitivity() {
        let ctx = CryptoContext::initial();
        let cid = ConnectionId::try_from_slice(&[0xab; 8]).unwrap();

        let a = stateless_reset_token(&ctx, &secret(), &cid).unwrap();
        let b =
            stateless_reset_token(&ctx, &TokenSecret::from_bytes([0x32u8; 32]), &cid).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_cid_supported() {
        let ctx = CryptoContext::initial();
        let token = stateless_reset_token(&ctx, &secret(), &ConnectionId::EMPTY).unwrap();
        assert_ne!(token.as_bytes(), &[0u8; RESET_TOKEN_SIZE]);
    }

    #[test]
    fn test_sha384_context() {
        let ctx = CryptoContext {
            hash: HashAlgorithm::Sha384,
            ..CryptoContext::initial()
        };
        let cid = ConnectionId::try_from_slice(&[0xab; 8]).unwrap();

        let sha384 = stateless_reset_token(&ctx, &secret(), &cid).unwrap();
        let sha256 = stateless_reset_token(&CryptoContext::initial(), &secret(), &cid).unwrap();
        assert_ne!(sha384, sha256);
    }

    #[test]
    fn test_no_collisions_across_random_cids() {
        let ctx = CryptoContext::initial();
        let secret = secret();

        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let cid = ConnectionId::random(8);
            let token = stateless_reset_token(&ctx, &secret, &cid).unwrap();
            assert!(seen.insert(*token.as_bytes()), "reset token collision");
        }
    }

    #[test]
    fn test_debug_prints_hex() {
        let token = StatelessResetToken::from_bytes([0u8; RESET_TOKEN_SIZE]);
        assert_eq!(
            format!("{token:?}"),
            "StatelessResetToken(0x00000000000000000000000000000000)"
        );
    }
}
