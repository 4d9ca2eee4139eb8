//! Retry token minting and validation.
//!
//! A retry token lets a server confirm that a client address can receive
//! datagrams before committing any connection state to it. The wire layout
//! is `ciphertext || tag || nonce`: the trailing nonce salts a one-time key
//! off the endpoint secret, and the client address rides along as AEAD
//! associated data. The sealed plaintext carries the address again, the
//! mint timestamp, and the original destination connection ID the server
//! must echo back once the client proves the path.

use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::{RngCore, rngs::OsRng};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::addr::AddressBytes;
use crate::cid::ConnectionId;
use crate::core::{
    CryptoError, DEFAULT_TOKEN_EXPIRATION, InvalidToken, MAX_CID_LEN, MAX_RETRY_TOKEN_SIZE,
    MAX_TOKEN_EXPIRATION, MAX_TOKEN_PLAINTEXT_SIZE, MIN_CID_LEN, MIN_TOKEN_EXPIRATION,
    TOKEN_NONCE_SIZE,
};
use crate::crypto::{CryptoContext, derive_token_key, open, seal};
use crate::token::TokenSecret;

/// Timestamp width inside the token plaintext.
const TIMESTAMP_SIZE: usize = 8;

/// An opaque retry token, as put on the wire.
///
/// Only the minting endpoint (or another holder of its secret) can
/// interpret the contents; peers carry it back verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryToken(Vec<u8>);

impl RetryToken {
    /// The raw token bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the token is empty. `generate` never produces one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for RetryToken {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Mints and checks retry tokens for one endpoint.
///
/// Cheap to clone; holds no key material. The secret is passed per call so
/// one codec can serve rotating secrets.
#[derive(Clone, Debug)]
pub struct RetryTokenCodec {
    ctx: CryptoContext,
    expiration: Duration,
}

impl RetryTokenCodec {
    /// Create a codec with the given cipher suite and token lifetime.
    ///
    /// The lifetime is clamped to
    /// `[MIN_TOKEN_EXPIRATION, MAX_TOKEN_EXPIRATION]`.
    pub fn new(ctx: CryptoContext, expiration: Duration) -> Self {
        let expiration = expiration.clamp(MIN_TOKEN_EXPIRATION, MAX_TOKEN_EXPIRATION);
        Self { ctx, expiration }
    }

    /// The configured token lifetime.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// The cipher suite in use.
    pub fn context(&self) -> &CryptoContext {
        &self.ctx
    }

    /// Mint a token binding `client_addr` and the client's original
    /// destination connection ID.
    ///
    /// # Errors
    /// Only operational faults: key derivation or sealing failure. Peer
    /// input cannot make this fail.
    pub fn generate(
        &self,
        secret: &TokenSecret,
        client_addr: &SocketAddr,
        ocid: &ConnectionId,
    ) -> Result<RetryToken, CryptoError> {
        self.generate_at(secret, client_addr, ocid, unix_nanos())
    }

    fn generate_at(
        &self,
        secret: &TokenSecret,
        client_addr: &SocketAddr,
        ocid: &ConnectionId,
        now_ns: u64,
    ) -> Result<RetryToken, CryptoError> {
        let addr = AddressBytes::from_socket_addr(client_addr);

        let mut plaintext =
            Vec::with_capacity(addr.encoded_len() + TIMESTAMP_SIZE + ocid.len());
        plaintext.extend_from_slice(addr.as_slice());
        plaintext.extend_from_slice(&now_ns.to_be_bytes());
        plaintext.extend_from_slice(ocid.as_bytes());
        if plaintext.len() > MAX_TOKEN_PLAINTEXT_SIZE {
            return Err(CryptoError::PlaintextTooLarge);
        }

        let mut rand_nonce = [0u8; TOKEN_NONCE_SIZE];
        OsRng.fill_bytes(&mut rand_nonce);

        let (key, iv) = derive_token_key(&self.ctx, secret.as_bytes(), &rand_nonce)?;
        let mut token = seal(self.ctx.aead, &key, &iv, addr.as_slice(), &plaintext)?;
        token.extend_from_slice(&rand_nonce);

        debug_assert!(token.len() <= MAX_RETRY_TOKEN_SIZE);
        Ok(RetryToken(token))
    }

    /// Check a token presented from `client_addr` and recover the original
    /// destination connection ID embedded at mint time.
    ///
    /// Every reject path returns the same [`InvalidToken`] value; the
    /// failed check is visible only in internal diagnostics.
    pub fn validate(
        &self,
        secret: &TokenSecret,
        client_addr: &SocketAddr,
        token: &[u8],
    ) -> Result<ConnectionId, InvalidToken> {
        self.validate_at(secret, client_addr, token, unix_nanos())
    }

    fn validate_at(
        &self,
        secret: &TokenSecret,
        client_addr: &SocketAddr,
        token: &[u8],
        now_ns: u64,
    ) -> Result<ConnectionId, InvalidToken> {
        if token.len() < TOKEN_NONCE_SIZE {
            return Err(reject("shorter than trailing nonce"));
        }
        let (sealed, rand_nonce) = token.split_at(token.len() - TOKEN_NONCE_SIZE);

        let addr = AddressBytes::from_socket_addr(client_addr);
        let (key, iv) = derive_token_key(&self.ctx, secret.as_bytes(), rand_nonce)
            .map_err(|_| reject("key derivation"))?;
        let plaintext = open(self.ctx.aead, &key, &iv, addr.as_slice(), sealed)
            .map_err(|_| reject("authentication"))?;

        let addr_len = addr.encoded_len();
        if plaintext.len() < addr_len + TIMESTAMP_SIZE {
            return Err(reject("plaintext truncated"));
        }
        let cid_len = plaintext.len() - addr_len - TIMESTAMP_SIZE;
        if cid_len != 0 && !(MIN_CID_LEN..=MAX_CID_LEN).contains(&cid_len) {
            return Err(reject("connection ID length"));
        }
        if plaintext[..addr_len].ct_eq(addr.as_slice()).unwrap_u8() == 0 {
            return Err(reject("address mismatch"));
        }

        let mut ts = [0u8; TIMESTAMP_SIZE];
        ts.copy_from_slice(&plaintext[addr_len..addr_len + TIMESTAMP_SIZE]);
        let minted_ns = u64::from_be_bytes(ts);
        let expiration_ns = self.expiration.as_nanos() as u64;
        if minted_ns.saturating_add(expiration_ns) <= now_ns {
            return Err(reject("expired"));
        }

        ConnectionId::try_from_slice(&plaintext[addr_len + TIMESTAMP_SIZE..])
            .map_err(|_| reject("connection ID length"))
    }
}

impl Default for RetryTokenCodec {
    /// Initial-level suite with the default token lifetime.
    fn default() -> Self {
        Self::new(CryptoContext::initial(), DEFAULT_TOKEN_EXPIRATION)
    }
}

/// Build the uniform rejection value, noting the failed check internally.
fn reject(reason: &'static str) -> InvalidToken {
    debug!(reason, "retry token rejected");
    InvalidToken
}

/// Wall-clock nanoseconds since the UNIX epoch.
///
/// Wall time rather than a monotonic clock, so a token minted by one
/// process validates in any other process holding the secret. Skew between
/// cluster members comes out of the expiration window.
fn unix_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
