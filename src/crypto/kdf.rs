//! HKDF key schedules.
//!
//! Retry token protection reuses the transport's packet-protection
//! schedule: HKDF-Extract over the endpoint secret with a per-token salt,
//! then labeled expansion for the key and IV. The flow-label path runs the
//! raw RFC 5869 expand step directly over the endpoint secret.

use hkdf::Hkdf;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384};
use zeroize::Zeroizing;

use super::ctx::{CryptoContext, HashAlgorithm};
use crate::core::CryptoError;

/// Prefix of every expansion label in the protocol.
const LABEL_PREFIX: &[u8] = b"causeway ";

/// HKDF-Extract: compress `ikm` under `salt` into a pseudorandom key.
///
/// Output length equals the digest size of `hash`.
pub fn hkdf_extract(hash: HashAlgorithm, salt: &[u8], ikm: &[u8]) -> Zeroizing<Vec<u8>> {
    match hash {
        HashAlgorithm::Sha256 => {
            let (prk, _) = Hkdf::<Sha256>::extract(Some(salt), ikm);
            Zeroizing::new(prk.to_vec())
        }
        HashAlgorithm::Sha384 => {
            let (prk, _) = Hkdf::<Sha384>::extract(Some(salt), ikm);
            Zeroizing::new(prk.to_vec())
        }
    }
}

/// Raw RFC 5869 HKDF-Expand over an existing pseudorandom key.
///
/// Runs the HMAC feedback loop directly so a PRK shorter than the digest
/// output is accepted. The flow-label derivation depends on that: it feeds
/// the 32-byte endpoint secret in as the PRK under either hash.
///
/// # Errors
/// Fails if `okm` asks for more than `255 * digest_size` bytes.
pub fn hkdf_expand(
    hash: HashAlgorithm,
    prk: &[u8],
    info: &[u8],
    okm: &mut [u8],
) -> Result<(), CryptoError> {
    match hash {
        HashAlgorithm::Sha256 => raw_expand::<Hmac<Sha256>>(prk, info, okm),
        HashAlgorithm::Sha384 => raw_expand::<Hmac<Sha384>>(prk, info, okm),
    }
}

fn raw_expand<M: Mac + KeyInit>(prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), CryptoError> {
    let hash_len = M::output_size();
    if okm.len() > 255 * hash_len {
        return Err(CryptoError::KeyDerivationFailed);
    }

    let mut previous: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::with_capacity(hash_len));
    let mut counter = 1u8;
    let mut written = 0;
    while written < okm.len() {
        // Mac re-declares this constructor, so name the trait explicitly.
        let mut mac =
            <M as KeyInit>::new_from_slice(prk).map_err(|_| CryptoError::KeyDerivationFailed)?;
        mac.update(&previous);
        mac.update(info);
        mac.update(&[counter]);
        let block = mac.finalize().into_bytes();

        let take = hash_len.min(okm.len() - written);
        okm[written..written + take].copy_from_slice(&block[..take]);
        written += take;

        previous.clear();
        previous.extend_from_slice(&block);
        counter = counter.wrapping_add(1);
    }
    Ok(())
}

/// HKDF-Expand-Label with the TLS 1.3 label layout.
///
/// `info = be16(out_len) || u8(prefix_len + label_len) || "causeway " ||
/// label || 0x00` (empty context). The PRK must be at least one digest
/// long, which every extract output satisfies.
pub fn hkdf_expand_label(
    hash: HashAlgorithm,
    prk: &[u8],
    label: &[u8],
    okm: &mut [u8],
) -> Result<(), CryptoError> {
    let mut info = Vec::with_capacity(4 + LABEL_PREFIX.len() + label.len());
    info.extend_from_slice(&(okm.len() as u16).to_be_bytes());
    info.push((LABEL_PREFIX.len() + label.len()) as u8);
    info.extend_from_slice(LABEL_PREFIX);
    info.extend_from_slice(label);
    info.push(0);

    match hash {
        HashAlgorithm::Sha256 => {
            let hk = Hkdf::<Sha256>::from_prk(prk).map_err(|_| CryptoError::KeyDerivationFailed)?;
            hk.expand(&info, okm)
                .map_err(|_| CryptoError::KeyDerivationFailed)
        }
        HashAlgorithm::Sha384 => {
            let hk = Hkdf::<Sha384>::from_prk(prk).map_err(|_| CryptoError::KeyDerivationFailed)?;
            hk.expand(&info, okm)
                .map_err(|_| CryptoError::KeyDerivationFailed)
        }
    }
}

/// Derive an AEAD key and IV from a traffic secret, sized for `ctx`.
///
/// The same schedule the transport uses for record protection; retry
/// tokens run it over the per-token extract output.
pub fn derive_packet_protection_key(
    ctx: &CryptoContext,
    secret: &[u8],
) -> Result<(Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>), CryptoError> {
    let mut key = Zeroizing::new(vec![0u8; ctx.aead.key_size()]);
    let mut iv = Zeroizing::new(vec![0u8; ctx.aead.iv_size()]);
    hkdf_expand_label(ctx.hash, secret, b"key", &mut key)?;
    hkdf_expand_label(ctx.hash, secret, b"iv", &mut iv)?;
    Ok((key, iv))
}

/// Derive the one-time AEAD key and IV protecting a single retry token.
///
/// The per-token random nonce is the extract salt, so every token is
/// sealed under a fresh key even though the endpoint secret is long-lived.
pub fn derive_token_key(
    ctx: &CryptoContext,
    secret: &[u8],
    nonce: &[u8],
) -> Result<(Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>), CryptoError> {
    let prk = hkdf_extract(ctx.hash, nonce, secret);
    derive_packet_protection_key(ctx, &prk)
}
