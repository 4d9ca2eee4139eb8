//! IPv6 flow label derivation.
//!
//! Labels are derived rather than drawn at random: every endpoint holding
//! the secret computes the same label for a flow, and a path migration
//! yields a fresh label without any coordination. Middleboxes see a value
//! indistinguishable from random.

use std::net::SocketAddr;

use crate::addr::AddressBytes;
use crate::cid::ConnectionId;
use crate::core::{FLOW_LABEL_MASK, MAX_ADDRESS_SIZE, MAX_CID_LEN};
use crate::crypto::{CryptoContext, hkdf_expand};
use crate::token::TokenSecret;

/// Derivation input holds two addresses and a CID at most.
const FLOW_INFO_CAPACITY: usize = 2 * MAX_ADDRESS_SIZE + MAX_CID_LEN;

/// A 20-bit IPv6 flow label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlowLabel(u32);

impl FlowLabel {
    /// The label value, always below `2^20`.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<FlowLabel> for u32 {
    fn from(label: FlowLabel) -> u32 {
        label.0
    }
}

/// Derive the flow label for the `(local, remote, cid)` flow under
/// `secret`.
///
/// Pure and deterministic; there is no failure path.
pub fn flow_label(
    ctx: &CryptoContext,
    secret: &TokenSecret,
    local: &SocketAddr,
    remote: &SocketAddr,
    cid: &ConnectionId,
) -> FlowLabel {
    let local_bytes = AddressBytes::from_socket_addr(local);
    let remote_bytes = AddressBytes::from_socket_addr(remote);

    let mut info = [0u8; FLOW_INFO_CAPACITY];
    let mut len = 0;
    for part in [local_bytes.as_slice(), remote_bytes.as_slice(), cid.as_bytes()] {
        info[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }

    let mut label = [0u8; 4];
    hkdf_expand(ctx.hash, secret.as_bytes(), &info[..len], &mut label)
        .expect("4 bytes is a valid HKDF output length");
    FlowLabel(u32::from_be_bytes(label) & FLOW_LABEL_MASK)
}
