//! Canonical byte encoding of socket addresses.
//!
//! Retry tokens bind to the client's observed address by feeding these
//! bytes to the AEAD as associated data and embedding them again in the
//! plaintext. The encoding is fixed (family tag, address octets, big-endian
//! port) so a token minted on one host validates on any other holding the
//! secret.

use std::net::{IpAddr, SocketAddr};

use crate::core::MAX_ADDRESS_SIZE;

/// Family tag for IPv4.
const FAMILY_V4: u8 = 0x04;

/// Family tag for IPv6.
const FAMILY_V6: u8 = 0x06;

/// A socket address in canonical wire form.
///
/// Layout: `family (1) || ip (4 or 16) || port (2, big-endian)`, giving
/// 7 bytes for IPv4 and 19 for IPv6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressBytes {
    bytes: [u8; MAX_ADDRESS_SIZE],
    len: u8,
}

impl AddressBytes {
    /// Encode a socket address.
    pub fn from_socket_addr(addr: &SocketAddr) -> Self {
        let mut bytes = [0u8; MAX_ADDRESS_SIZE];
        let len = match addr.ip() {
            IpAddr::V4(ip) => {
                bytes[0] = FAMILY_V4;
                bytes[1..5].copy_from_slice(&ip.octets());
                bytes[5..7].copy_from_slice(&addr.port().to_be_bytes());
                7
            }
            IpAddr::V6(ip) => {
                bytes[0] = FAMILY_V6;
                bytes[1..17].copy_from_slice(&ip.octets());
                bytes[17..19].copy_from_slice(&addr.port().to_be_bytes());
                19
            }
        };
        Self { bytes, len }
    }

    /// Encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        self.len as usize
    }

    /// The encoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl AsRef<[u8]> for AddressBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
