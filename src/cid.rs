//! Connection identifiers.
//!
//! CIDs are opaque to the validation layer: raw bytes, never interpreted,
//! only carried, compared, and echoed back inside tokens.

use std::fmt;

use rand::{RngCore, rngs::OsRng};

use crate::core::{CidLengthError, MAX_CID_LEN};

/// A connection identifier of 0 to 20 bytes, stored inline.
///
/// The empty ID is valid: it names a connection addressed purely by its
/// transport tuple.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    bytes: [u8; MAX_CID_LEN],
    len: u8,
}

impl ConnectionId {
    /// The empty connection ID.
    pub const EMPTY: Self = Self {
        bytes: [0u8; MAX_CID_LEN],
        len: 0,
    };

    /// Build a connection ID from a slice.
    ///
    /// # Errors
    /// Fails if the slice is longer than [`MAX_CID_LEN`].
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, CidLengthError> {
        if slice.len() > MAX_CID_LEN {
            return Err(CidLengthError);
        }
        let mut bytes = [0u8; MAX_CID_LEN];
        bytes[..slice.len()].copy_from_slice(slice);
        Ok(Self {
            bytes,
            len: slice.len() as u8,
        })
    }

    /// Generate a random ID of `len` bytes, clamped to [`MAX_CID_LEN`].
    pub fn random(len: usize) -> Self {
        let len = len.min(MAX_CID_LEN);
        let mut bytes = [0u8; MAX_CID_LEN];
        OsRng.fill_bytes(&mut bytes[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    /// The ID bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether this is the empty ID.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for ConnectionId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for ConnectionId {
    type Error = CidLengthError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(slice)
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId(0x")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_slice_bounds() {
        assert!(ConnectionId::try_from_slice(&[0u8; MAX_CID_LEN]).is_ok());
        assert!(matches!(
            ConnectionId::try_from_slice(&[0u8; MAX_CID_LEN + 1]),
            Err(CidLengthError)
        ));
    }

    #[test]
    fn test_roundtrip() {
        let raw = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let cid = ConnectionId::try_from_slice(&raw).unwrap();
        assert_eq!(cid.as_bytes(), &raw);
        assert_eq!(cid.len(), 8);
        assert!(!cid.is_empty());
    }

    #[test]
    fn test_empty_id() {
        let cid = ConnectionId::try_from_slice(&[]).unwrap();
        assert!(cid.is_empty());
        assert_eq!(cid, ConnectionId::EMPTY);
        assert_eq!(cid.as_bytes(), &[] as &[u8]);
    }

    #[test]
    fn test_random_ids_differ() {
        let a = ConnectionId::random(18);
        let b = ConnectionId::random(18);
        assert_eq!(a.len(), 18);
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_length_clamped() {
        let cid = ConnectionId::random(64);
        assert_eq!(cid.len(), MAX_CID_LEN);
    }

    #[test]
    fn test_debug_prints_hex() {
        let cid = ConnectionId::try_from_slice(&[0xab, 0xcd]).unwrap();
        assert_eq!(format!("{cid:?}"), "ConnectionId(0xabcd)");
    }

    #[test]
    fn test_length_is_significant() {
        // Prefix-equal IDs of different lengths are different IDs.
        let a = ConnectionId::try_from_slice(&[0xff; 4]).unwrap();
        let b = ConnectionId::try_from_slice(&[0xff; 5]).unwrap();
        assert_ne!(a, b);
    }
}
