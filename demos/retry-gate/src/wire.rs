//! Toy wire format for the gate.
//!
//! Real Causeway packets carry far more than this; the gate only needs
//! enough framing to move CIDs and tokens between the two halves of the
//! demo.

use causeway_validation::ConnectionId;
use causeway_validation::core::PacketEncodeError;
use causeway_validation::packet::RetryPacketEncoder;

/// Message types on the demo wire.
pub mod msg_type {
    /// Client hello without a token - Type 0x01
    pub const HELLO: u8 = 0x01;
    /// Server retry carrying a fresh CID and a token - Type 0x02
    pub const RETRY: u8 = 0x02;
    /// Client hello resent with a token - Type 0x03
    pub const HELLO_TOKEN: u8 = 0x03;
    /// Server accepted the connection - Type 0x04
    pub const ACCEPT: u8 = 0x04;
    /// Server rejected the token - Type 0x05
    pub const REJECT: u8 = 0x05;
}

fn put_cid(out: &mut Vec<u8>, cid: &ConnectionId) {
    out.push(cid.len() as u8);
    out.extend_from_slice(cid.as_bytes());
}

/// Read one length-prefixed CID field, advancing `data` past it.
pub fn take_cid<'a>(data: &mut &'a [u8]) -> Option<&'a [u8]> {
    let (&len, rest) = data.split_first()?;
    if rest.len() < len as usize {
        return None;
    }
    let (cid, rest) = rest.split_at(len as usize);
    *data = rest;
    Some(cid)
}

/// Build a hello message: `type || len(dcid) || dcid || len(scid) || scid`,
/// with the token appended when resending after a retry.
pub fn hello(dcid: &ConnectionId, scid: &ConnectionId, token: Option<&[u8]>) -> Vec<u8> {
    let mut out = vec![if token.is_some() {
        msg_type::HELLO_TOKEN
    } else {
        msg_type::HELLO
    }];
    put_cid(&mut out, dcid);
    put_cid(&mut out, scid);
    if let Some(token) = token {
        out.extend_from_slice(token);
    }
    out
}

/// Retry packet layout used by the gate:
/// `0x02 || len(dcid) || dcid || len(scid) || scid || len(odcid) || odcid || token`.
pub struct GateEncoder;

impl RetryPacketEncoder for GateEncoder {
    fn encode_retry(
        &self,
        out: &mut [u8],
        peer_scid: &ConnectionId,
        new_cid: &ConnectionId,
        odcid: &ConnectionId,
        token: &[u8],
    ) -> Result<usize, PacketEncodeError> {
        let need = 4 + peer_scid.len() + new_cid.len() + odcid.len() + token.len();
        if out.len() < need {
            return Err(PacketEncodeError::InsufficientSpace);
        }

        let mut at = 0;
        out[at] = msg_type::RETRY;
        at += 1;
        for cid in [peer_scid, new_cid, odcid] {
            out[at] = cid.len() as u8;
            at += 1;
            out[at..at + cid.len()].copy_from_slice(cid.as_bytes());
            at += cid.len();
        }
        out[at..at + token.len()].copy_from_slice(token);
        Ok(need)
    }
}
