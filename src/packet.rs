//! Retry packet assembly.
//!
//! The wire image of a retry packet belongs to the transport's packet
//! codec. Assembly here owns what that codec cannot: minting the token,
//! drawing the fresh server CID, and bounding the buffer the codec writes
//! into.

use std::net::SocketAddr;

use crate::cid::ConnectionId;
use crate::core::{
    MAX_CID_LEN, MAX_UDP_PAYLOAD_IPV4, MAX_UDP_PAYLOAD_IPV6, PacketEncodeError, PacketError,
    RETRY_CID_LEN, RETRY_PACKET_OVERHEAD,
};
use crate::token::{RetryTokenCodec, TokenSecret};

/// Serializes retry packets into caller buffers.
///
/// Implemented by the transport's packet codec; returns the number of
/// bytes written.
pub trait RetryPacketEncoder {
    /// Encode a retry packet into `out`.
    ///
    /// `peer_scid` addresses the packet (it was the client's source CID),
    /// `new_cid` is the server-chosen replacement, and `odcid` is the
    /// client's original destination CID the wire format authenticates.
    fn encode_retry(
        &self,
        out: &mut [u8],
        peer_scid: &ConnectionId,
        new_cid: &ConnectionId,
        odcid: &ConnectionId,
        token: &[u8],
    ) -> Result<usize, PacketEncodeError>;
}

/// A retry packet ready for the wire.
#[derive(Clone, Debug)]
pub struct RetryPacket {
    bytes: Vec<u8>,
    new_cid: ConnectionId,
}

impl RetryPacket {
    /// The encoded datagram payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the encoder produced an empty payload.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The fresh CID the server will expect future packets to carry.
    pub fn new_cid(&self) -> &ConnectionId {
        &self.new_cid
    }
}

/// Builds retry packets for an endpoint.
pub struct RetryPacketAssembler<E> {
    codec: RetryTokenCodec,
    encoder: E,
}

impl<E: RetryPacketEncoder> RetryPacketAssembler<E> {
    /// Create an assembler around the endpoint's token codec and packet
    /// encoder.
    pub fn new(codec: RetryTokenCodec, encoder: E) -> Self {
        Self { codec, encoder }
    }

    /// The token codec in use.
    pub fn codec(&self) -> &RetryTokenCodec {
        &self.codec
    }

    /// Answer a client hello from `remote` with a retry carrying a fresh
    /// CID and an address-bound token.
    ///
    /// # Errors
    /// Propagates the specific upstream cause: token generation faults as
    /// [`PacketError::Token`], encoder refusals as [`PacketError::Encode`].
    pub fn build_retry(
        &self,
        secret: &TokenSecret,
        odcid: &ConnectionId,
        peer_scid: &ConnectionId,
        local: &SocketAddr,
        remote: &SocketAddr,
    ) -> Result<RetryPacket, PacketError> {
        let new_cid = ConnectionId::random(RETRY_CID_LEN);
        let token = self.codec.generate(secret, remote, odcid)?;

        let cap = token.len() + 2 * MAX_CID_LEN + peer_scid.len() + RETRY_PACKET_OVERHEAD;
        let cap = cap.min(max_payload(local, remote));
        let mut buf = vec![0u8; cap];

        let written = self.encoder.encode_retry(
            &mut buf,
            peer_scid,
            &new_cid,
            odcid,
            token.as_bytes(),
        )?;
        if written > buf.len() {
            return Err(PacketError::Encode(PacketEncodeError::Malformed));
        }
        buf.truncate(written);

        Ok(RetryPacket { bytes: buf, new_cid })
    }
}

/// Largest datagram payload for the path; IPv6 headers cost more.
fn max_payload(local: &SocketAddr, remote: &SocketAddr) -> usize {
    if local.is_ipv6() || remote.is_ipv6() {
        MAX_UDP_PAYLOAD_IPV6
    } else {
        MAX_UDP_PAYLOAD_IPV4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CryptoError;

    /// Length-prefixed test wire format:
    /// `0xf5 || len(dcid) || dcid || len(scid) || scid || len(odcid) ||
    /// odcid || token`.
    struct FrameEncoder;

    impl RetryPacketEncoder for FrameEncoder {
        fn encode_retry(
            &self,
            out: &mut [u8],
            peer_scid: &ConnectionId,
            new_cid: &ConnectionId,
            odcid: &ConnectionId,
            token: &[u8],
        ) -> Result<usize, PacketEncodeError> {
            let need =
                4 + peer_scid.len() + new_cid.len() + odcid.len() + token.len();
            if out.len() < need {
                return Err(PacketEncodeError::InsufficientSpace);
            }

            let mut at = 0;
            out[at] = 0xf5;
            at += 1;
            for cid in [peer_scid, new_cid, odcid] {
                out[at] = cid.len() as u8;
                at += 1;
                out[at..at + cid.len()].copy_from_slice(cid.as_bytes());
                at += cid.len();
            }
            out[at..at + token.len()].copy_from_slice(token);
            at += token.len();
            Ok(at)
        }
    }

    /// Reports the full buffer as written without touching it.
    struct CapacityProbe;

    impl RetryPacketEncoder for CapacityProbe {
        fn encode_retry(
            &self,
            out: &mut [u8],
            _peer_scid: &ConnectionId,
            _new_cid: &ConnectionId,
            _odcid: &ConnectionId,
            _token: &[u8],
        ) -> Result<usize, PacketEncodeError> {
            Ok(out.len())
        }
    }

    struct RefusingEncoder;

    impl RetryPacketEncoder for RefusingEncoder {
        fn encode_retry(
            &self,
            _out: &mut [u8],
            _peer_scid: &ConnectionId,
            _new_cid: &ConnectionId,
            _odcid: &ConnectionId,
            _token: &[u8],
        ) -> Result<usize, PacketEncodeError> {
            Err(PacketEncodeError::InsufficientSpace)
        }
    }

    /// Claims to have written more than the buffer holds.
    struct LyingEncoder;

    impl RetryPacketEncoder for LyingEncoder {
        fn encode_retry(
            &self,
            out: &mut [u8],
            _peer_scid: &ConnectionId,
            _new_cid: &ConnectionId,
            _odcid: &ConnectionId,
            _token: &[u8],
        ) -> Result<usize, PacketEncodeError> {
            Ok(out.len() + 1)
        }
    }

    fn secret() -> TokenSecret {
        TokenSecret::from_bytes([0x21u8; 32])
    }

    fn addrs() -> (SocketAddr, SocketAddr) {
        ("192.0.2.1:4433".parse().unwrap(), "198.51.100.7:50000".parse().unwrap())
    }

    #[test]
    fn test_build_retry_encodes_token_and_fresh_cid() {
        let assembler = RetryPacketAssembler::new(RetryTokenCodec::default(), FrameEncoder);
        let (local, remote) = addrs();
        let odcid = ConnectionId::try_from_slice(&[0x0d; 8]).unwrap();
        let peer_scid = ConnectionId::try_from_slice(&[0x05; 4]).unwrap();

        let packet = assembler
            .build_retry(&secret(), &odcid, &peer_scid, &local, &remote)
            .unwrap();

        assert_eq!(packet.new_cid().len(), RETRY_CID_LEN);
        assert!(!packet.is_empty());
        assert_eq!(packet.as_bytes()[0], 0xf5);

        // The fresh CID appears right after the peer's SCID block.
        let bytes = packet.as_bytes();
        let scid_block = 2 + peer_scid.len();
        assert_eq!(bytes[scid_block] as usize, RETRY_CID_LEN);
        assert_eq!(
            &bytes[scid_block + 1..scid_block + 1 + RETRY_CID_LEN],
            packet.new_cid().as_bytes()
        );

        // The trailing bytes are a token that validates for the remote.
        let token_at = 4 + peer_scid.len() + RETRY_CID_LEN + odcid.len();
        let recovered = assembler
            .codec()
            .validate(&secret(), &remote, &bytes[token_at..])
            .unwrap();
        assert_eq!(recovered, odcid);
    }

    #[test]
    fn test_buffer_bound() {
        let assembler = RetryPacketAssembler::new(RetryTokenCodec::default(), CapacityProbe);
        let (local, remote) = addrs();
        let odcid = ConnectionId::try_from_slice(&[0x0d; 8]).unwrap();
        let peer_scid = ConnectionId::try_from_slice(&[0x05; 4]).unwrap();

        let packet = assembler
            .build_retry(&secret(), &odcid, &peer_scid, &local, &remote)
            .unwrap();

        // v4 token for an 8-byte odcid: 7 + 8 + 8 + 16 + 32 = 71 bytes.
        let expected = 71 + 2 * MAX_CID_LEN + peer_scid.len() + RETRY_PACKET_OVERHEAD;
        assert_eq!(packet.len(), expected);
        assert!(packet.len() <= MAX_UDP_PAYLOAD_IPV4);
    }

    #[test]
    fn test_ipv6_path_uses_smaller_bound() {
        let assembler = RetryPacketAssembler::new(RetryTokenCodec::default(), CapacityProbe);
        let local: SocketAddr = "[2001:db8::1]:4433".parse().unwrap();
        let remote: SocketAddr = "[2001:db8::2]:50000".parse().unwrap();

        let packet = assembler
            .build_retry(
                &secret(),
                &ConnectionId::try_from_slice(&[0x0d; 8]).unwrap(),
                &ConnectionId::try_from_slice(&[0x05; 4]).unwrap(),
                &local,
                &remote,
            )
            .unwrap();
        assert!(packet.len() <= MAX_UDP_PAYLOAD_IPV6);
    }

    #[test]
    fn test_encoder_error_propagates() {
        let assembler = RetryPacketAssembler::new(RetryTokenCodec::default(), RefusingEncoder);
        let (local, remote) = addrs();

        let result = assembler.build_retry(
            &secret(),
            &ConnectionId::EMPTY,
            &ConnectionId::EMPTY,
            &local,
            &remote,
        );
        assert!(matches!(
            result,
            Err(PacketError::Encode(PacketEncodeError::InsufficientSpace))
        ));
    }

    #[test]
    fn test_overreporting_encoder_rejected() {
        let assembler = RetryPacketAssembler::new(RetryTokenCodec::default(), LyingEncoder);
        let (local, remote) = addrs();

        let result = assembler.build_retry(
            &secret(),
            &ConnectionId::EMPTY,
            &ConnectionId::EMPTY,
            &local,
            &remote,
        );
        assert!(matches!(
            result,
            Err(PacketError::Encode(PacketEncodeError::Malformed))
        ));
    }

    #[test]
    fn test_token_failure_reported_distinctly() {
        let err: PacketError = CryptoError::KeyDerivationFailed.into();
        assert!(err.is_token_failure());
    }
}
