//! Per-endpoint TLS policy.

use std::net::IpAddr;

/// Which side of the handshake an endpoint plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Initiates connections.
    Client,
    /// Accepts connections.
    Server,
}

/// TLS policy for one endpoint.
///
/// Built once at endpoint startup and handed to every handshake adapter
/// the endpoint creates. Two endpoints in the same process keep fully
/// independent configurations.
#[derive(Clone, Debug)]
pub struct EndpointTlsConfig {
    /// Role this endpoint plays.
    pub side: Side,
    /// The single application protocol this endpoint speaks.
    pub alpn: Vec<u8>,
    /// Hostname for SNI, when connecting by name.
    pub server_name: Option<String>,
    /// Ask the peer for a stapled OCSP response.
    pub request_ocsp: bool,
    /// Servers only: request a client certificate.
    pub request_client_cert: bool,
    /// Fail the handshake when peer verification fails.
    pub reject_unauthorized: bool,
    /// Offer or accept 0-RTT data.
    pub enable_early_data: bool,
}

impl EndpointTlsConfig {
    /// Client defaults: verify the peer, no 0-RTT, no OCSP.
    pub fn client(alpn: impl Into<Vec<u8>>) -> Self {
        Self {
            side: Side::Client,
            alpn: alpn.into(),
            server_name: None,
            request_ocsp: false,
            request_client_cert: false,
            reject_unauthorized: true,
            enable_early_data: false,
        }
    }

    /// Server defaults: same as [`Self::client`] with the side flipped.
    pub fn server(alpn: impl Into<Vec<u8>>) -> Self {
        Self { side: Side::Server, ..Self::client(alpn) }
    }

    /// Pick this endpoint's protocol out of the peer's ALPN offer.
    ///
    /// `offered` is the wire-format list: each entry is one length byte
    /// followed by that many protocol bytes. Returns the matching entry
    /// from `offered`, or `None` when nothing matches or the list is
    /// malformed (a zero-length or truncated entry).
    pub fn select_alpn<'a>(&self, offered: &'a [u8]) -> Option<&'a [u8]> {
        let mut rest = offered;
        while let [len, tail @ ..] = rest {
            let len = *len as usize;
            if len == 0 || tail.len() < len {
                return None;
            }
            let (entry, next) = tail.split_at(len);
            if entry == self.alpn.as_slice() {
                return Some(entry);
            }
            rest = next;
        }
        None
    }

    /// The name to present in SNI, if it is a DNS name at all.
    ///
    /// Numeric hosts never go into SNI.
    pub fn effective_server_name(&self) -> Option<&str> {
        let name = self.server_name.as_deref()?;
        if name.parse::<IpAddr>().is_ok() { None } else { Some(name) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EndpointTlsConfig {
        EndpointTlsConfig::server(b"cwy/1".to_vec())
    }

    #[test]
    fn test_constructors_differ_only_in_side() {
        let client = EndpointTlsConfig::client(b"cwy/1".to_vec());
        let server = EndpointTlsConfig::server(b"cwy/1".to_vec());

        assert_eq!(client.side, Side::Client);
        assert_eq!(server.side, Side::Server);
        assert!(client.reject_unauthorized);
        assert!(server.reject_unauthorized);
        assert!(!client.enable_early_data);
        assert_eq!(client.alpn, server.alpn);
    }

    #[test]
    fn test_select_alpn_first_entry() {
        let offered = b"\x05cwy/1\x02h9";
        assert_eq!(config().select_alpn(offered), Some(&b"cwy/1"[..]));
    }

    #[test]
    fn test_select_alpn_later_entry() {
        let offered = b"\x02h9\x05cwy/1";
        assert_eq!(config().select_alpn(offered), Some(&b"cwy/1"[..]));
    }

    #[test]
    fn test_select_alpn_no_match() {
        assert_eq!(config().select_alpn(b"\x02h9\x03dns"), None);
    }

    #[test]
    fn test_select_alpn_empty_offer() {
        assert_eq!(config().select_alpn(b""), None);
    }

    #[test]
    fn test_select_alpn_rejects_zero_length_entry() {
        // A zero-length entry can never match and hides list corruption.
        assert_eq!(config().select_alpn(b"\x00\x05cwy/1"), None);
    }

    #[test]
    fn test_select_alpn_rejects_truncated_entry() {
        assert_eq!(config().select_alpn(b"\x05cwy"), None);
    }

    #[test]
    fn test_effective_server_name_passes_dns_names() {
        let mut config = config();
        config.server_name = Some("gateway.example.com".into());
        assert_eq!(config.effective_server_name(), Some("gateway.example.com"));
    }

    #[test]
    fn test_effective_server_name_drops_numeric_hosts() {
        let mut config = config();
        config.server_name = Some("192.0.2.1".into());
        assert_eq!(config.effective_server_name(), None);

        config.server_name = Some("2001:db8::1".into());
        assert_eq!(config.effective_server_name(), None);
    }

    #[test]
    fn test_effective_server_name_absent() {
        assert_eq!(config().effective_server_name(), None);
    }
}
