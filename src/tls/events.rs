//! Event seam between a TLS driver and the endpoint.

use tracing::trace;

use crate::tls::config::EndpointTlsConfig;
use crate::tls::level::CryptoLevel;

/// Endpoint-side sink for handshake progress.
///
/// A TLS driver calls into this as the handshake advances. Each endpoint
/// supplies its own implementation; nothing here is process-global.
pub trait HandshakeEvents {
    /// New traffic secrets became available at `level`.
    ///
    /// Return false to refuse the keys and fail the handshake.
    fn on_secrets(&mut self, level: CryptoLevel, read_secret: &[u8], write_secret: &[u8]) -> bool;

    /// Handshake bytes ready to transmit at `level`.
    fn on_handshake_data(&mut self, level: CryptoLevel, data: &[u8]);

    /// The current flight is complete and may be flushed to the wire.
    fn on_flush_flight(&mut self) {}

    /// A TLS alert was raised while the connection was at `level`.
    fn on_alert(&mut self, level: CryptoLevel, alert: u8);

    /// Certificate status (OCSP) data is wanted; return false to fail
    /// the handshake instead of serving it.
    fn on_certificate_status(&mut self) -> bool {
        true
    }
}

/// Binds an event sink to its endpoint's TLS policy.
pub struct HandshakeAdapter<E> {
    events: E,
    config: EndpointTlsConfig,
    last_alert: Option<(CryptoLevel, u8)>,
}

impl<E: HandshakeEvents> HandshakeAdapter<E> {
    /// Wire a sink to the endpoint configuration that drives it.
    pub fn new(events: E, config: EndpointTlsConfig) -> Self {
        Self { events, config, last_alert: None }
    }

    /// The endpoint policy behind this handshake.
    pub fn config(&self) -> &EndpointTlsConfig {
        &self.config
    }

    /// The most recent alert seen, if any.
    pub fn last_alert(&self) -> Option<(CryptoLevel, u8)> {
        self.last_alert
    }

    /// Tear the adapter down and recover the sink.
    pub fn into_events(self) -> E {
        self.events
    }

    /// Forward fresh traffic secrets for `level`.
    pub fn secrets_available(
        &mut self,
        level: CryptoLevel,
        read_secret: &[u8],
        write_secret: &[u8],
    ) -> bool {
        trace!(level = %level, "traffic secrets available");
        self.events.on_secrets(level, read_secret, write_secret)
    }

    /// Forward handshake bytes produced at `level`.
    pub fn handshake_data(&mut self, level: CryptoLevel, data: &[u8]) {
        self.events.on_handshake_data(level, data);
    }

    /// Signal that the current flight is complete.
    pub fn flush(&mut self) {
        self.events.on_flush_flight();
    }

    /// Record an alert and forward it to the sink.
    pub fn alert(&mut self, level: CryptoLevel, alert: u8) {
        trace!(level = %level, alert, "tls alert");
        self.last_alert = Some((level, alert));
        self.events.on_alert(level, alert);
    }

    /// Ask the sink whether certificate status data should be served.
    pub fn certificate_status(&mut self) -> bool {
        self.events.on_certificate_status()
    }
}
