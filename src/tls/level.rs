//! Encryption levels a handshake moves through.

use std::fmt;

/// The four key epochs of a connection.
///
/// Ordering follows the progression on the wire, so `<` answers "are
/// these keys available before those".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CryptoLevel {
    /// Keys every observer can derive from the first destination CID.
    Initial,
    /// 0-RTT keys, present only when resuming.
    EarlyData,
    /// Keys from the handshake secret.
    Handshake,
    /// 1-RTT application keys.
    Application,
}

impl CryptoLevel {
    /// Short label used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            CryptoLevel::Initial => "initial",
            CryptoLevel::EarlyData => "early",
            CryptoLevel::Handshake => "handshake",
            CryptoLevel::Application => "app",
        }
    }
}

impl fmt::Display for CryptoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
