//! Protocol constants for the Causeway validation layer.
//!
//! These values are fixed by the protocol and MUST NOT be changed.

use std::time::Duration;

// =============================================================================
// TOKEN CRYPTOGRAPHY
// =============================================================================

/// Endpoint token secret size.
pub const TOKEN_SECRET_SIZE: usize = 32;

/// Random nonce appended to every retry token.
pub const TOKEN_NONCE_SIZE: usize = 32;

/// AEAD authentication tag size (same for every supported suite).
pub const AEAD_TAG_SIZE: usize = 16;

/// Upper bound on the retry token wire field.
pub const MAX_RETRY_TOKEN_SIZE: usize = 256;

/// Upper bound on the token plaintext before sealing.
pub const MAX_TOKEN_PLAINTEXT_SIZE: usize = 4096;

// =============================================================================
// CONNECTION IDS
// =============================================================================

/// Smallest non-empty connection ID.
pub const MIN_CID_LEN: usize = 1;

/// Largest connection ID.
pub const MAX_CID_LEN: usize = 20;

/// Length of the fresh CID minted for a retry packet.
pub const RETRY_CID_LEN: usize = 18;

// =============================================================================
// STATELESS RESET
// =============================================================================

/// Stateless reset token size.
pub const RESET_TOKEN_SIZE: usize = 16;

// =============================================================================
// FLOW LABELS
// =============================================================================

/// IPv6 flow labels are 20 bits wide.
pub const FLOW_LABEL_MASK: u32 = 0xF_FFFF;

// =============================================================================
// ADDRESSES
// =============================================================================

/// Largest canonical address encoding (IPv6: family + 16 + port).
pub const MAX_ADDRESS_SIZE: usize = 19;

// =============================================================================
// TOKEN LIFETIME
// =============================================================================

/// Default retry token lifetime.
pub const DEFAULT_TOKEN_EXPIRATION: Duration = Duration::from_secs(10);

/// Smallest accepted token lifetime.
pub const MIN_TOKEN_EXPIRATION: Duration = Duration::from_secs(1);

/// Largest accepted token lifetime.
pub const MAX_TOKEN_EXPIRATION: Duration = Duration::from_secs(60);

// =============================================================================
// RETRY PACKETS
// =============================================================================

/// Fixed header bytes of a retry packet beyond CIDs and token.
pub const RETRY_PACKET_OVERHEAD: usize = 8;

/// Largest datagram payload on an IPv4 path.
pub const MAX_UDP_PAYLOAD_IPV4: usize = 1252;

/// Largest datagram payload on an IPv6 path.
pub const MAX_UDP_PAYLOAD_IPV6: usize = 1232;
