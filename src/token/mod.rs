//! Causeway validation - token minting and checking.
//!
//! Retry tokens prove a client address is reachable; stateless reset
//! tokens prove a forgotten connection was ours. Both derive from the
//! endpoint [`TokenSecret`].

mod reset;
mod retry;
mod secret;

pub use reset::{StatelessResetToken, stateless_reset_token};
pub use retry::{RetryToken, RetryTokenCodec};
pub use secret::TokenSecret;
