//! Causeway validation - core constants and error types.
//!
//! This module provides the shared foundations for the validation layer.
//! It has minimal dependencies and defines the error taxonomy.

mod constants;
mod error;

pub use constants::*;
pub use error::*;
