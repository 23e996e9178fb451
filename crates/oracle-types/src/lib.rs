//! Common types for the token-swap authorization oracle.
//!
//! This crate defines the values that flow between the signer, the
//! configuration layer and the HTTP API: signed authorizations, the
//! packed address hash, API request/response bodies and the redacted
//! secret holder for the signing key.

/// HTTP API request, response and error types.
pub mod api;
/// Redacted holder for the signing key.
pub mod secret_string;
/// Signed authorization values.
pub mod signature;
/// Hex formatting helpers.
pub mod utils;

pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use api::*;
pub use secret_string::SecretString;
pub use signature::*;
pub use utils::{
	is_word_hex, recovery_id_to_hex, with_0x_prefix, without_0x_prefix, word_to_hex,
	WORD_HEX_LEN,
};
