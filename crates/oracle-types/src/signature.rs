//! Signed swap authorizations and the packed address hash.

use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

/// An oracle authorization for one address, in the split form consumed by
/// the swap contract.
///
/// `r` and `s` are always `0x` followed by exactly 64 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAddress {
	/// Full 65-byte signature, `r || s || v`.
	pub signature: String,
	/// Digest that was signed.
	pub hash: String,
	/// Recovery id, `0x1b` or `0x1c`.
	pub v: String,
	/// First signature word.
	pub r: String,
	/// Second signature word.
	pub s: String,
}

/// Result of hashing a single tightly packed address.
///
/// Mirrors the swap contract's `calculateAddressHash`, which returns both
/// the digest and the packed bytes it was computed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressHash {
	/// keccak256 of `data`.
	pub hash: B256,
	/// The packed address, 20 bytes.
	pub data: Bytes,
}
