//! Packed address hashing.
//!
//! The swap contract hashes `abi.encodePacked(address)`, which is the raw
//! 20 address bytes with no padding. Hashing the 32-byte ABI word instead
//! yields a different digest and recovery silently returns a wrong signer.

use crate::SignerError;
use alloy_primitives::{keccak256, Address, Bytes, B256};
use oracle_types::AddressHash;
use std::str::FromStr;

/// Length of an address in hex characters, without prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Parses a `0x`-prefixed, 40 hex character address.
///
/// Mixed case is accepted without enforcing the EIP-55 checksum.
pub fn parse_address(value: &str) -> Result<Address, SignerError> {
	let digits = value
		.strip_prefix("0x")
		.ok_or_else(|| SignerError::InvalidAddress(format!("missing 0x prefix: {}", value)))?;

	if digits.len() != ADDRESS_HEX_LEN {
		return Err(SignerError::InvalidAddress(format!(
			"expected {} hex characters, got {}: {}",
			ADDRESS_HEX_LEN,
			digits.len(),
			value
		)));
	}

	Address::from_str(value).map_err(|e| SignerError::InvalidAddress(format!("{}: {}", value, e)))
}

/// keccak256 of the tightly packed address.
pub fn address_hash(address: &Address) -> B256 {
	keccak256(address.as_slice())
}

/// Off-chain equivalent of the contract's `calculateAddressHash`.
pub fn calculate_address_hash(address: &str) -> Result<AddressHash, SignerError> {
	let address = parse_address(address)?;
	Ok(AddressHash {
		hash: address_hash(&address),
		data: Bytes::copy_from_slice(address.as_slice()),
	})
}
