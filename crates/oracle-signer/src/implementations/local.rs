//! Local private key signer.
//!
//! Holds the oracle key in process memory and signs digests with it. The
//! key is accepted only as `0x` followed by 64 hex characters.

use crate::{SignatureParts, SignerError, SignerInterface};
use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use oracle_types::{is_word_hex, SecretString};
use std::str::FromStr;

/// Signer backed by a private key held in memory.
#[derive(Debug)]
pub struct LocalSigner {
	signer: PrivateKeySigner,
}

impl LocalSigner {
	/// Creates a signer from a `0x`-prefixed hex private key.
	///
	/// Error messages never include the key material.
	pub fn new(private_key: &SecretString) -> Result<Self, SignerError> {
		let signer = private_key.with_exposed(|key| {
			if !key.starts_with("0x") {
				return Err(SignerError::InvalidKey("missing 0x prefix".into()));
			}
			if !is_word_hex(key) {
				return Err(SignerError::InvalidKey(
					"expected 64 hex characters".into(),
				));
			}
			let bytes = B256::from_str(key)
				.map_err(|_| SignerError::InvalidKey("not a hex string".into()))?;
			PrivateKeySigner::from_bytes(&bytes)
				.map_err(|_| SignerError::InvalidKey("not a valid secp256k1 scalar".into()))
		})?;

		Ok(Self { signer })
	}
}

impl SignerInterface for LocalSigner {
	fn address(&self) -> Address {
		self.signer.address()
	}

	fn sign_hash(&self, hash: &B256) -> Result<SignatureParts, SignerError> {
		let signature = self
			.signer
			.sign_hash_sync(hash)
			.map_err(|e| SignerError::SigningFailed(e.to_string()))?;
		Ok(SignatureParts::from_signature(&signature))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::recover_address;
	use crate::test_utils::{ORACLE_ADDRESS, ORACLE_KEY};

	#[test]
	fn test_address_from_key() {
		let signer = LocalSigner::new(&SecretString::from(ORACLE_KEY)).unwrap();
		assert_eq!(signer.address(), Address::from_str(ORACLE_ADDRESS).unwrap());
	}

	#[test]
	fn test_rejects_bare_hex_key() {
		let err = LocalSigner::new(&SecretString::from(&ORACLE_KEY[2..])).unwrap_err();
		assert!(matches!(err, SignerError::InvalidKey(_)));
	}

	#[test]
	fn test_rejects_out_of_range_scalars() {
		let zero = SecretString::new(format!("0x{}", "0".repeat(64)));
		assert!(matches!(
			LocalSigner::new(&zero),
			Err(SignerError::InvalidKey(_))
		));

		let above_order = SecretString::new(format!("0x{}", "f".repeat(64)));
		assert!(matches!(
			LocalSigner::new(&above_order),
			Err(SignerError::InvalidKey(_))
		));
	}

	#[test]
	fn test_error_does_not_leak_key() {
		let key = format!("0x{}", "f".repeat(64));
		let err = LocalSigner::new(&SecretString::new(key.clone())).unwrap_err();
		assert!(!err.to_string().contains(&key[2..]));
	}

	#[test]
	fn test_sign_hash_recovers() {
		let signer = LocalSigner::new(&SecretString::from(ORACLE_KEY)).unwrap();
		let hash = B256::repeat_byte(0x42);
		let parts = signer.sign_hash(&hash).unwrap();

		assert!(parts.v == 27 || parts.v == 28);
		assert_eq!(recover_address(&hash, &parts).unwrap(), signer.address());
	}
}
