//! One-shot CLI commands.
//!
//! Each command returns a serializable value; `main` prints it as JSON.

use alloy_primitives::Address;
use oracle_config::Config;
use oracle_signer::{
	calculate_address_hash, parse_address, parse_hash, private_key_to_address, recover_address,
	verify_signer, AddressSigner, SignatureParts, SignerError,
};
use oracle_types::{AddressHash, SecretString, SignedAddress};

/// Signs an authorization for `address` with the configured oracle key.
pub fn sign(config: &Config, address: &str) -> Result<SignedAddress, SignerError> {
	let signer = AddressSigner::from_private_key(&config.signer.private_key)?;
	tracing::info!("Signing with oracle {} [{}]", signer.address(), config.oracle.id);
	signer.sign_address(address)
}

/// Derives the address of a private key read as raw text.
///
/// Surrounding whitespace is ignored and a missing `0x` is added.
pub fn derive_address(raw_key: SecretString) -> Result<Address, SignerError> {
	private_key_to_address(&raw_key.with_0x_prefix())
}

/// Computes the packed hash of `address`.
pub fn hash(address: &str) -> Result<AddressHash, SignerError> {
	calculate_address_hash(address)
}

/// Recovers the signer of `hash`, optionally checking it against `expected`.
pub fn recover(
	hash: &str,
	v: &str,
	r: &str,
	s: &str,
	expected: Option<&str>,
) -> Result<Address, SignerError> {
	let hash = parse_hash(hash)?;
	let parts = SignatureParts::parse(v, r, s)?;

	match expected {
		Some(expected) => {
			let expected = parse_address(expected)?;
			verify_signer(&hash, &parts, &expected)?;
			Ok(expected)
		},
		None => recover_address(&hash, &parts),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	const KEY: &str = "0x39cc67e7dbf2c162095bfc058f4b7ba2f9aa7ec006f9e28dc438c07662a3bb41";
	const ORACLE: &str = "0x1906617f5AB7a453917761b2dD8928E789f24d2B";
	const SWAPPER: &str = "0x168767eeb7b63A49F1D1E213FF354A6a934a93b0";

	fn config() -> Config {
		format!(
			"[oracle]\nid = \"test-oracle\"\n\n[signer]\nprivate_key = \"{}\"\n",
			KEY
		)
		.parse()
		.unwrap()
	}

	#[test]
	fn test_derive_address_from_stdin_text() {
		let raw = SecretString::new(format!("{}\n", &KEY[2..]));
		let address = derive_address(raw).unwrap();
		assert_eq!(address, Address::from_str(ORACLE).unwrap());
	}

	#[test]
	fn test_sign_then_recover_with_expected() {
		let signed = sign(&config(), SWAPPER).unwrap();
		let recovered = recover(&signed.hash, &signed.v, &signed.r, &signed.s, Some(ORACLE)).unwrap();
		assert_eq!(recovered, Address::from_str(ORACLE).unwrap());
	}

	#[test]
	fn test_recover_with_wrong_expected_fails() {
		let signed = sign(&config(), SWAPPER).unwrap();
		let err = recover(&signed.hash, &signed.v, &signed.r, &signed.s, Some(SWAPPER)).unwrap_err();
		assert!(matches!(err, SignerError::RecoveryMismatch { .. }));
	}

	#[test]
	fn test_hash_command_matches_signed_hash() {
		let signed = sign(&config(), SWAPPER).unwrap();
		let hashed = hash(SWAPPER).unwrap();
		assert_eq!(signed.hash, format!("{:#x}", hashed.hash));
	}
}
