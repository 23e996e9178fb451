//! Split signatures and signer recovery.
//!
//! Mirrors the swap contract's `recoverAddress(hash, v, r, s)` so that a
//! signature can be checked off-chain before it is handed to a swapper.

use crate::{ensure_word, SignerError};
use alloy_primitives::{Address, PrimitiveSignature, B256, U256};
use oracle_types::without_0x_prefix;
use std::str::FromStr;

/// Recoverable ECDSA signature split into the form `ecrecover` takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureParts {
	/// Recovery id, 27 or 28.
	pub v: u8,
	pub r: U256,
	pub s: U256,
}

impl SignatureParts {
	/// Parses hex components as produced by the signer.
	///
	/// `v` may be hex (`0x1b`) or decimal (`27`), and 0/1 are normalized to
	/// 27/28. `r` and `s` must be exactly 64 hex characters; shorter values
	/// are a padding anomaly and are rejected rather than left-padded.
	pub fn parse(v: &str, r: &str, s: &str) -> Result<Self, SignerError> {
		ensure_word("r", r)?;
		ensure_word("s", s)?;

		Ok(Self {
			v: parse_recovery_id(v)?,
			r: parse_word("r", r)?,
			s: parse_word("s", s)?,
		})
	}

	/// Builds parts from a signature produced by an alloy signer.
	pub fn from_signature(signature: &PrimitiveSignature) -> Self {
		Self {
			v: 27 + signature.v() as u8,
			r: signature.r(),
			s: signature.s(),
		}
	}

	/// Parity of the curve point's y coordinate.
	pub fn y_parity(&self) -> bool {
		self.v == 28
	}

	fn to_signature(self) -> PrimitiveSignature {
		PrimitiveSignature::new(self.r, self.s, self.y_parity())
	}
}

/// Parses a `0x`-prefixed 32-byte digest.
pub fn parse_hash(value: &str) -> Result<B256, SignerError> {
	if !value.starts_with("0x") || !oracle_types::is_word_hex(value) {
		return Err(SignerError::InvalidSignature(format!(
			"hash must be 0x plus 64 hex characters: {}",
			value
		)));
	}
	B256::from_str(value).map_err(|e| SignerError::InvalidSignature(e.to_string()))
}

/// Recovers the address that signed `hash`.
pub fn recover_address(hash: &B256, parts: &SignatureParts) -> Result<Address, SignerError> {
	parts
		.to_signature()
		.recover_address_from_prehash(hash)
		.map_err(|e| SignerError::InvalidSignature(format!("recovery failed: {}", e)))
}

/// Recovers the signer of `hash` and checks it against `expected`.
pub fn verify_signer(
	hash: &B256,
	parts: &SignatureParts,
	expected: &Address,
) -> Result<(), SignerError> {
	let recovered = recover_address(hash, parts)?;
	if recovered != *expected {
		tracing::warn!(%recovered, %expected, "Recovered signer does not match");
		return Err(SignerError::RecoveryMismatch {
			expected: *expected,
			recovered,
		});
	}
	Ok(())
}

fn parse_recovery_id(value: &str) -> Result<u8, SignerError> {
	let parsed = match value.strip_prefix("0x") {
		Some(digits) => u8::from_str_radix(digits, 16),
		None => value.parse::<u8>(),
	}
	.map_err(|e| SignerError::InvalidSignature(format!("v '{}': {}", value, e)))?;

	match parsed {
		0 | 1 => Ok(parsed + 27),
		27 | 28 => Ok(parsed),
		other => Err(SignerError::InvalidSignature(format!(
			"v must be 27 or 28, got {}",
			other
		))),
	}
}

fn parse_word(component: &'static str, value: &str) -> Result<U256, SignerError> {
	U256::from_str_radix(without_0x_prefix(value), 16)
		.map_err(|e| SignerError::InvalidSignature(format!("{}: {}", component, e)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{derived_key, ORACLE_ADDRESS, ORACLE_KEY, SWAPPER_ADDRESS};
	use crate::{sign_address, AddressSigner};
	use oracle_types::SecretString;

	#[test]
	fn test_parse_recovery_id_forms() {
		assert_eq!(parse_recovery_id("0x1b").unwrap(), 27);
		assert_eq!(parse_recovery_id("0x1c").unwrap(), 28);
		assert_eq!(parse_recovery_id("28").unwrap(), 28);
		assert_eq!(parse_recovery_id("0").unwrap(), 27);
		assert_eq!(parse_recovery_id("0x01").unwrap(), 28);
		assert!(parse_recovery_id("0x1d").is_err());
		assert!(parse_recovery_id("zz").is_err());
	}

	#[test]
	fn test_parse_rejects_short_words() {
		let full = format!("0x{}", "11".repeat(32));
		let short = format!("0x{}", "11".repeat(31));

		let err = SignatureParts::parse("0x1b", &short, &full).unwrap_err();
		assert!(matches!(
			err,
			SignerError::PaddingAnomaly { component: "r", .. }
		));

		let err = SignatureParts::parse("0x1b", &full, &short).unwrap_err();
		assert!(matches!(
			err,
			SignerError::PaddingAnomaly { component: "s", .. }
		));
	}

	#[test]
	fn test_verify_signer_accepts_oracle() {
		let signed = sign_address(&SecretString::from(ORACLE_KEY), SWAPPER_ADDRESS).unwrap();
		let hash = parse_hash(&signed.hash).unwrap();
		let parts = SignatureParts::parse(&signed.v, &signed.r, &signed.s).unwrap();

		let oracle = Address::from_str(ORACLE_ADDRESS).unwrap();
		assert!(verify_signer(&hash, &parts, &oracle).is_ok());
	}

	#[test]
	fn test_verify_signer_reports_mismatch() {
		let signer = AddressSigner::from_private_key(&derived_key(7)).unwrap();
		let signed = signer.sign_address(SWAPPER_ADDRESS).unwrap();
		let hash = parse_hash(&signed.hash).unwrap();
		let parts = SignatureParts::parse(&signed.v, &signed.r, &signed.s).unwrap();

		let oracle = Address::from_str(ORACLE_ADDRESS).unwrap();
		let err = verify_signer(&hash, &parts, &oracle).unwrap_err();
		match err {
			SignerError::RecoveryMismatch {
				expected,
				recovered,
			} => {
				assert_eq!(expected, oracle);
				assert_eq!(recovered, signer.address());
			},
			other => panic!("unexpected error: {}", other),
		}
	}

	#[test]
	fn test_wrong_hash_recovers_other_address() {
		let signer = AddressSigner::from_private_key(&SecretString::from(ORACLE_KEY)).unwrap();
		let signed = signer.sign_address(SWAPPER_ADDRESS).unwrap();
		let parts = SignatureParts::parse(&signed.v, &signed.r, &signed.s).unwrap();

		let other_hash = crate::address_hash(&Address::from_str(ORACLE_ADDRESS).unwrap());
		if let Ok(recovered) = recover_address(&other_hash, &parts) {
			assert_ne!(recovered, signer.address());
		}
	}

	#[test]
	fn test_parse_hash() {
		assert!(parse_hash(&format!("0x{}", "ab".repeat(32))).is_ok());
		assert!(parse_hash("0xabcd").is_err());
		assert!(parse_hash(&"ab".repeat(32)).is_err());
		assert!(parse_hash(&format!("0X{}", "ab".repeat(32))).is_err());
	}

	#[test]
	fn test_parse_rejects_unprefixed_words() {
		let full = format!("0x{}", "11".repeat(32));
		let bare = "11".repeat(32);

		let err = SignatureParts::parse("0x1b", &bare, &full).unwrap_err();
		assert!(matches!(err, SignerError::InvalidSignature(_)));

		let err = SignatureParts::parse("0x1b", &full, &format!("0X{}", bare)).unwrap_err();
		assert!(matches!(err, SignerError::InvalidSignature(_)));
	}
}
