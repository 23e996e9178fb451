//! Swap authorization signing for the token-swap oracle.
//!
//! The oracle authorizes an address to swap legacy tokens by signing the
//! keccak-256 hash of the tightly packed address. The swap contract
//! recomputes the same hash and recovers the signer from `(v, r, s)`.
//!
//! This crate provides the signing seam ([`SignerInterface`]), the service
//! wrapping it ([`AddressSigner`]), and the off-chain mirrors of the
//! contract's `calculateAddressHash` and `recoverAddress` calls used to
//! cross-check signatures.

use alloy_primitives::{Address, B256, U256};
use oracle_types::{recovery_id_to_hex, word_to_hex, SecretString, SignedAddress};
use thiserror::Error;

pub mod budget;
pub mod hashing;
pub mod recovery;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub use budget::{check_amount, check_budget};
pub use hashing::{address_hash, calculate_address_hash, parse_address};
pub use recovery::{parse_hash, recover_address, verify_signer, SignatureParts};

/// Errors that can occur while producing or checking an authorization.
#[derive(Debug, Error)]
pub enum SignerError {
	/// The target address is not `0x` followed by 40 hex characters.
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	/// The signing key is malformed or not a valid secp256k1 scalar.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// A signature word did not encode to exactly 32 bytes of hex.
	#[error("Padding anomaly in {component}: expected 64 hex characters, got {length}")]
	PaddingAnomaly {
		component: &'static str,
		length: usize,
	},
	/// The signature components could not be decoded or recovered.
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
	/// Recovery produced a different address than the expected signer.
	#[error("Recovered {recovered} but expected {expected}")]
	RecoveryMismatch {
		expected: Address,
		recovered: Address,
	},
	/// The requested amount is not a positive token amount.
	#[error("Invalid amount: {0}")]
	InvalidAmount(String),
	/// The requested amount is larger than the remaining swap budget.
	#[error("Requested {requested} exceeds remaining swap budget {remaining}")]
	BudgetExceeded { requested: U256, remaining: U256 },
	/// The underlying signer failed.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
}

/// Signing seam for the oracle key.
///
/// Implementations sign a precomputed 32-byte digest without any message
/// prefix. Signing is CPU-bound and synchronous.
pub trait SignerInterface: Send + Sync {
	/// Address derived from the signing key.
	fn address(&self) -> Address;

	/// Signs `hash` and returns the split recoverable signature.
	fn sign_hash(&self, hash: &B256) -> Result<SignatureParts, SignerError>;
}

/// Service that turns target addresses into signed swap authorizations.
pub struct AddressSigner {
	implementation: Box<dyn SignerInterface>,
}

impl AddressSigner {
	/// Creates a service over the given signer implementation.
	pub fn new(implementation: Box<dyn SignerInterface>) -> Self {
		Self { implementation }
	}

	/// Creates a service backed by a local private key.
	pub fn from_private_key(private_key: &SecretString) -> Result<Self, SignerError> {
		let signer = implementations::local::LocalSigner::new(private_key)?;
		Ok(Self::new(Box::new(signer)))
	}

	/// Address of the oracle key.
	pub fn address(&self) -> Address {
		self.implementation.address()
	}

	/// Signs the packed hash of `target` and returns the split signature.
	///
	/// The address is validated before any cryptographic work. The result
	/// always recovers to [`AddressSigner::address`].
	pub fn sign_address(&self, target: &str) -> Result<SignedAddress, SignerError> {
		let target = parse_address(target)?;
		let hash = address_hash(&target);

		tracing::debug!(signer = %self.address(), swapper = %target, "Signing swap authorization");

		let parts = self.implementation.sign_hash(&hash)?;
		encode_signed(&hash, &parts)
	}

	/// Checks `amount` against the remaining budget, then signs `target`.
	///
	/// A zero amount is always refused. Without a known budget any positive
	/// amount is signed.
	pub fn authorize(
		&self,
		target: &str,
		amount: Option<U256>,
		remaining_budget: Option<U256>,
	) -> Result<SignedAddress, SignerError> {
		// Fail on the address before looking at amounts.
		parse_address(target)?;
		if let Some(amount) = amount {
			match remaining_budget {
				Some(remaining) => check_budget(amount, remaining)?,
				None => check_amount(amount)?,
			}
		}
		self.sign_address(target)
	}
}

/// Signs the packed hash of `target` with `private_key`.
///
/// Stateless form of [`AddressSigner::sign_address`].
pub fn sign_address(private_key: &SecretString, target: &str) -> Result<SignedAddress, SignerError> {
	// Address errors must surface before the key is touched.
	parse_address(target)?;
	AddressSigner::from_private_key(private_key)?.sign_address(target)
}

/// Derives the Ethereum address of a private key.
pub fn private_key_to_address(private_key: &SecretString) -> Result<Address, SignerError> {
	Ok(implementations::local::LocalSigner::new(private_key)?.address())
}

/// Renders a digest and split signature into the wire form.
fn encode_signed(hash: &B256, parts: &SignatureParts) -> Result<SignedAddress, SignerError> {
	let r = word_to_hex(&parts.r);
	let s = word_to_hex(&parts.s);
	ensure_word("r", &r)?;
	ensure_word("s", &s)?;

	let mut bytes = Vec::with_capacity(65);
	bytes.extend_from_slice(&parts.r.to_be_bytes::<32>());
	bytes.extend_from_slice(&parts.s.to_be_bytes::<32>());
	bytes.push(parts.v);

	Ok(SignedAddress {
		signature: format!("0x{}", hex::encode(bytes)),
		hash: format!("{:#x}", hash),
		v: recovery_id_to_hex(parts.v),
		r,
		s,
	})
}

/// Fails unless `value` is `0x` plus exactly 64 hex characters.
pub(crate) fn ensure_word(component: &'static str, value: &str) -> Result<(), SignerError> {
	let Some(digits) = value.strip_prefix("0x") else {
		return Err(SignerError::InvalidSignature(format!(
			"{} must start with 0x: {}",
			component, value
		)));
	};
	if digits.len() != oracle_types::WORD_HEX_LEN {
		return Err(SignerError::PaddingAnomaly {
			component,
			length: digits.len(),
		});
	}
	if !oracle_types::is_word_hex(value) {
		return Err(SignerError::InvalidSignature(format!(
			"{} is not hex: {}",
			component, value
		)));
	}
	Ok(())
}
