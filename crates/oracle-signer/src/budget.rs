//! Swap budget check.
//!
//! The swap contract only releases new tokens up to its remaining budget
//! (`getTokensLeftToSwap`). The oracle refuses to sign for amounts the
//! contract could not honour.

use crate::SignerError;
use alloy_primitives::U256;

/// Rejects a zero swap amount.
pub fn check_amount(requested: U256) -> Result<(), SignerError> {
	if requested.is_zero() {
		return Err(SignerError::InvalidAmount(
			"swap amount must be greater than zero".into(),
		));
	}
	Ok(())
}

/// Checks that `requested` is positive and within `remaining`.
pub fn check_budget(requested: U256, remaining: U256) -> Result<(), SignerError> {
	check_amount(requested)?;
	if requested > remaining {
		return Err(SignerError::BudgetExceeded {
			requested,
			remaining,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_within_budget() {
		// 900 tokens with 18 decimals.
		let budget = U256::from(900u64) * U256::from(10u64).pow(U256::from(18u64));
		assert!(check_budget(budget, budget).is_ok());
		assert!(check_budget(U256::from(1u64), budget).is_ok());
	}

	#[test]
	fn test_over_budget() {
		let err = check_budget(U256::from(901u64), U256::from(900u64)).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Requested 901 exceeds remaining swap budget 900"
		);
	}

	#[test]
	fn test_zero_amount() {
		assert!(matches!(
			check_budget(U256::ZERO, U256::from(900u64)),
			Err(SignerError::InvalidAmount(_))
		));
	}

	#[test]
	fn test_exhausted_budget() {
		assert!(matches!(
			check_budget(U256::from(1u64), U256::ZERO),
			Err(SignerError::BudgetExceeded { .. })
		));
	}
}
