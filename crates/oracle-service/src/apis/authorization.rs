//! Swap authorization and signature recovery endpoints.

use super::api_error;
use alloy_primitives::U256;
use oracle_signer::{parse_address, parse_hash, recover_address, AddressSigner, SignatureParts};
use oracle_types::{
	APIError, AddressResponse, AuthorizationRequest, AuthorizationResponse, RecoverRequest,
};

/// Signs an authorization for the requested address.
///
/// When both an amount and a swap budget are known, the amount is checked
/// before signing.
pub fn process_authorization(
	request: AuthorizationRequest,
	signer: &AddressSigner,
	swap_budget: Option<U256>,
) -> Result<AuthorizationResponse, APIError> {
	let address = parse_address(&request.address).map_err(api_error)?;
	let signed = signer
		.authorize(&request.address, request.amount, swap_budget)
		.map_err(api_error)?;

	tracing::info!(target_address = %address, "Issued swap authorization");

	Ok(AuthorizationResponse {
		signer: signer.address(),
		address,
		amount: request.amount,
		signed,
	})
}

/// Recovers the signer of a hash from its split signature.
pub fn process_recover(request: RecoverRequest) -> Result<AddressResponse, APIError> {
	let hash = parse_hash(&request.hash).map_err(api_error)?;
	let parts = SignatureParts::parse(&request.v, &request.r, &request.s).map_err(api_error)?;
	let address = recover_address(&hash, &parts).map_err(api_error)?;
	Ok(AddressResponse { address })
}

#[cfg(test)]
mod tests {
	use super::*;
	use oracle_types::SecretString;

	const KEY: &str = "0x39cc67e7dbf2c162095bfc058f4b7ba2f9aa7ec006f9e28dc438c07662a3bb41";
	const SWAPPER: &str = "0x168767eeb7b63A49F1D1E213FF354A6a934a93b0";

	fn signer() -> AddressSigner {
		AddressSigner::from_private_key(&SecretString::from(KEY)).unwrap()
	}

	#[test]
	fn test_authorization_round_trips_through_recover() {
		let signer = signer();
		let response = process_authorization(
			AuthorizationRequest {
				address: SWAPPER.to_string(),
				amount: None,
			},
			&signer,
			None,
		)
		.unwrap();

		let recovered = process_recover(RecoverRequest {
			hash: response.signed.hash.clone(),
			v: response.signed.v.clone(),
			r: response.signed.r.clone(),
			s: response.signed.s.clone(),
		})
		.unwrap();

		assert_eq!(recovered.address, signer.address());
		assert_eq!(response.signer, signer.address());
	}

	#[test]
	fn test_budget_exceeded_is_unprocessable() {
		let err = process_authorization(
			AuthorizationRequest {
				address: SWAPPER.to_string(),
				amount: Some(U256::from(1_000u64)),
			},
			&signer(),
			Some(U256::from(900u64)),
		)
		.unwrap_err();

		assert_eq!(err.status_code(), 422);
		assert_eq!(err.to_error_response().error, "BUDGET_EXCEEDED");
	}

	#[test]
	fn test_malformed_address_is_bad_request() {
		let err = process_authorization(
			AuthorizationRequest {
				address: "0x1234".to_string(),
				amount: None,
			},
			&signer(),
			None,
		)
		.unwrap_err();

		assert_eq!(err.status_code(), 400);
		assert_eq!(err.to_error_response().error, "INVALID_ADDRESS");
	}

	#[test]
	fn test_recover_rejects_short_word() {
		let err = process_recover(RecoverRequest {
			hash: format!("0x{}", "ab".repeat(32)),
			v: "0x1b".to_string(),
			r: format!("0x{}", "11".repeat(31)),
			s: format!("0x{}", "11".repeat(32)),
		})
		.unwrap_err();

		assert_eq!(err.to_error_response().error, "PADDING_ANOMALY");
	}
}
