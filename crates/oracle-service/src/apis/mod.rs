//! Request processing for the oracle HTTP API.

pub mod authorization;

use axum::extract::rejection::JsonRejection;
use oracle_signer::SignerError;
use oracle_types::APIError;
use serde_json::json;

/// Maps a signer failure onto the HTTP error taxonomy.
///
/// Input problems are 400, refusals to sign are 422, and key or signing
/// failures are 500 with a generic message.
pub fn api_error(err: SignerError) -> APIError {
	let message = err.to_string();
	match err {
		SignerError::InvalidAddress(_) => bad_request("INVALID_ADDRESS", message),
		SignerError::InvalidAmount(_) => bad_request("INVALID_AMOUNT", message),
		SignerError::InvalidSignature(_) => bad_request("INVALID_SIGNATURE", message),
		SignerError::PaddingAnomaly { .. } => bad_request("PADDING_ANOMALY", message),
		SignerError::BudgetExceeded {
			requested,
			remaining,
		} => APIError::UnprocessableEntity {
			error_type: "BUDGET_EXCEEDED".to_string(),
			message,
			details: Some(json!({
				"requested": requested.to_string(),
				"remaining": remaining.to_string(),
			})),
		},
		SignerError::RecoveryMismatch { .. } => APIError::UnprocessableEntity {
			error_type: "RECOVERY_MISMATCH".to_string(),
			message,
			details: None,
		},
		SignerError::InvalidKey(_) | SignerError::SigningFailed(_) => {
			tracing::error!("Signer failure: {}", message);
			APIError::InternalServerError {
				error_type: "SIGNING_FAILED".to_string(),
				message: "Unable to sign authorization".to_string(),
			}
		},
	}
}

/// Maps an undecodable JSON body onto a 400 with the usual error body.
pub fn rejection_error(rejection: JsonRejection) -> APIError {
	bad_request("INVALID_REQUEST", rejection.body_text())
}

fn bad_request(error_type: &str, message: String) -> APIError {
	APIError::BadRequest {
		error_type: error_type.to_string(),
		message,
		details: None,
	}
}
