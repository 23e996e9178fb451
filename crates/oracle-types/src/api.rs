//! API types for the oracle HTTP API.
//!
//! Request and response bodies for the authorization, recovery and signer
//! endpoints, plus the structured error type the handlers return.

use crate::SignedAddress;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request for a swap authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRequest {
	/// Address allowed to perform the swap, `0x` + 40 hex characters.
	pub address: String,
	/// Optional amount of legacy tokens to swap, checked against the budget.
	#[serde(default, with = "u256_serde::option")]
	pub amount: Option<U256>,
}

/// A signed swap authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationResponse {
	/// Address of the oracle key that produced the signature.
	pub signer: Address,
	/// Address being authorized.
	pub address: Address,
	/// Amount checked against the budget, if one was requested.
	#[serde(default, with = "u256_serde::option")]
	pub amount: Option<U256>,
	/// The signed authorization.
	#[serde(flatten)]
	pub signed: SignedAddress,
}

/// Request to recover a signer from a hash and split signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverRequest {
	pub hash: String,
	pub v: String,
	pub r: String,
	pub s: String,
}

/// Response carrying a single address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
	pub address: Address,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code
	pub error: String,
	/// Human-readable description
	pub message: String,
	/// Additional error context
	pub details: Option<serde_json::Value>,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum APIError {
	/// Malformed input (400)
	BadRequest {
		error_type: String,
		message: String,
		details: Option<serde_json::Value>,
	},
	/// Well-formed request the oracle refuses to sign (422)
	UnprocessableEntity {
		error_type: String,
		message: String,
		details: Option<serde_json::Value>,
	},
	/// Internal server error (500)
	InternalServerError { error_type: String, message: String },
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			APIError::BadRequest { .. } => 400,
			APIError::UnprocessableEntity { .. } => 422,
			APIError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		match self {
			APIError::BadRequest {
				error_type,
				message,
				details,
			}
			| APIError::UnprocessableEntity {
				error_type,
				message,
				details,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
				details: details.clone(),
			},
			APIError::InternalServerError {
				error_type,
				message,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
				details: None,
			},
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			APIError::BadRequest { message, .. } => write!(f, "Bad Request: {}", message),
			APIError::UnprocessableEntity { message, .. } => {
				write!(f, "Unprocessable Entity: {}", message)
			},
			APIError::InternalServerError { message, .. } => {
				write!(f, "Internal Server Error: {}", message)
			},
		}
	}
}

impl std::error::Error for APIError {}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for APIError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.to_error_response())).into_response()
	}
}

/// Serde module for decimal U256 strings.
pub mod u256_serde {
	use alloy_primitives::U256;
	use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		value.to_string().serialize(serializer)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		U256::from_str_radix(&s, 10).map_err(D::Error::custom)
	}

	/// Same encoding for optional fields.
	pub mod option {
		use alloy_primitives::U256;
		use serde::{de::Error, Deserialize, Deserializer, Serializer};

		pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			match value {
				Some(v) => serializer.serialize_some(&v.to_string()),
				None => serializer.serialize_none(),
			}
		}

		pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
		where
			D: Deserializer<'de>,
		{
			Option::<String>::deserialize(deserializer)?
				.map(|s| U256::from_str_radix(&s, 10).map_err(D::Error::custom))
				.transpose()
		}
	}
}
