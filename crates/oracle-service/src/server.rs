//! HTTP server for the oracle API.
//!
//! Exposes swap authorization signing, signer lookup and signature
//! recovery under `/api`.

use crate::apis::authorization::{process_authorization, process_recover};
use crate::apis::rejection_error;
use alloy_primitives::U256;
use axum::{
	extract::{rejection::JsonRejection, State},
	http::HeaderValue,
	response::Json,
	routing::{get, post},
	Router,
};
use oracle_config::ApiConfig;
use oracle_signer::AddressSigner;
use oracle_types::{
	APIError, AddressResponse, AuthorizationRequest, AuthorizationResponse, RecoverRequest,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Signer holding the oracle key.
	pub signer: Arc<AddressSigner>,
	/// Remaining swap budget, if configured.
	pub swap_budget: Option<U256>,
}

/// Builds the API router over the given state.
pub fn router(state: AppState, api_config: &ApiConfig) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/authorizations", post(handle_authorization))
				.route("/signer", get(handle_signer))
				.route("/recover", post(handle_recover)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(
					api_config.timeout_seconds,
				)))
				.layer(cors_layer(api_config)),
		)
		.with_state(state)
}

/// Starts the HTTP server and serves until the listener fails.
pub async fn start_server(
	api_config: ApiConfig,
	state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(state, &api_config);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Oracle API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

fn cors_layer(api_config: &ApiConfig) -> CorsLayer {
	let Some(cors) = &api_config.cors else {
		return CorsLayer::permissive();
	};

	let origins: Vec<HeaderValue> = cors
		.allowed_origins
		.iter()
		.filter_map(|origin| match origin.parse() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!("Ignoring invalid CORS origin: {}", origin);
				None
			},
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods(Any)
		.allow_headers(Any)
}

/// Handles POST /api/authorizations requests.
async fn handle_authorization(
	State(state): State<AppState>,
	payload: Result<Json<AuthorizationRequest>, JsonRejection>,
) -> Result<Json<AuthorizationResponse>, APIError> {
	let Json(request) = payload.map_err(rejection_error)?;
	match process_authorization(request, &state.signer, state.swap_budget) {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Authorization request failed: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /api/signer requests.
async fn handle_signer(State(state): State<AppState>) -> Json<AddressResponse> {
	Json(AddressResponse {
		address: state.signer.address(),
	})
}

/// Handles POST /api/recover requests.
async fn handle_recover(
	payload: Result<Json<RecoverRequest>, JsonRejection>,
) -> Result<Json<AddressResponse>, APIError> {
	let Json(request) = payload.map_err(rejection_error)?;
	process_recover(request).map(Json)
}
