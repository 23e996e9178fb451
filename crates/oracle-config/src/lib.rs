//! Configuration for the token-swap oracle.
//!
//! Configuration is read from TOML. `${VAR}` and `${VAR:-default}` are
//! substituted from the environment before parsing, so the signing key can
//! live in a secrets file or the process environment rather than on disk
//! next to the config.
//!
//! ## Modular Configuration Support
//!
//! - Use `include = ["file1.toml", "file2.toml"]` to include other config files
//! - Each top-level section must be unique across all files (no duplicates allowed)

mod loader;

use alloy_primitives::U256;
use oracle_types::{is_word_hex, SecretString};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub use loader::ConfigLoader;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level oracle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Identity of this oracle instance.
	pub oracle: OracleConfig,
	/// Signing key configuration.
	pub signer: SignerConfig,
	/// Swap contract limits checked before signing.
	pub swap: Option<SwapConfig>,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Identity of this oracle instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
	/// Identifier used in logs.
	pub id: String,
}

/// Signing key configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignerConfig {
	/// Oracle private key, with or without `0x`. Normalized to `0x` on load.
	pub private_key: SecretString,
}

/// Swap contract limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwapConfig {
	/// Remaining amount of new tokens the swap may release, in base units.
	#[serde(with = "oracle_types::api::u256_serde")]
	pub budget: U256,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
	/// Request timeout in seconds.
	#[serde(default = "default_api_timeout")]
	pub timeout_seconds: u64,
	/// CORS configuration.
	pub cors: Option<CorsConfig>,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
	/// Allowed origins for CORS.
	pub allowed_origins: Vec<String>,
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	3000
}

fn default_api_timeout() -> u64 {
	30
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, following `include` directives.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let path_buf = Path::new(path);
		let base_dir = path_buf.parent().unwrap_or_else(|| Path::new("."));

		let mut loader = ConfigLoader::new(base_dir);
		let file_name = path_buf
			.file_name()
			.ok_or_else(|| ConfigError::Validation(format!("Invalid path: {}", path)))?;
		loader.load_config(file_name).await
	}

	/// Remaining swap budget, if configured.
	pub fn swap_budget(&self) -> Option<U256> {
		self.swap.as_ref().map(|swap| swap.budget)
	}

	/// Parses TOML whose environment variables are already resolved.
	pub(crate) fn from_resolved(resolved: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(resolved)?;
		config.normalize_and_validate()
	}

	/// Normalizes the key to `0x` form and validates every section.
	fn normalize_and_validate(mut self) -> Result<Self, ConfigError> {
		self.signer.private_key = self.signer.private_key.with_0x_prefix();
		self.validate()?;
		Ok(self)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.oracle.id.is_empty() {
			return Err(ConfigError::Validation("Oracle ID cannot be empty".into()));
		}

		// Never echo the key in these messages.
		let key = &self.signer.private_key;
		if key.expose_secret() == "0x" || key.is_empty() {
			return Err(ConfigError::Validation(
				"Signer private_key cannot be empty".into(),
			));
		}
		if !key.with_exposed(is_word_hex) {
			return Err(ConfigError::Validation(
				"Signer private_key must be 64 hex characters".into(),
			));
		}

		if let Some(ref api) = self.api {
			if api.enabled && api.port == 0 {
				return Err(ConfigError::Validation(
					"API port must be greater than 0".into(),
				));
			}
			if api.timeout_seconds == 0 {
				return Err(ConfigError::Validation(
					"API timeout_seconds must be greater than 0".into(),
				));
			}
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved and the result is normalized and
/// validated.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Config::from_resolved(&resolve_env_vars(s)?)
	}
}
