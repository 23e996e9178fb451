//! Main entry point for the token-swap oracle.
//!
//! The oracle signs authorizations that let an address swap legacy tokens
//! for new tokens through the swap contract. It can run as an HTTP service
//! or be driven one command at a time from deployment scripts.

use clap::{Parser, Subcommand};
use oracle_config::Config;
use oracle_signer::AddressSigner;
use oracle_types::SecretString;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod commands;
mod server;

/// Command-line arguments for the oracle.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "ORACLE_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign a swap authorization for an address with the configured key
	Sign {
		#[arg(long)]
		address: String,
	},
	/// Read a private key from stdin and print its address
	Address,
	/// Print the packed hash of an address
	Hash {
		#[arg(long)]
		address: String,
	},
	/// Recover the signer of a hash from a split signature
	Recover {
		#[arg(long)]
		hash: String,
		#[arg(long)]
		v: String,
		#[arg(long)]
		r: String,
		#[arg(long)]
		s: String,
		/// Fail unless the recovered signer is this address
		#[arg(long)]
		expected: Option<String>,
	},
	/// Run the HTTP API
	Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	// Logs go to stderr so command output on stdout stays parseable.
	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	match args.command {
		Command::Sign { address } => {
			let config = load_config(&args.config).await?;
			print_json(&commands::sign(&config, &address)?)?;
		},
		Command::Address => {
			let mut raw = String::new();
			std::io::stdin().read_to_string(&mut raw)?;
			let address = commands::derive_address(SecretString::new(raw))?;
			println!("{}", address);
		},
		Command::Hash { address } => {
			print_json(&commands::hash(&address)?)?;
		},
		Command::Recover {
			hash,
			v,
			r,
			s,
			expected,
		} => {
			let address = commands::recover(&hash, &v, &r, &s, expected.as_deref())?;
			println!("{}", address);
		},
		Command::Serve => {
			let config = load_config(&args.config).await?;
			serve(config).await?;
		},
	}

	Ok(())
}

async fn load_config(path: &std::path::Path) -> Result<Config, Box<dyn std::error::Error>> {
	let path = path
		.to_str()
		.ok_or_else(|| format!("Config path is not valid UTF-8: {}", path.display()))?;
	let config = Config::from_file(path).await?;
	tracing::info!("Loaded configuration [{}]", config.oracle.id);
	Ok(config)
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
	let api_config = match config.api.clone() {
		Some(api) if api.enabled => api,
		_ => return Err("API server is not enabled in configuration".into()),
	};

	let signer = AddressSigner::from_private_key(&config.signer.private_key)?;
	tracing::info!("Started oracle {} as {}", config.oracle.id, signer.address());

	let state = server::AppState {
		signer: Arc::new(signer),
		swap_budget: config.swap_budget(),
	};
	server::start_server(api_config, state).await?;

	tracing::info!("Stopped oracle");
	Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
