//! Utility functions shared across the oracle crates.

pub mod formatting;

pub use formatting::{
	is_word_hex, recovery_id_to_hex, with_0x_prefix, without_0x_prefix, word_to_hex,
	WORD_HEX_LEN,
};
