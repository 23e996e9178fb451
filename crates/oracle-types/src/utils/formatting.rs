//! Hex string formatting helpers.
//!
//! Addresses, hashes and signature words cross the API boundary as `0x`
//! prefixed hex strings. These helpers keep the prefix handling and the
//! fixed-width word rendering in one place.

use alloy_primitives::U256;

/// Number of hex characters in a 32-byte word.
pub const WORD_HEX_LEN: usize = 64;

/// Adds "0x" prefix to a hex string if it doesn't already have one.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Removes "0x" or "0X" prefix from a hex string if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Renders a 256-bit integer as a `0x` prefixed, zero-padded 32-byte word.
pub fn word_to_hex(value: &U256) -> String {
	format!("0x{}", hex::encode(value.to_be_bytes::<32>()))
}

/// Returns true if `hex_str` is exactly one 32-byte word of hex digits,
/// with or without a `0x` prefix.
pub fn is_word_hex(hex_str: &str) -> bool {
	let digits = without_0x_prefix(hex_str);
	digits.len() == WORD_HEX_LEN && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Renders a recovery id as the one-byte hex string used by on-chain
/// verifiers (`0x1b` or `0x1c`).
pub fn recovery_id_to_hex(v: u8) -> String {
	format!("0x{:02x}", v)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_prefix_helpers() {
		assert_eq!(with_0x_prefix("abcd"), "0xabcd");
		assert_eq!(with_0x_prefix("0xabcd"), "0xabcd");
		assert_eq!(with_0x_prefix("0Xabcd"), "0Xabcd");
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("0Xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}

	#[test]
	fn test_word_to_hex_keeps_leading_zeros() {
		let small = U256::from(0x1234u64);
		let rendered = word_to_hex(&small);
		assert_eq!(rendered.len(), 2 + WORD_HEX_LEN);
		assert!(rendered.ends_with("1234"));
		assert!(rendered.starts_with("0x0000"));
		assert!(is_word_hex(&rendered));
	}

	#[test]
	fn test_is_word_hex_rejects_short_and_non_hex() {
		assert!(!is_word_hex("0x1234"));
		assert!(!is_word_hex(&format!("0x{}", "g".repeat(64))));
		assert!(is_word_hex(&"a".repeat(64)));
	}

	#[test]
	fn test_recovery_id_to_hex() {
		assert_eq!(recovery_id_to_hex(27), "0x1b");
		assert_eq!(recovery_id_to_hex(28), "0x1c");
	}
}
