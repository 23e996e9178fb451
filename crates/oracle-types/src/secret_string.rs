//! Redacted, zeroizing holder for the oracle signing key.
//!
//! The signing key authorizes token swaps, so it must never reach logs,
//! debug output, or serialized API responses. `SecretString` wipes its
//! buffer on drop and prints as `***REDACTED***` everywhere.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

const REDACTED: &str = "***REDACTED***";

/// A string that zeroes its memory on drop and never displays its contents.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Wraps an owned string.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret as a string slice.
	///
	/// Callers must not log or persist the returned value.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	/// Runs `f` with the exposed secret, keeping the exposure scoped.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}

	/// Returns a copy with surrounding whitespace removed and a `0x` prefix.
	///
	/// Keys are commonly stored as bare hex in env files.
	pub fn with_0x_prefix(&self) -> Self {
		self.with_exposed(|s| Self::new(crate::with_0x_prefix(s.trim())))
	}

	/// Returns the length of the secret.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the secret is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString({})", REDACTED)
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for SecretString {}

// Serializing always redacts; the key is only ever read in, never written out.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KEY: &str = "0x39cc67e7dbf2c162095bfc058f4b7ba2f9aa7ec006f9e28dc438c07662a3bb41";

	#[test]
	fn test_debug_and_display_redact() {
		let secret = SecretString::from(KEY);
		let debug_str = format!("{:?}", secret);
		let display_str = format!("{}", secret);

		assert_eq!(debug_str, "SecretString(***REDACTED***)");
		assert_eq!(display_str, "***REDACTED***");
		assert!(!debug_str.contains("39cc67"));
		assert!(!display_str.contains("39cc67"));
	}

	#[test]
	fn test_serialize_redacts() {
		let secret = SecretString::from(KEY);
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, "\"***REDACTED***\"");
	}

	#[test]
	fn test_deserialize_keeps_value() {
		let secret: SecretString = serde_json::from_str(&format!("\"{}\"", KEY)).unwrap();
		assert_eq!(secret.expose_secret(), KEY);
	}

	#[test]
	fn test_with_0x_prefix_normalizes_bare_hex() {
		let bare = SecretString::from(&format!("  {}\n", &KEY[2..])[..]);
		assert_eq!(bare.with_0x_prefix().expose_secret(), KEY);

		let prefixed = SecretString::from(KEY);
		assert_eq!(prefixed.with_0x_prefix(), prefixed);
	}

	#[test]
	fn test_with_exposed() {
		let secret = SecretString::from(KEY);
		let len = secret.with_exposed(|s| s.len());
		assert_eq!(len, 66);
		assert_eq!(secret.len(), 66);
		assert!(!secret.is_empty());
	}
}
