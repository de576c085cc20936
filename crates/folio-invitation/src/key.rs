// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invitation keys.
//!
//! The plaintext key only ever appears in the reply URLs sent to the
//! invitee. The database stores its SHA-256 hash.

/// Number of random bytes in an invitation key (48 hex characters).
pub const INVITATION_KEY_BYTES: usize = 24;

/// Generate a new invitation key.
///
/// Returns a tuple of (plaintext_key, sha256_hash).
pub fn generate_invitation_key() -> (String, String) {
	use rand::Rng;
	let mut rng = rand::thread_rng();
	let bytes: [u8; INVITATION_KEY_BYTES] = rng.gen();
	let key = hex::encode(bytes);
	let hash = hash_invitation_key(&key);
	(key, hash)
}

/// Hash an invitation key using SHA-256.
pub fn hash_invitation_key(key: &str) -> String {
	use sha2::{Digest, Sha256};
	let mut hasher = Sha256::new();
	hasher.update(key.as_bytes());
	hex::encode(hasher.finalize())
}

/// Verify a plaintext key against its stored hash.
pub fn verify_invitation_key(key: &str, hash: &str) -> bool {
	hash_invitation_key(key) == hash
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashSet;

	#[test]
	fn generates_key_with_correct_length() {
		let (key, _hash) = generate_invitation_key();
		assert_eq!(key.len(), INVITATION_KEY_BYTES * 2);
		assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
	}

	#[test]
	fn generates_unique_keys() {
		let keys: HashSet<_> = (0..100).map(|_| generate_invitation_key().0).collect();
		assert_eq!(keys.len(), 100);
	}

	#[test]
	fn generated_key_verifies_against_hash() {
		let (key, hash) = generate_invitation_key();
		assert!(verify_invitation_key(&key, &hash));
		assert!(!verify_invitation_key("not-the-key", &hash));
	}

	#[test]
	fn hash_is_hex_sha256() {
		let hash = hash_invitation_key("abc");
		assert_eq!(
			hash,
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
	}

	proptest! {
		#[test]
		fn hash_never_equals_key(key in "[0-9a-f]{48}") {
			let hash = hash_invitation_key(&key);
			prop_assert_ne!(&hash, &key);
			prop_assert_eq!(hash.len(), 64);
		}
	}
}
