// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Password hashing and verification.
//!
//! Explicit, pure functions invoked by the registration and login
//! orchestration. Digests use Argon2id in PHC string format with a random
//! per-password salt.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Error type for hashing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HashError {
    /// Hashing failed
    HashFailed(String),
}

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::HashFailed(msg) => write!(f, "Hash failed: {msg}"),
        }
    }
}

impl std::error::Error for HashError {}

/// Hash a plaintext secret for storage.
///
/// # Errors
///
/// Returns an error if hashing fails (should not happen in normal operation).
pub fn hash_secret(plaintext: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError::HashFailed(e.to_string()))
}

/// Verify a candidate secret against a stored digest.
///
/// Returns `false` for a mismatch or an unparseable digest; the caller does
/// not learn which.
pub fn verify_secret(candidate: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .is_ok()
}
