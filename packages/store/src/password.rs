//! Password hashing for user credentials
//!
//! Argon2id with a random per-credential salt, producing PHC-format hash
//! strings. The repositories hash on the way in (registration, password
//! change) so a plaintext credential never reaches storage.

use argon2::{
    password_hash::{rand_core::OsRng, Error as HashError, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

use crate::error::{StoreError, StoreResult};

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Credential(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// Returns `Ok(false)` on a mismatch; any other failure (a malformed stored
/// hash, for instance) is a [`StoreError::Credential`].
pub fn verify_password(password: &str, hash: &str) -> StoreResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| StoreError::Credential(format!("stored hash is invalid: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(StoreError::Credential(format!(
            "password verification failed: {}",
            e
        ))),
    }
}
