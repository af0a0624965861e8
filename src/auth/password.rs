//! Password hashing
//!
//! Argon2id with a fresh random salt per password; hashes are stored in PHC
//! string format.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::ApiError;

/// Hash a password for storage
pub fn hash(password: &str) -> Result<String, ApiError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| {
        tracing::error!(error = %e, "Failed to generate password salt");
        ApiError::internal("Failed to process credentials")
    })?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode password salt");
        ApiError::internal("Failed to process credentials")
    })?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            ApiError::internal("Failed to process credentials")
        })?
        .to_string();

    Ok(phc)
}

/// Check a password against a stored PHC hash string
///
/// An unparseable stored hash counts as a failed verification, not an error.
pub fn verify(stored_hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(stored_hash) {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    } else {
        false
    }
}
