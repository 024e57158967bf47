//! Admin password hashing.
//!
//! The panel has a single shared password. Only its argon2id PHC string is
//! configured (`ADMIN_PASSWORD_HASH`); `fino-cli admin hash-password`
//! produces one.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum password length accepted when hashing.
pub const MIN_PASSWORD_LENGTH: usize = 12;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
    #[error("failed to hash password")]
    Hash,
    #[error("not a valid PHC password hash")]
    InvalidHash,
}

/// Hash a password using Argon2id with a random salt.
///
/// # Errors
///
/// Returns `PasswordError::TooShort` for short passwords, or
/// `PasswordError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Check that a configured hash parses as a PHC string.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if it does not.
pub fn check_hash(hash: &SecretString) -> Result<(), PasswordError> {
    PasswordHash::new(hash.expose_secret())
        .map(|_| ())
        .map_err(|_| PasswordError::InvalidHash)
}

/// Verify a login attempt against the configured hash.
#[must_use]
pub fn verify_password(password: &str, hash: &SecretString) -> bool {
    let Ok(parsed) = PasswordHash::new(hash.expose_secret()) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
