//! Password and security-answer hashing.
//!
//! Both secrets are stored as argon2id PHC strings, so each carries its own salt and parameters.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Could not hash secret: {0}")]
    HashError(String),
    #[error("Stored hash is malformed: {0}")]
    MalformedHash(String),
}

pub fn hash_secret(secret: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Returns `Ok(true)` if `secret` matches the stored hash, `Ok(false)` if it does not, and an error if the stored
/// hash cannot be parsed.
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
}
