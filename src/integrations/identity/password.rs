// src/integrations/identity/password.rs
//
// Argon2id password hashing. Stored hashes are PHC strings, so the
// algorithm parameters and the salt travel with the digest.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::warn;

use crate::error::{AppError, AppResult};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Other(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a mismatch. A stored hash that cannot be parsed or
/// verified is reported as `AppError::Auth`, same as a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        warn!("Stored password hash is unreadable: {}", e);
        AppError::Auth
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            warn!("Password verification failed: {}", e);
            Err(AppError::Auth)
        }
    }
}
