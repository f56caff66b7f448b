use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::LazyLock;

use crate::error::PortagenError;

static CONTEXT: LazyLock<Argon2<'static>> = LazyLock::new(|| {
    Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::DEFAULT,
    )
});

pub fn hash(password: &str) -> Result<String, PortagenError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = CONTEXT
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PortagenError::PasswordHash(e.to_string()))?;
    Ok(password_hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify(password: &str, hash: &str) -> Result<bool, PortagenError> {
    let hash = PasswordHash::new(hash).map_err(|e| PortagenError::PasswordHash(e.to_string()))?;
    match CONTEXT.verify_password(password.as_bytes(), &hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PortagenError::PasswordHash(e.to_string())),
    }
}

/// Hashing is CPU-bound; keep it off the async workers.
pub async fn hash_blocking(password: String) -> Result<String, PortagenError> {
    tokio::task::spawn_blocking(move || hash(&password)).await?
}

pub async fn verify_blocking(password: String, hash: String) -> Result<bool, PortagenError> {
    tokio::task::spawn_blocking(move || verify(&password, &hash)).await?
}
