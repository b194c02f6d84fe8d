use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Hash of a random throwaway password, checked against when the login
    /// email matches no user.
    static ref DUMMY_HASH: Option<String> = {
        let throwaway = SaltString::generate(&mut OsRng);
        hash_password(throwaway.as_str()).ok()
    };
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Runs one verification against a throwaway hash so a lookup miss costs
/// about as much as a password check. Always reports no match.
pub fn burn_hash(plain: &str) -> bool {
    match DUMMY_HASH.as_deref() {
        Some(hash) => {
            let _ = verify_password(plain, hash);
        }
        None => {
            let _ = hash_password(plain);
        }
    }
    false
}
