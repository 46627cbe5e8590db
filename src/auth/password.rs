use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

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

/// Sign-up password policy: at least 8 characters, one digit and one special
/// character.
pub fn validate_strength(plain: &str) -> Result<(), &'static str> {
    if plain.is_empty() {
        return Err("Password is required");
    }
    if plain.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    let has_digit = plain.chars().any(|c| c.is_ascii_digit());
    let has_special = plain.chars().any(|c| SPECIAL_CHARS.contains(c));
    if !has_digit || !has_special {
        return Err("Password must contain at least one number and one special character");
    }
    Ok(())
}
