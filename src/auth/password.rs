// src/auth/password.rs
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::ServerError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Password policy: length floor plus at least one letter and one digit.
pub fn validate_policy(password: &str) -> Result<(), ServerError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServerError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(ServerError::Validation(
            "password must contain at least one letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ServerError::Validation(
            "password must contain at least one digit".into(),
        ));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServerError::DbError(format!("password hash failed: {e}")))
}

pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, ServerError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ServerError::DbError(format!("stored password hash invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_rejects_short_letterless_and_digitless() {
        assert!(validate_policy("a1").is_err());
        assert!(validate_policy("12345678").is_err());
        assert!(validate_policy("abcdefgh").is_err());
        assert!(validate_policy("abcdefg1").is_ok());
    }

    #[test]
    fn hash_verifies_own_password_only() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password(&hash, "hunter2hunter2").unwrap());
        assert!(!verify_password(&hash, "hunter3hunter3").unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error_not_a_match() {
        assert!(verify_password("not-a-phc-string", "whatever1").is_err());
    }
}
