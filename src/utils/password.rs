use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::AppResult;

/// Hash a password using Argon2id.
///
/// Each call draws a fresh random salt, so hashing the same password twice
/// yields different strings.
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2.hash_password(password.as_bytes())?.to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(argon2::password_hash::Error::from)?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_produces_phc_string() {
        let hash = hash_password("pw1").expect("Failed to hash password");

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("pw1").expect("Failed to hash password");

        assert!(verify_password("pw1", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("pw1").expect("Failed to hash password");

        assert!(!verify_password("pw2", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let hash1 = hash_password("pw1").unwrap();
        let hash2 = hash_password("pw1").unwrap();

        // Different salts produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("pw1", &hash1).unwrap());
        assert!(verify_password("pw1", &hash2).unwrap());
    }
}
