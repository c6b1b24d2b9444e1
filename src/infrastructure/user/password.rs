//! Deterministic password hashing
//!
//! The user store matches on `(email, hash)`, so the same plaintext must
//! always produce the same representation. Both hashers derive their salt
//! from the application-wide salt instead of generating one per password.

use argon2::{
    password_hash::{PasswordHasher as Argon2PasswordHasher, SaltString},
    Argon2,
};
use sha2::{Digest, Sha256};
use std::fmt::Debug;

use crate::domain::{HashingError, PasswordHasher};

/// Argon2id hasher with a salt derived from the application salt
#[derive(Clone)]
pub struct Argon2Hasher {
    salt: SaltString,
}

impl Argon2Hasher {
    /// Create a new Argon2 hasher
    pub fn new(app_salt: &str) -> Result<Self, HashingError> {
        let digest = Sha256::digest(app_salt.as_bytes());
        let salt = SaltString::encode_b64(&digest[..16])
            .map_err(|e| HashingError::new(format!("Invalid salt: {}", e)))?;

        Ok(Self { salt })
    }
}

impl Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("salt", &"[hidden]")
            .finish()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashingError> {
        Argon2::default()
            .hash_password(password.as_bytes(), &self.salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::new(e.to_string()))
    }
}

/// Salted SHA-256 hasher, hex encoded
#[derive(Clone)]
pub struct Sha256Hasher {
    salt: String,
}

impl Sha256Hasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl Debug for Sha256Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256Hasher")
            .field("salt", &"[hidden]")
            .finish()
    }
}

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String, HashingError> {
        let digest = Sha256::new()
            .chain_update(self.salt.as_bytes())
            .chain_update(password.as_bytes())
            .finalize();

        Ok(hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_is_deterministic() {
        let hasher = Argon2Hasher::new("app-salt").unwrap();

        let hash1 = hasher.hash("my_secure_password").unwrap();
        let hash2 = hasher.hash("my_secure_password").unwrap();

        assert_eq!(hash1, hash2);
        assert!(hash1.starts_with("$argon2id$"));
        assert!(!hash1.contains("my_secure_password"));
    }

    #[test]
    fn test_argon2_differs_by_password_and_salt() {
        let hasher = Argon2Hasher::new("app-salt").unwrap();
        let other_salt = Argon2Hasher::new("another-salt").unwrap();

        let hash = hasher.hash("password").unwrap();

        assert_ne!(hash, hasher.hash("password2").unwrap());
        assert_ne!(hash, other_salt.hash("password").unwrap());
    }

    #[test]
    fn test_argon2_accepts_empty_salt() {
        let hasher = Argon2Hasher::new("").unwrap();
        assert!(hasher.hash("password").is_ok());
    }

    #[test]
    fn test_sha256_is_deterministic_hex() {
        let hasher = Sha256Hasher::new("salt");

        let hash = hasher.hash("secret1").unwrap();

        assert_eq!(hash, hasher.hash("secret1").unwrap());
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, Sha256Hasher::new("pepper").hash("secret1").unwrap());
    }

    #[test]
    fn test_debug_hides_salt() {
        let debug = format!("{:?}", Sha256Hasher::new("very-private-salt"));
        assert!(!debug.contains("very-private-salt"));
    }
}
