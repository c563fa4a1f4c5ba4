use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Argon2id password hasher.
///
/// Stored hashes use the PHC string format, which carries the algorithm,
/// parameters, and salt alongside the digest. Comparison is constant-time,
/// delegated to the `argon2` crate.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - the hashing operation itself failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a candidate password against a stored PHC-format hash.
    ///
    /// Returns `Ok(false)` for a wrong password. A stored hash that cannot
    /// be parsed is an error; callers must treat that as a failed
    /// verification, never as a match.
    ///
    /// # Errors
    /// * `VerificationFailed` - the stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_correct_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret").expect("Failed to hash password");

        assert!(hasher.verify("secret", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret").expect("Failed to hash password");

        assert!(!hasher.verify("wrong", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_verify_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("secret", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("secret").expect("Failed to hash password");
        let second = hasher.hash("secret").expect("Failed to hash password");
        assert_ne!(first, second);
    }
}
