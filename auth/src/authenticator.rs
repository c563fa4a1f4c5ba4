use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::SessionClaims;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication errors surfaced to the web layer.
///
/// A stored hash that cannot be parsed collapses into `InvalidCredentials`:
/// a broken hash must read as a failed sign-in, never a successful one.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Coordinates password verification and session token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

impl Authenticator {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(secret),
        }
    }

    /// Hash a password for storage (used by seeds and fixtures).
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and, on success, issue a session token for the
    /// subject.
    ///
    /// # Errors
    /// * `InvalidCredentials` - wrong password or unreadable stored hash
    /// * `Token` - token issuance failed
    pub fn sign_in(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self
            .password_hasher
            .verify(password, stored_hash)
            .unwrap_or(false);

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_service.issue(subject)?)
    }

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    /// * `Token` - expired, tampered, or malformed token
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_service.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_sign_in_issues_verifiable_token() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator
            .hash_password("hunter2")
            .expect("Failed to hash password");

        let token = authenticator
            .sign_in("hunter2", &hash, "user-1")
            .expect("Sign in failed");

        let claims = authenticator
            .verify_token(&token)
            .expect("Token verification failed");
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn test_sign_in_rejects_wrong_password() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator
            .hash_password("hunter2")
            .expect("Failed to hash password");

        let result = authenticator.sign_in("wrong", &hash, "user-1");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_sign_in_treats_broken_hash_as_invalid_credentials() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.sign_in("hunter2", "garbage", "user-1");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let authenticator = Authenticator::new(SECRET);

        assert!(authenticator.verify_token("garbage.token.here").is_err());
    }
}
