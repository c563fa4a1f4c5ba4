use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// How long an issued session token remains valid.
pub const SESSION_VALIDITY_HOURS: i64 = 12;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to issue token: {0}")]
    IssueFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Claims carried by a session token.
///
/// `sub` is the authenticated user id; it is immutable once issued and only
/// a fresh sign-in produces a token with a different subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Tokens are HS256 JWTs with a fixed validity window counted from
/// issuance. Verification uses zero clock leeway so the expiry boundary is
/// exact.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl TokenService {
    /// Create a token service with the default 12 hour validity window.
    ///
    /// The secret should be at least 32 bytes and never live in source.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_validity(secret, Duration::hours(SESSION_VALIDITY_HOURS))
    }

    /// Create a token service with an explicit validity window.
    pub fn with_validity(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validity,
        }
    }

    /// Issue a signed token for a subject, expiring after the validity
    /// window.
    ///
    /// # Errors
    /// * `IssueFailed` - token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `Expired` - the token's expiry has passed
    /// * `Invalid` - bad signature, malformed token, or missing claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new(SECRET);

        let token = service.issue("user-1").expect("Failed to issue token");
        let claims = service.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp - claims.iat, SESSION_VALIDITY_HOURS * 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = TokenService::new(SECRET);
        let verifier = TokenService::new(b"another_secret_key_of_32_bytes!!!");

        let token = issuer.issue("user-1").expect("Failed to issue token");

        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_malformed_token() {
        let service = TokenService::new(SECRET);

        assert!(matches!(
            service.verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = TokenService::with_validity(SECRET, Duration::seconds(-1));

        let token = service.issue("user-1").expect("Failed to issue token");

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_accepts_token_within_window() {
        let service = TokenService::with_validity(SECRET, Duration::seconds(5));

        let token = service.issue("user-1").expect("Failed to issue token");

        assert!(service.verify(&token).is_ok());
    }
}
