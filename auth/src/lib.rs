//! Authentication library for the todo service.
//!
//! Provides the credential and session primitives the web layer builds on:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-limited session tokens (HS256 JWT)
//! - An `Authenticator` coordinating both for the sign-in flow
//!
//! Sessions are stateless: the token alone proves who the bearer is, so no
//! server-side session store exists. The tradeoff is that a token cannot be
//! revoked before it expires.
//!
//! # Examples
//!
//! ```
//! use auth::Authenticator;
//!
//! let authenticator = Authenticator::new(b"a_secret_key_of_at_least_32_bytes!!");
//!
//! let hash = authenticator.hash_password("hunter2").unwrap();
//! let token = authenticator.sign_in("hunter2", &hash, "user-1").unwrap();
//!
//! let claims = authenticator.verify_token(&token).unwrap();
//! assert_eq!(claims.sub, "user-1");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SessionClaims;
pub use token::TokenError;
pub use token::TokenService;
