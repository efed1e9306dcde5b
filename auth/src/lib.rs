//! Authentication utilities library
//!
//! - Password hashing (Argon2id, salted, constant-time verify)
//! - Bearer token issuance and verification (HMAC-signed JWT with `sub`, `iat`, `exp`)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Login flow
//! ```
//! use auth::{AuthConfig, Authenticator, Algorithm};
//! use chrono::Duration;
//!
//! let config = AuthConfig::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(30),
//! );
//! let auth = Authenticator::new(&config).unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let result = auth.authenticate("password123", &hash, "alice").unwrap();
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthConfig;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
