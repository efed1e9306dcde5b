use std::fmt;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token signing settings, built once at startup.
///
/// `Debug` redacts the secret.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub token_lifetime: Duration,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, algorithm: Algorithm, token_lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            token_lifetime,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `WeakSecret` - Signing secret shorter than 32 bytes
    /// * `UnsupportedAlgorithm` - Non-HMAC algorithm configured
    pub fn new(config: &AuthConfig) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(config.secret.as_bytes(), config.algorithm)?,
            token_lifetime: config.token_lifetime,
        })
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a bearer token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(AuthenticationResult {
            access_token: self.issue_token(subject)?,
            token_type: "bearer",
        })
    }

    /// Issue a token with the configured lifetime.
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.token_lifetime)
    }

    /// Validate a token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator(lifetime: Duration) -> Authenticator {
        let config = AuthConfig::new(
            "test_secret_key_at_least_32_bytes!",
            Algorithm::HS256,
            lifetime,
        );
        Authenticator::new(&config).expect("Failed to create authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator(Duration::minutes(30));

        let hash = authenticator
            .hash_password("secret1")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("secret1", &hash, "alice")
            .expect("Authentication failed");

        assert_eq!(result.token_type, "bearer");
        let subject = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator(Duration::minutes(30));
        let hash = authenticator.hash_password("secret1").unwrap();

        let result = authenticator.authenticate("wrong", &hash, "alice");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_zero_lifetime_token_fails_validation() {
        let authenticator = authenticator(Duration::zero());
        let token = authenticator.issue_token("alice").unwrap();

        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_weak_secret_is_rejected() {
        let config = AuthConfig::new("short", Algorithm::HS256, Duration::minutes(30));
        assert!(matches!(
            Authenticator::new(&config),
            Err(JwtError::WeakSecret { .. })
        ));
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = AuthConfig::new(
            "test_secret_key_at_least_32_bytes!",
            Algorithm::HS256,
            Duration::minutes(30),
        );
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("test_secret_key"));
        assert!(rendered.contains("<redacted>"));
    }
}
