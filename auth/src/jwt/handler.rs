use std::str::FromStr;

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

use super::claims::Claims;
use super::errors::JwtError;

/// Shortest signing secret accepted.
///
/// Key material is measured in bytes here; configured secrets are measured
/// in characters, which never yields fewer bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Issues and verifies signed bearer tokens.
///
/// Only the HMAC family (HS256, HS384, HS512) is supported since the key
/// material is a shared secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - HMAC signing algorithm
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    /// * `UnsupportedAlgorithm` - Algorithm is not HS256, HS384 or HS512
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    /// Parse an algorithm name such as `"HS256"`.
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
        Algorithm::from_str(name).map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for `subject` valid for `lifetime`.
    pub fn issue(&self, subject: &str, lifetime: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject, lifetime))
    }

    /// Decode a token, checking signature and expiry.
    ///
    /// Expiry is checked with zero leeway: a token is accepted only while
    /// the current time is strictly before `exp`.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidToken` - Signature does not verify or algorithm mismatch
    /// * `DecodingFailed` - Token is malformed
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidToken(e.to_string())
                    }
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// Any `decode` error, or `MissingClaim` when `sub` is absent or empty.
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let claims = self.decode(token)?;

        claims
            .subject()
            .map(str::to_string)
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn handler() -> JwtHandler {
        JwtHandler::new(SECRET, Algorithm::HS256).expect("Failed to create handler")
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = handler();

        let token = handler
            .issue("alice", Duration::minutes(30))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_rejects_short_secret() {
        let result = JwtHandler::new(b"too-short", Algorithm::HS256);
        assert!(matches!(
            result,
            Err(JwtError::WeakSecret { min: 32, actual: 9 })
        ));
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let result = JwtHandler::new(SECRET, Algorithm::RS256);
        assert!(matches!(result, Err(JwtError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(JwtHandler::parse_algorithm("HS512"), Ok(Algorithm::HS512));
        assert!(JwtHandler::parse_algorithm("nope").is_err());
    }

    #[test]
    fn test_verify_invalid_token() {
        let result = handler().verify("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!", Algorithm::HS256)
            .expect("Failed to create handler");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!", Algorithm::HS256)
            .expect("Failed to create handler");

        let token = handler1
            .issue("alice", Duration::minutes(30))
            .expect("Failed to issue token");

        let result = handler2.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_zero_lifetime_token_is_rejected() {
        let handler = handler();
        let token = handler
            .issue("alice", Duration::zero())
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_past_expiry_is_rejected() {
        let handler = handler();
        let token = handler
            .issue("alice", Duration::minutes(-5))
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let handler = handler();
        let claims = Claims {
            sub: None,
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            handler.verify(&token),
            Err(JwtError::MissingClaim("sub".to_string()))
        );
    }

    #[test]
    fn test_empty_subject_is_rejected() {
        let handler = handler();
        let token = handler
            .issue("", Duration::minutes(5))
            .expect("Failed to issue token");

        assert!(matches!(
            handler.verify(&token),
            Err(JwtError::MissingClaim(_))
        ));
    }
}
