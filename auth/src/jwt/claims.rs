use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Carries the subject (username) together with issue and expiry times as
/// Unix timestamps. `sub` is optional on the wire so that a token without a
/// subject decodes and can be rejected with a precise error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, issued now and expiring after `lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Token subject (username)
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with `exp = iat + lifetime`
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: Some(subject.to_string()),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// A token is only valid strictly before its expiry instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice", Duration::minutes(30));

        assert_eq!(claims.sub, Some("alice".to_string()));
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::for_subject("alice", Duration::minutes(1)).with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_zero_lifetime_is_expired_immediately() {
        let claims = Claims::for_subject("alice", Duration::zero());
        assert!(claims.is_expired(Utc::now().timestamp()));
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims::for_subject("", Duration::minutes(5));
        assert_eq!(claims.subject(), None);

        let claims = claims.with_subject("bob");
        assert_eq!(claims.subject(), Some("bob"));
    }
}
