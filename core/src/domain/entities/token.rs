//! Bearer token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer token expiration time (30 days)
pub const TOKEN_EXPIRY_DAYS: i64 = 30;

/// JWT issuer
pub const JWT_ISSUER: &str = "portal-hub";

/// JWT audience
pub const JWT_AUDIENCE: &str = "portal-hub-api";

/// Claims structure for the JWT payload.
///
/// Tokens are stateless: nothing here is persisted, and a token dies
/// naturally at `exp`. Role and verification status are intentionally not
/// carried in claims; the session resolver reads them fresh from the
/// principal store on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a bearer token expiring `expiry_days` from now
    pub fn new(subject_id: Uuid, expiry_days: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(expiry_days);

        Self {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the subject principal ID from the claims
    pub fn subject_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let subject = Uuid::new_v4();
        let claims = Claims::new(subject, TOKEN_EXPIRY_DAYS);

        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.exp - claims.iat, TOKEN_EXPIRY_DAYS * 24 * 60 * 60);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_subject_id_parsing() {
        let subject = Uuid::new_v4();
        let claims = Claims::new(subject, TOKEN_EXPIRY_DAYS);

        assert_eq!(claims.subject_id().unwrap(), subject);
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new(Uuid::new_v4(), TOKEN_EXPIRY_DAYS);
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new(Uuid::new_v4(), TOKEN_EXPIRY_DAYS);

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
