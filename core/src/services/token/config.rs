//! Configuration for the token service

use ph_shared::config::JwtConfig;

use crate::domain::entities::token::{JWT_AUDIENCE, JWT_ISSUER, TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Number of days before an issued token expires
    pub expiry_days: i64,
    /// Issuer claim stamped on issued tokens
    pub issuer: String,
    /// Audience claim stamped on issued tokens
    pub audience: String,
}

impl TokenConfig {
    /// Creates a config with the given secret and default expiry
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_days: TOKEN_EXPIRY_DAYS,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            expiry_days: config.token_expiry_days,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
