//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default bearer token lifetime in days
pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 30;

/// JWT authentication configuration
///
/// The signing secret is process-wide state constructed exactly once at
/// startup and passed by reference into the token service. There is no
/// fallback secret: an unset `JWT_SECRET` aborts startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Bearer token expiry time in days
    pub token_expiry_days: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry_days: DEFAULT_TOKEN_EXPIRY_DAYS,
            issuer: String::from("portal-hub"),
            audience: String::from("portal-hub-api"),
        }
    }

    /// Set token expiry in days
    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.token_expiry_days = days;
        self
    }

    /// Load from environment variables.
    ///
    /// `JWT_SECRET` is required; `TOKEN_EXPIRY_DAYS` defaults to 30.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(value) if !value.is_empty() => value,
            _ => return Err(ConfigError::Missing { name: "JWT_SECRET" }),
        };

        let token_expiry_days = std::env::var("TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_DAYS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_DAYS);

        Ok(Self {
            secret,
            token_expiry_days,
            issuer: String::from("portal-hub"),
            audience: String::from("portal-hub-api"),
        })
    }
}
