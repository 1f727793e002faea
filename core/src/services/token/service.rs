//! Bearer token signing and verification

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenConfig;

/// Service for issuing and verifying signed bearer tokens.
///
/// Keys are derived once from the process-wide secret; verification is
/// deterministic for a given token and clock reading and has no side
/// effects beyond reading the clock.
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from the startup configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // expiry is exact, not fuzzy
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a signed bearer token for the given subject
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded token
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue(&self, subject_id: Uuid) -> Result<String, DomainError> {
        let mut claims = Claims::new(subject_id, self.config.expiry_days);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Verifies a bearer token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError)` - `Expired`, `InvalidSignature`, or `Malformed`
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::Expired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::Malformed),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verifies a bearer token and returns the subject principal ID
    pub fn verify_subject(&self, token: &str) -> Result<Uuid, DomainError> {
        let claims = self.verify(token)?;
        claims
            .subject_id()
            .map_err(|_| DomainError::Token(TokenError::Malformed))
    }

    /// Lifetime of newly issued tokens, in seconds
    pub fn expires_in_seconds(&self) -> i64 {
        self.config.expiry_days * 24 * 60 * 60
    }
}
