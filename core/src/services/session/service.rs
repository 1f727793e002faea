//! Resolves an inbound bearer credential to a principal.
//!
//! All-or-nothing: either a principal comes back for attachment to the
//! request context, or the request must be denied before any handler
//! runs. Codec failures are collapsed to a single error so callers can
//! never distinguish a malformed token from an expired or badly signed
//! one; the reason is logged at debug level only.

use std::sync::Arc;

use crate::domain::entities::principal::Principal;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::PrincipalRepository;
use crate::services::token::TokenService;

/// Extracts the token from an `Authorization` header value.
///
/// Accepts exactly `Bearer <token>`: case-sensitive scheme, a single
/// space, non-empty token. Anything else, including a missing header,
/// is one unified "no credential" outcome.
pub fn parse_bearer(header: Option<&str>) -> Option<&str> {
    let rest = header?.strip_prefix("Bearer ")?;
    if rest.is_empty() || rest.starts_with(' ') {
        return None;
    }
    Some(rest)
}

/// Per-request session resolution over a principal store.
pub struct SessionService<P: PrincipalRepository> {
    principals: Arc<P>,
    tokens: Arc<TokenService>,
}

impl<P: PrincipalRepository> SessionService<P> {
    /// Creates a new session service
    pub fn new(principals: Arc<P>, tokens: Arc<TokenService>) -> Self {
        Self { principals, tokens }
    }

    /// Resolves an `Authorization` header value to a principal.
    ///
    /// # Returns
    ///
    /// * `Ok(Principal)` - resolved principal, credential excluded
    /// * `Err(NoCredential)` - header absent or not a bearer credential
    /// * `Err(AuthenticationFailed)` - token rejected by the codec
    /// * `Err(PrincipalNotFound)` - token subject no longer exists
    ///
    /// One principal-store read, no writes.
    pub async fn resolve(&self, authorization: Option<&str>) -> DomainResult<Principal> {
        let token = parse_bearer(authorization).ok_or(AuthError::NoCredential)?;

        let subject = match self.tokens.verify_subject(token) {
            Ok(subject) => subject,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected");
                return Err(AuthError::AuthenticationFailed.into());
            }
        };

        match self.principals.find_by_id(subject).await? {
            Some(principal) => Ok(principal),
            None => {
                tracing::debug!(%subject, "token subject has no principal");
                Err(AuthError::PrincipalNotFound.into())
            }
        }
    }
}
