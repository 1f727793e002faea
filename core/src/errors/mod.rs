//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::principal::Role;

    #[test]
    fn test_auth_error_bridges_into_domain_error() {
        let err: DomainError = AuthError::NoCredential.into();
        assert!(matches!(err, DomainError::Auth(AuthError::NoCredential)));
    }

    #[test]
    fn test_role_mismatch_message_names_expected_role() {
        let err = AuthError::RoleMismatch {
            expected: Role::Agency,
        };
        assert_eq!(err.to_string(), "Role mismatch: expected agency");
    }

    #[test]
    fn test_token_error_messages() {
        assert_eq!(TokenError::Expired.to_string(), "Token expired");
        assert_eq!(TokenError::Malformed.to_string(), "Malformed token");
    }
}
