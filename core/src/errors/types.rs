//! Domain-specific error types for authentication and verification.
//!
//! User-visible messages are decided in the presentation layer; these
//! variants carry only what internal logging needs. In particular the
//! expected role on a mismatch and the reason a token failed must never
//! reach the caller.

use thiserror::Error;

use crate::domain::entities::principal::Role;

/// Authentication and authorization errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer credential")]
    NoCredential,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Principal not found")]
    PrincipalNotFound,

    #[error("Role mismatch: expected {expected}")]
    RoleMismatch { expected: Role },

    #[error("Account not verified")]
    NotVerified,
}

/// Token codec errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Verification ticket lifecycle errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification ticket is invalid or expired")]
    TicketInvalidOrExpired,

    #[error("Account is already verified")]
    AlreadyVerified,
}
