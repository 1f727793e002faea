//! Composable authorization checks over a resolved principal.
//!
//! Pure predicates, order-independent, no mutation. They run only after
//! session resolution has produced a principal; route wiring chooses how
//! to compose them.

use crate::domain::entities::principal::{Principal, Role};
use crate::errors::{AuthError, DomainResult};

/// Passes iff the principal holds the expected role.
///
/// The expected role is carried on the error for diagnostics; the
/// presentation layer renders a generic denial.
pub fn require_role(principal: &Principal, expected: Role) -> DomainResult<()> {
    if principal.role == expected {
        Ok(())
    } else {
        Err(AuthError::RoleMismatch { expected }.into())
    }
}

/// Passes iff the principal's account is verified.
pub fn require_verified(principal: &Principal) -> DomainResult<()> {
    if principal.is_verified {
        Ok(())
    } else {
        Err(AuthError::NotVerified.into())
    }
}
