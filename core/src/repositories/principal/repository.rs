//! Principal repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::principal::{Principal, PrincipalCredentials};
use crate::errors::DomainError;

/// Repository trait for principal persistence operations.
///
/// Every method that returns a [`Principal`] excludes the stored
/// credential; [`find_credentials_by_email`](Self::find_credentials_by_email)
/// is the single path that surfaces the password hash, and only for
/// sign-in verification.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Find a principal by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Principal))` - Principal found
    /// * `Ok(None)` - No principal with the given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError>;

    /// Find a principal by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError>;

    /// Find a principal together with its stored password hash.
    ///
    /// Used exclusively by the sign-in flow.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PrincipalCredentials>, DomainError>;

    /// Create a new principal with the given password hash
    ///
    /// # Returns
    /// * `Ok(Principal)` - The created principal
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(
        &self,
        principal: Principal,
        password_hash: String,
    ) -> Result<Principal, DomainError>;

    /// Update an existing principal (non-credential fields only)
    async fn update(&self, principal: Principal) -> Result<Principal, DomainError>;

    /// Delete a principal
    ///
    /// # Returns
    /// * `Ok(true)` - Principal was deleted
    /// * `Ok(false)` - Principal not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
