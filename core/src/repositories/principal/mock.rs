//! Mock implementation of PrincipalRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::principal::{Principal, PrincipalCredentials};
use crate::errors::DomainError;

use super::repository::PrincipalRepository;

/// In-memory principal repository for tests
pub struct MockPrincipalRepository {
    accounts: Arc<RwLock<HashMap<Uuid, (Principal, String)>>>,
}

impl MockPrincipalRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockPrincipalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalRepository for MockPrincipalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).map(|(principal, _)| principal.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|(principal, _)| principal.email == email)
            .map(|(principal, _)| principal.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PrincipalCredentials>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|(principal, _)| principal.email == email)
            .map(|(principal, password_hash)| PrincipalCredentials {
                principal: principal.clone(),
                password_hash: password_hash.clone(),
            }))
    }

    async fn create(
        &self,
        principal: Principal,
        password_hash: String,
    ) -> Result<Principal, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|(existing, _)| existing.email == principal.email)
        {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        accounts.insert(principal.id, (principal.clone(), password_hash));
        Ok(principal)
    }

    async fn update(&self, principal: Principal) -> Result<Principal, DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&principal.id) {
            Some(entry) => {
                entry.0 = principal.clone();
                Ok(principal)
            }
            None => Err(DomainError::NotFound {
                resource: "Principal".to_string(),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::principal::Role;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MockPrincipalRepository::new();
        let principal = Principal::new(
            "owner@studio.example".to_string(),
            "Owner".to_string(),
            Role::Agency,
        );

        let created = repo
            .create(principal.clone(), "hash".to_string())
            .await
            .unwrap();
        assert_eq!(created.id, principal.id);

        let found = repo.find_by_id(principal.id).await.unwrap().unwrap();
        assert_eq!(found.email, "owner@studio.example");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MockPrincipalRepository::new();
        let a = Principal::new("x@y.example".to_string(), "A".to_string(), Role::Agency);
        let b = Principal::new("x@y.example".to_string(), "B".to_string(), Role::Client);

        repo.create(a, "hash".to_string()).await.unwrap();
        assert!(repo.create(b, "hash".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_credentials_lookup_carries_hash() {
        let repo = MockPrincipalRepository::new();
        let principal = Principal::new("x@y.example".to_string(), "A".to_string(), Role::Agency);
        repo.create(principal, "secret-hash".to_string())
            .await
            .unwrap();

        let creds = repo
            .find_credentials_by_email("x@y.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.password_hash, "secret-hash");
    }
}
