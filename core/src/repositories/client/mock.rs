//! Mock implementation of ClientRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::client::Client;
use crate::errors::DomainError;

use super::repository::ClientRepository;

/// In-memory client repository for tests.
///
/// `consume_ticket` holds the write lock across the whole check-and-set,
/// giving the same exactly-one-winner guarantee as the database's
/// conditional update.
pub struct MockClientRepository {
    clients: Arc<RwLock<HashMap<Uuid, Client>>>,
}

impl MockClientRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DomainError> {
        let clients = self.clients.read().await;
        Ok(clients.get(&id).cloned())
    }

    async fn find_by_ticket(&self, ticket_value: &str) -> Result<Option<Client>, DomainError> {
        let clients = self.clients.read().await;
        Ok(clients
            .values()
            .find(|c| {
                c.verification_ticket
                    .as_ref()
                    .is_some_and(|t| t.matches(ticket_value))
            })
            .cloned())
    }

    async fn create(&self, client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().await;

        if clients
            .values()
            .any(|c| c.agency_id == client.agency_id && c.email == client.email)
        {
            return Err(DomainError::Validation {
                message: "Client email already registered for this agency".to_string(),
            });
        }

        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update(&self, client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().await;

        if !clients.contains_key(&client.id) {
            return Err(DomainError::NotFound {
                resource: "Client".to_string(),
            });
        }

        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn consume_ticket(
        &self,
        client_id: Uuid,
        presented: &str,
    ) -> Result<bool, DomainError> {
        let mut clients = self.clients.write().await;

        match clients.get_mut(&client_id) {
            Some(client) => Ok(client.consume_ticket(presented).is_ok()),
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut clients = self.clients.write().await;
        Ok(clients.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client::new(
            Uuid::new_v4(),
            "Acme Retail".to_string(),
            "ops@acme.example".to_string(),
        )
    }

    #[tokio::test]
    async fn test_find_by_ticket() {
        let repo = MockClientRepository::new();
        let client = sample_client();
        let ticket = client.verification_ticket.as_ref().unwrap().value.clone();
        repo.create(client.clone()).await.unwrap();

        let found = repo.find_by_ticket(&ticket).await.unwrap().unwrap();
        assert_eq!(found.id, client.id);

        assert!(repo.find_by_ticket("no-such-ticket").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consume_ticket_once() {
        let repo = MockClientRepository::new();
        let client = sample_client();
        let ticket = client.verification_ticket.as_ref().unwrap().value.clone();
        repo.create(client.clone()).await.unwrap();

        assert!(repo.consume_ticket(client.id, &ticket).await.unwrap());
        assert!(!repo.consume_ticket(client.id, &ticket).await.unwrap());

        let stored = repo.find_by_id(client.id).await.unwrap().unwrap();
        assert!(stored.is_verified());
    }
}
