//! Client repository trait defining the interface for client persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::client::Client;
use crate::errors::DomainError;

/// Repository trait for client persistence operations.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find a client by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DomainError>;

    /// Find the client holding the given verification ticket value.
    ///
    /// Consumed tickets have their stored value cleared, so this never
    /// returns a client whose ticket was already consumed.
    async fn find_by_ticket(&self, ticket_value: &str) -> Result<Option<Client>, DomainError>;

    /// Create a new client
    async fn create(&self, client: Client) -> Result<Client, DomainError>;

    /// Update an existing client
    async fn update(&self, client: Client) -> Result<Client, DomainError>;

    /// Atomically consume a verification ticket.
    ///
    /// Single conditional read-modify-write keyed on the current ticket
    /// value: promotes the client to verified, records the verification
    /// and consumption times, and clears the stored ticket in one
    /// update. Under concurrent presentations of the same ticket exactly
    /// one caller observes `true`; every other caller observes `false`
    /// and no partial effect.
    ///
    /// # Returns
    /// * `Ok(true)` - This caller performed the transition
    /// * `Ok(false)` - Ticket missing, mismatched, expired, or already consumed
    async fn consume_ticket(
        &self,
        client_id: Uuid,
        presented: &str,
    ) -> Result<bool, DomainError>;

    /// Delete a client
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
