//! Verification ticket lifecycle over the client store

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::client::Client;
use crate::domain::value_objects::verification_ticket::VerificationTicket;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::ClientRepository;

use super::config::VerificationConfig;

/// Service managing the verification ticket lifecycle for clients
pub struct VerificationService<C: ClientRepository> {
    clients: Arc<C>,
    config: VerificationConfig,
}

impl<C: ClientRepository> VerificationService<C> {
    /// Creates a new verification service
    pub fn new(clients: Arc<C>, config: VerificationConfig) -> Self {
        Self { clients, config }
    }

    /// Issues a fresh verification ticket for a client, silently
    /// discarding any outstanding one. Recipients of the old link are
    /// locked out immediately; that is policy, not an accident.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationTicket)` - The newly issued ticket
    /// * `Err(NotFound)` - No such client
    /// * `Err(AlreadyVerified)` - Client has already completed verification
    pub async fn issue(&self, client_id: Uuid) -> DomainResult<VerificationTicket> {
        let mut client = self
            .clients
            .find_by_id(client_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "Client".to_string(),
            })?;

        let ticket = client.issue_ticket(self.config.ticket_expiry_days)?;
        self.clients.update(client).await?;

        tracing::info!(%client_id, expires_at = %ticket.expires_at, "verification ticket issued");
        Ok(ticket)
    }

    /// Read-only check of a presented ticket value, for link previews.
    ///
    /// No side effects: a `true` here does not reserve the ticket.
    pub async fn validate(&self, presented: &str) -> DomainResult<bool> {
        match self.clients.find_by_ticket(presented).await? {
            Some(client) => Ok(client.validate_ticket(presented)),
            None => Ok(false),
        }
    }

    /// Consumes a presented ticket, promoting the owning client to
    /// verified.
    ///
    /// The transition is applied as a single atomic conditional update in
    /// the store; when two requests race on the same ticket exactly one
    /// wins and the other observes `TicketInvalidOrExpired` with no
    /// partial effect. Consuming an already-consumed ticket always fails.
    ///
    /// # Returns
    ///
    /// * `Ok(Client)` - The client in its verified state
    /// * `Err(TicketInvalidOrExpired)` - Unknown, expired, mismatched, or
    ///   already-consumed ticket
    pub async fn consume(&self, presented: &str) -> DomainResult<Client> {
        let client = self
            .clients
            .find_by_ticket(presented)
            .await?
            .ok_or(VerificationError::TicketInvalidOrExpired)?;

        if !client.validate_ticket(presented) {
            return Err(VerificationError::TicketInvalidOrExpired.into());
        }

        if !self.clients.consume_ticket(client.id, presented).await? {
            // lost the race, or the ticket died between the read and the update
            return Err(VerificationError::TicketInvalidOrExpired.into());
        }

        let verified = self
            .clients
            .find_by_id(client.id)
            .await?
            .ok_or(DomainError::Internal {
                message: "Client vanished during ticket consumption".to_string(),
            })?;

        tracing::info!(client_id = %verified.id, "client verified");
        Ok(verified)
    }
}
