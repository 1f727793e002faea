//! Client entity: an account managed by an agency, verified by ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::value_objects::verification_ticket::{VerificationTicket, TICKET_EXPIRY_DAYS};
use crate::errors::{DomainResult, VerificationError};

/// Lifecycle status of a client account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Account created, identity not yet proven
    Unverified,
    /// Identity proven via a verification ticket
    Verified,
    /// Verified and activated by the owning agency
    Active,
    /// Deactivated by the owning agency
    Inactive,
}

impl ClientStatus {
    /// Canonical lowercase string form, as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Unverified => "unverified",
            ClientStatus::Verified => "verified",
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
        }
    }

    /// Parse the canonical string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unverified" => Some(ClientStatus::Unverified),
            "verified" => Some(ClientStatus::Verified),
            "active" => Some(ClientStatus::Active),
            "inactive" => Some(ClientStatus::Inactive),
            _ => None,
        }
    }
}

/// Verification state derived from the client's ticket and status.
///
/// `Verified` is terminal for this mechanism; re-verification would be a
/// separate explicit workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    /// No consumable ticket exists
    Unverified,
    /// A consumable (unconsumed, unexpired) ticket is outstanding
    PendingVerification,
    /// Identity has been proven
    Verified,
}

/// Client account owned by an agency.
///
/// Known fields are explicit and typed; `metadata` is the single opaque
/// key-value extension map, owned entirely by the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier for the client
    pub id: Uuid,

    /// Owning agency's principal ID
    pub agency_id: Uuid,

    /// Client display name
    pub name: String,

    /// Client email address (the identity proven by verification)
    pub email: String,

    /// Lifecycle status
    pub status: ClientStatus,

    /// Outstanding verification ticket, if any
    pub verification_ticket: Option<VerificationTicket>,

    /// Timestamp when verification was completed
    pub verified_at: Option<DateTime<Utc>>,

    /// Timestamp of the client's last portal sign-in
    pub last_login_at: Option<DateTime<Utc>>,

    /// Free-form agency notes
    pub notes: Option<String>,

    /// Opaque extension attributes
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Timestamp when the client was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the client was last updated
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new unverified client with an outstanding verification
    /// ticket, mirroring account creation.
    pub fn new(agency_id: Uuid, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            agency_id,
            name,
            email,
            status: ClientStatus::Unverified,
            verification_ticket: Some(VerificationTicket::issue(TICKET_EXPIRY_DAYS)),
            verified_at: None,
            last_login_at: None,
            notes: None,
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Verification predicate: verified and active accounts both count
    pub fn is_verified(&self) -> bool {
        matches!(self.status, ClientStatus::Verified | ClientStatus::Active)
    }

    /// Derived verification state machine
    pub fn verification_state(&self) -> VerificationState {
        if self.is_verified() {
            VerificationState::Verified
        } else if self
            .verification_ticket
            .as_ref()
            .is_some_and(|t| t.is_consumable())
        {
            VerificationState::PendingVerification
        } else {
            VerificationState::Unverified
        }
    }

    /// Issues a fresh verification ticket, silently discarding any
    /// outstanding one. Prior links stop validating immediately; there is
    /// no grace period.
    ///
    /// Fails with `AlreadyVerified` on a verified account.
    pub fn issue_ticket(&mut self, expiry_days: i64) -> DomainResult<VerificationTicket> {
        if self.is_verified() {
            return Err(VerificationError::AlreadyVerified.into());
        }

        let ticket = VerificationTicket::issue(expiry_days);
        self.verification_ticket = Some(ticket.clone());
        self.updated_at = Utc::now();
        Ok(ticket)
    }

    /// Read-only check of a presented ticket value
    pub fn validate_ticket(&self, presented: &str) -> bool {
        self.verification_ticket
            .as_ref()
            .is_some_and(|t| t.validate(presented))
    }

    /// Consumes a presented ticket: promotes the account to verified,
    /// records `verified_at`, and retires the ticket so it can never be
    /// presented again. Single transition; on failure nothing changes.
    pub fn consume_ticket(&mut self, presented: &str) -> DomainResult<()> {
        if !self.validate_ticket(presented) {
            return Err(VerificationError::TicketInvalidOrExpired.into());
        }

        if let Some(ticket) = self.verification_ticket.as_mut() {
            ticket.consume();
        }
        let now = Utc::now();
        self.status = ClientStatus::Verified;
        self.verified_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_client() -> Client {
        Client::new(
            Uuid::new_v4(),
            "Acme Retail".to_string(),
            "ops@acme.example".to_string(),
        )
    }

    #[test]
    fn test_new_client_is_pending() {
        let client = sample_client();

        assert_eq!(client.status, ClientStatus::Unverified);
        assert!(!client.is_verified());
        assert_eq!(
            client.verification_state(),
            VerificationState::PendingVerification
        );
    }

    #[test]
    fn test_consume_promotes_to_verified() {
        let mut client = sample_client();
        let presented = client.verification_ticket.as_ref().unwrap().value.clone();

        client.consume_ticket(&presented).unwrap();

        assert_eq!(client.status, ClientStatus::Verified);
        assert!(client.verified_at.is_some());
        assert!(client.is_verified());
        assert_eq!(client.verification_state(), VerificationState::Verified);
    }

    #[test]
    fn test_consume_is_replay_safe() {
        let mut client = sample_client();
        let presented = client.verification_ticket.as_ref().unwrap().value.clone();

        client.consume_ticket(&presented).unwrap();
        let second = client.consume_ticket(&presented);

        assert!(second.is_err());
        // the state is untouched by the failed replay
        assert_eq!(client.status, ClientStatus::Verified);
    }

    #[test]
    fn test_reissue_invalidates_prior_ticket() {
        let mut client = sample_client();
        let first = client.verification_ticket.as_ref().unwrap().value.clone();

        let second = client.issue_ticket(7).unwrap();

        assert!(!client.validate_ticket(&first));
        assert!(client.validate_ticket(&second.value));
    }

    #[test]
    fn test_expired_ticket_consume_fails_without_state_change() {
        let mut client = sample_client();
        let presented = client.verification_ticket.as_ref().unwrap().value.clone();
        client.verification_ticket.as_mut().unwrap().expires_at =
            Utc::now() - Duration::seconds(1);

        let result = client.consume_ticket(&presented);

        assert!(result.is_err());
        assert_eq!(client.status, ClientStatus::Unverified);
        assert!(client.verified_at.is_none());
        assert_eq!(client.verification_state(), VerificationState::Unverified);
    }

    #[test]
    fn test_issue_on_verified_client_fails() {
        let mut client = sample_client();
        let presented = client.verification_ticket.as_ref().unwrap().value.clone();
        client.consume_ticket(&presented).unwrap();

        assert!(client.issue_ticket(7).is_err());
    }

    #[test]
    fn test_active_counts_as_verified() {
        let mut client = sample_client();
        client.status = ClientStatus::Active;

        assert!(client.is_verified());
        assert_eq!(client.verification_state(), VerificationState::Verified);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ClientStatus::Unverified,
            ClientStatus::Verified,
            ClientStatus::Active,
            ClientStatus::Inactive,
        ] {
            assert_eq!(ClientStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ClientStatus::parse("archived"), None);
    }
}
