//! Verification ticket value object.
//!
//! A ticket is a one-time, time-boxed proof of control over a claimed
//! identity (the client's email address). It is distinct from session
//! bearer tokens: opaque, unguessable, and embedded in the client entity
//! it belongs to.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default expiration window for verification tickets (7 days)
pub const TICKET_EXPIRY_DAYS: i64 = 7;

/// One-time verification ticket embedded in a client entity.
///
/// Invariants:
/// - at most one ticket exists per client; issuing a new one overwrites
///   the old, so prior links stop validating immediately;
/// - consumable iff `consumed_at` is unset and `now < expires_at`;
/// - consumption is one-way: `consumed_at` is recorded and the value is
///   cleared so it can never be presented again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationTicket {
    /// Opaque ticket value (UUID v4, 122 bits of entropy)
    pub value: String,

    /// Timestamp when the ticket expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the ticket was consumed, if it has been
    pub consumed_at: Option<DateTime<Utc>>,
}

impl VerificationTicket {
    /// Issues a fresh ticket expiring `expiry_days` from now
    pub fn issue(expiry_days: i64) -> Self {
        Self {
            value: Uuid::new_v4().to_string(),
            expires_at: Utc::now() + Duration::days(expiry_days),
            consumed_at: None,
        }
    }

    /// Checks if the ticket has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if the ticket can still be consumed
    pub fn is_consumable(&self) -> bool {
        self.consumed_at.is_none() && !self.is_expired()
    }

    /// Compares a presented value against the ticket value in constant time.
    ///
    /// A cleared (consumed) ticket matches nothing, including the empty
    /// string.
    pub fn matches(&self, presented: &str) -> bool {
        !self.value.is_empty() && constant_time_eq(self.value.as_bytes(), presented.as_bytes())
    }

    /// Read-only validity check for a presented value
    pub fn validate(&self, presented: &str) -> bool {
        self.matches(presented) && self.is_consumable()
    }

    /// Consumes the ticket: records the consumption time and clears the
    /// value so it can never be presented again.
    pub fn consume(&mut self) {
        self.consumed_at = Some(Utc::now());
        self.value.clear();
    }
}
