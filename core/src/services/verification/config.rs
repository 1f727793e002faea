//! Configuration for the verification service

use crate::domain::value_objects::verification_ticket::TICKET_EXPIRY_DAYS;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of days before a verification ticket expires
    pub ticket_expiry_days: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            ticket_expiry_days: TICKET_EXPIRY_DAYS,
        }
    }
}
