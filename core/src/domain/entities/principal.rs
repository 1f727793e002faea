//! Principal entity representing an authenticated account in the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role of an account in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An agency managing branded portals and their clients
    Agency,
    /// A client accessing a portal assigned by an agency
    Client,
}

impl Role {
    /// Canonical lowercase string form, as stored and as carried in claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Agency => "agency",
            Role::Client => "client",
        }
    }

    /// Parse the canonical string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "agency" => Some(Role::Agency),
            "client" => Some(Role::Client),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity attached to a request after session resolution.
///
/// The stored password hash is never part of this struct; the only path
/// that ever touches it is [`PrincipalCredentials`] via the login lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Account email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Account role
    pub role: Role,

    /// Whether the account has completed verification
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the account's last sign-in
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Principal {
    /// Creates a new Principal
    pub fn new(email: String, name: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            role,
            is_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Marks the account as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Updates the last sign-in timestamp
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Checks if the account is an agency
    pub fn is_agency(&self) -> bool {
        self.role == Role::Agency
    }

    /// Checks if the account is a client
    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}

/// A principal together with its stored credential hash.
///
/// Surfaced only by `PrincipalRepository::find_credentials_by_email` for
/// password verification at sign-in; never serialized, never attached to
/// a request.
#[derive(Debug, Clone)]
pub struct PrincipalCredentials {
    /// The account, without its secret
    pub principal: Principal,

    /// bcrypt hash of the account password
    pub password_hash: String,
}
