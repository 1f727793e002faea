//! DTOs for authentication and verification endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ph_core::domain::entities::principal::{Principal, Role};
use ph_core::domain::value_objects::auth_response::AuthResponse;

/// Request body for POST /api/v1/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    /// Account password
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Response body for a successful sign-in
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Token scheme for the Authorization header
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Role of the signed-in account
    pub role: Role,
}

impl From<AuthResponse> for LoginResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            role: response.role,
        }
    }
}

/// Public view of a principal, for GET /api/v1/auth/me
#[derive(Debug, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_verified: bool,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            email: principal.email,
            name: principal.name,
            role: principal.role,
            is_verified: principal.is_verified,
        }
    }
}

/// Request body for POST /api/v1/clients/verify
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyTicketRequest {
    /// Opaque verification ticket value from the emailed link
    #[validate(length(min = 1, message = "Ticket is required"))]
    pub ticket: String,
}

/// Response body after (re-)issuing a verification ticket.
///
/// The ticket value itself is never serialized; delivery of the link is
/// the mail collaborator's job.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationIssuedResponse {
    pub client_id: Uuid,
    pub status: String,
    pub expires_at: DateTime<Utc>,
}

/// Response body after consuming a verification ticket
#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationResultResponse {
    pub client_id: Uuid,
    pub status: String,
    pub verified_at: Option<DateTime<Utc>>,
}
