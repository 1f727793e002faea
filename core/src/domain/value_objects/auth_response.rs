//! Authentication response value object returned after sign-in.

use serde::{Deserialize, Serialize};

use crate::domain::entities::principal::Role;

/// Result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Token scheme expected by the Authorization header
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Role of the signed-in principal
    pub role: Role,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(access_token: String, expires_in: i64, role: Role) -> Self {
        Self {
            access_token,
            token_type: String::from("Bearer"),
            expires_in,
            role,
        }
    }
}
