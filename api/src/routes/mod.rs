//! Route handlers and shared application state.

pub mod auth;
pub mod clients;

use std::sync::Arc;

use ph_core::repositories::{ClientRepository, PrincipalRepository};
use ph_core::services::auth::AuthService;
use ph_core::services::session::SessionService;
use ph_core::services::verification::VerificationService;

/// Application state shared across handlers.
///
/// Generic over the repository implementations so tests can run the full
/// HTTP surface against the in-memory mocks.
pub struct AppState<P, C>
where
    P: PrincipalRepository + 'static,
    C: ClientRepository + 'static,
{
    /// Sign-in service
    pub auth_service: Arc<AuthService<P>>,

    /// Session resolution service
    pub session_service: Arc<SessionService<P>>,

    /// Verification ticket lifecycle service
    pub verification_service: Arc<VerificationService<C>>,
}
