//! Value objects for the domain layer.

pub mod auth_response;
pub mod verification_ticket;

pub use auth_response::AuthResponse;
pub use verification_ticket::VerificationTicket;
