//! Domain entities for the PortalHub backend.

pub mod client;
pub mod principal;
pub mod token;

pub use client::{Client, ClientStatus, VerificationState};
pub use principal::{Principal, PrincipalCredentials, Role};
pub use token::Claims;
