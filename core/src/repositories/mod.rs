//! Repository interfaces for domain persistence.
//!
//! Traits live here; concrete database implementations live in the infra
//! crate. In-memory mocks are exported for tests and local development.

pub mod client;
pub mod principal;

pub use client::{ClientRepository, MockClientRepository};
pub use principal::{MockPrincipalRepository, PrincipalRepository};
