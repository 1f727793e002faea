//! MySQL repository implementations.

mod client_repository_impl;
mod principal_repository_impl;

pub use client_repository_impl::MySqlClientRepository;
pub use principal_repository_impl::MySqlPrincipalRepository;
