//! # PortalHub Infrastructure
//!
//! Concrete implementations of the core repository traits against MySQL,
//! plus connection pool construction.

pub mod database;

pub use database::{create_pool, MySqlClientRepository, MySqlPrincipalRepository};
