//! HTTP middleware: session authentication, access guards, CORS.

pub mod auth;
pub mod cors;
pub mod guards;

pub use auth::{AuthContext, SessionAuth, SessionResolver};
pub use guards::{RequireRole, RequireVerified};
