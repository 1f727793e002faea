//! Session resolution: bearer credential to principal.

mod service;

pub use service::{parse_bearer, SessionService};
