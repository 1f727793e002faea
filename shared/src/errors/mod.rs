//! Configuration error types.
//!
//! Configuration problems are startup-time failures. They abort the process
//! before the server binds a socket and are never surfaced per request.

use thiserror::Error;

/// Errors raised while loading process configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required configuration variable {name} is not set")]
    Missing { name: &'static str },

    #[error("configuration variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}
