//! Common error types for shiptrack

use thiserror::Error;

/// Common result type for shiptrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the shiptrack crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Optional provider (carrier, AI, mail, Gmail) has no credentials
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Upstream provider call failed (network, HTTP status, parse)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
