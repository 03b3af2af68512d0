//! Error types for the `SmartCoil` bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a directive
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The (namespace, name) pair matched no known operation
    #[error("unhandled directive: {namespace}::{name}")]
    UnhandledDirective {
        /// Interface identifier of the offending directive
        namespace: String,
        /// Operation name of the offending directive
        name: String,
    },

    /// The directive routed, but its payload is missing a required field
    /// or carries the wrong type
    #[error("malformed directive: {0}")]
    Directive(String),

    /// The device backend answered with a non-2xx status
    #[error("backend error: {status} - {body}")]
    Backend {
        /// HTTP status returned by the backend
        status: reqwest::StatusCode,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The backend body violated the double-encoded JSON contract
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
