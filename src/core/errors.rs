//! Custom error types for PanLex API operations

use thiserror::Error;

/// Errors raised by PanLex queries
#[derive(Error, Debug)]
pub enum PanlexError {
    /// Service-level error: the API answered 409 with a structured body
    #[error("PanLex API error {code}: {message}")]
    Api {
        /// Service-defined error code
        code: i64,
        /// Human-readable message from the service
        message: String,
    },

    /// Transport-level error: any non-success status other than 409
    #[error("HTTP error: {status} - {message}")]
    Http {
        /// Raw HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Malformed pagination accounting in a response
    #[error("protocol violation on {endpoint}: {message}")]
    Protocol {
        /// Endpoint that produced the bad page
        endpoint: String,
        /// What was inconsistent
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    Network {
        /// Underlying transport failure
        message: String,
    },

    /// Response body did not parse as the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Parse failure detail
        message: String,
    },

    /// Missing required request field
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the absent parameter
        field: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What was rejected
        message: String,
    },

    /// Reqwest client error (builder failures and the like)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for PanLex operations
pub type Result<T> = std::result::Result<T, PanlexError>;
