//! Error types for the backend API boundary

use thiserror::Error;

use crate::types::ErrorEnvelope;

/// Backend API error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (lookup miss, unknown transaction)
    #[error("Account not found")]
    NotFound,

    /// Transport-level failure
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status without a parseable error envelope
    #[error("Backend returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Structured business rejection from the backend
    #[error("Backend rejected the request: {0}")]
    Business(ErrorEnvelope),

    /// Payload serialization failure
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, ApiError>;
