//! Error types for the transfer workflow

use thiserror::Error;

use crate::validation::ValidationError;

/// Workflow error
#[derive(Debug, Error)]
pub enum Error {
    /// Operation not permitted in the current workflow step
    #[error("Invalid workflow state: {0}")]
    InvalidState(String),

    /// Referenced account is not in the loaded account list
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// Account cannot be used as a transfer source
    #[error("Account not eligible as transfer source: {0}")]
    IneligibleSource(String),

    /// Account cannot receive an own-account transfer
    #[error("Account not eligible as transfer destination: {0}")]
    IneligibleDestination(String),

    /// Form failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API failure
    #[error("Backend API error: {0}")]
    Api(#[from] banking_api::ApiError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
