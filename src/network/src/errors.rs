//! Error types for the network crate.

use std::fmt;
use std::error::Error as StdError;

/// Errors that can occur while talking to a gateway.
#[derive(Debug)]
pub enum NetworkError {
    /// Error when the HTTP request could not be completed.
    RequestFailed(String),

    /// Error when the gateway answers with a non-success status.
    UnexpectedStatus {
        /// The HTTP status code
        status: u16,
        /// The response body, for diagnostics
        body: String,
    },

    /// Error when a response body cannot be interpreted.
    InvalidResponse(String),

    /// Error when an unsigned transaction is submitted.
    NotSigned,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            NetworkError::UnexpectedStatus { status, body } => {
                write!(f, "Gateway returned status {}: {}", status, body)
            }
            NetworkError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            NetworkError::NotSigned => write!(f, "Transaction is not signed"),
        }
    }
}

impl StdError for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        NetworkError::RequestFailed(error.to_string())
    }
}
