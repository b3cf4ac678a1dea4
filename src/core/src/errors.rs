//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
///
/// Every variant is a distinct outcome so callers can tell a retryable
/// transport failure apart from a caller mistake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error when a quantity is negative, malformed, or out of range.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when a payload exceeds the configured ceiling.
    #[error("Payload too large: {size} bytes exceeds the maximum of {max} bytes")]
    PayloadTooLarge {
        /// The payload size
        size: usize,
        /// The configured maximum
        max: usize,
    },

    /// Error when mutating or re-signing a transaction that is already signed.
    #[error("Transaction is already signed")]
    AlreadySigned,

    /// Error when the signing capability fails.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Error when an operation needs a signed transaction.
    #[error("Transaction is not signed")]
    NotSigned,

    /// Error when the requested chunk size is zero.
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),

    /// Error when the transport fails to deliver a chunk. Retryable.
    #[error("Transport failure at offset {offset}: {reason}")]
    TransportFailure {
        /// Byte offset of the chunk that failed
        offset: u64,
        /// The transport's error message
        reason: String,
    },
}

impl CoreError {
    /// Returns true if repeating the failed call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::TransportFailure { .. })
    }
}
