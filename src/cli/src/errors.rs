//! Error types for the CLI wallet.

use std::fmt;
use std::error::Error as StdError;
use weave_core::CoreError;
use weave_network::NetworkError;

/// Errors that can occur in the CLI wallet.
#[derive(Debug)]
pub enum WalletError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when a BIP32 operation fails.
    Bip32Error(bip32::Error),

    /// Error when building, signing or uploading a transaction fails.
    CoreError(CoreError),

    /// Error when talking to the gateway fails.
    NetworkError(NetworkError),

    /// Error when the configuration cannot be loaded.
    ConfigError(String),

    /// Error when a wallet operation fails.
    WalletError(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::FileError(e) => write!(f, "File error: {}", e),
            WalletError::JsonError(e) => write!(f, "JSON error: {}", e),
            WalletError::Bip32Error(e) => write!(f, "BIP32 error: {}", e),
            WalletError::CoreError(e) => write!(f, "{}", e),
            WalletError::NetworkError(e) => write!(f, "Network error: {}", e),
            WalletError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            WalletError::WalletError(msg) => write!(f, "Wallet error: {}", msg),
        }
    }
}

impl StdError for WalletError {}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::FileError(error)
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(error: serde_json::Error) -> Self {
        WalletError::JsonError(error)
    }
}

impl From<bip32::Error> for WalletError {
    fn from(error: bip32::Error) -> Self {
        WalletError::Bip32Error(error)
    }
}

impl From<CoreError> for WalletError {
    fn from(error: CoreError) -> Self {
        WalletError::CoreError(error)
    }
}

impl From<NetworkError> for WalletError {
    fn from(error: NetworkError) -> Self {
        WalletError::NetworkError(error)
    }
}
