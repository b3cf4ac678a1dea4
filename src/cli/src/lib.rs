//! CLI wallet and uploader for the weave client.

pub mod commands;
pub mod config;
pub mod errors;
pub mod wallet;

// Re-export commonly used types and functions
pub use commands::{balance, create_wallet, send, upload};
pub use config::ClientConfig;
pub use errors::WalletError;
pub use wallet::{Wallet, WalletSigner};
