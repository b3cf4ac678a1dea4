//! Commands for the CLI wallet.

pub mod balance;
pub mod create_wallet;
pub mod send;
pub mod upload;

use crate::errors::WalletError;
use crate::wallet::Wallet;
use std::path::Path;

/// Loads the wallet key file, naming the path on failure.
pub(crate) fn load_wallet<P: AsRef<Path>>(wallet_path: P) -> Result<Wallet, WalletError> {
    let wallet_path = wallet_path.as_ref();
    Wallet::load(wallet_path).map_err(|e| {
        WalletError::WalletError(format!(
            "Failed to load wallet from {}: {}",
            wallet_path.display(),
            e
        ))
    })
}
