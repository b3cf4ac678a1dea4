//! Create wallet command for the CLI wallet.

use crate::errors::WalletError;
use crate::wallet::Wallet;
use std::path::Path;
use tracing::{debug, info};

/// Runs the create-wallet command.
///
/// Returns the new wallet and its address; with `out` the key file is also
/// written there.
pub async fn run(out: Option<&Path>) -> Result<(Wallet, String), WalletError> {
    let wallet = Wallet::new()?;
    let address = wallet.address()?;
    debug!("Generated wallet for account {}", wallet.account_index());

    if let Some(path) = out {
        wallet.save(path)?;
        info!("Wallet saved to {}", path.display());
    }

    Ok((wallet, address))
}
