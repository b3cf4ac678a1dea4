//! Balance command for the CLI wallet.

use crate::commands::load_wallet;
use crate::config::ClientConfig;
use crate::errors::WalletError;
use std::path::Path;
use tracing::info;
use weave_core::{units, Balance};
use weave_network::GatewayClient;

/// Result of the balance command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    /// The wallet address
    pub address: String,
    /// The balance in base units
    pub base: Balance,
    /// The balance in display units
    pub display: String,
}

/// Runs the balance command.
pub async fn run<P: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
) -> Result<BalanceReport, WalletError> {
    let wallet = load_wallet(wallet_path)?;
    let address = wallet.address()?;
    info!("Getting balance for address: {}", address);

    let gateway = GatewayClient::new(&config.gateway);
    let base = gateway.balance(&address).await?;

    Ok(BalanceReport {
        address,
        base,
        display: units::to_display(base),
    })
}
