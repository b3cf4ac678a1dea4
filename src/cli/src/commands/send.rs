//! Send command for the CLI wallet.

use crate::commands::load_wallet;
use crate::config::ClientConfig;
use crate::errors::WalletError;
use std::path::Path;
use tracing::info;
use weave_core::{units, TransactionBuilder, TxId};
use weave_network::GatewayClient;

/// Runs the send command.
///
/// `amount` is in display units. Returns the id of the posted transaction.
pub async fn run<P: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    to: &str,
    amount: &str,
) -> Result<TxId, WalletError> {
    let wallet = load_wallet(wallet_path)?;
    let signer = wallet.signer()?;
    let quantity = units::parse_display(amount)?;
    info!(
        "Sending {} ({} base units) from {} to {}",
        amount,
        quantity,
        signer.address(),
        to
    );

    let builder = TransactionBuilder::new(config.max_payload_size);
    let mut tx = builder.build(to, quantity, Vec::new(), Vec::new())?;

    info!("Signing transaction");
    builder.sign(&mut tx, &signer)?;

    let gateway = GatewayClient::new(&config.gateway);
    let id = gateway.post_transaction(&tx, true).await?;
    Ok(id)
}
