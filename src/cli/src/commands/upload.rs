//! Upload command for the CLI wallet.

use crate::commands::load_wallet;
use crate::config::ClientConfig;
use crate::errors::WalletError;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use weave_core::{ChunkTransport, ChunkedUploader, CoreError, TransactionBuilder, TxId, UploadSession};
use weave_network::GatewayClient;

/// Tag telling gateways how to serve the data.
pub const CONTENT_TYPE_TAG: &str = "Content-Type";

/// Result of the upload command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// The transaction id
    pub id: TxId,
    /// Where the uploaded data can be fetched
    pub url: String,
    /// The content type the data was tagged with
    pub content_type: String,
    /// Number of chunks delivered
    pub chunks: usize,
    /// Number of payload bytes delivered
    pub bytes: u64,
}

/// Runs the upload command.
///
/// Without `content_type` the type is guessed from the file extension.
pub async fn run<P: AsRef<Path>, F: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    file_path: F,
    content_type: Option<&str>,
) -> Result<UploadReport, WalletError> {
    let file_path = file_path.as_ref();
    let wallet = load_wallet(wallet_path)?;
    let signer = wallet.signer()?;

    let data = std::fs::read(file_path)?;
    let content_type = match content_type {
        Some(content_type) => content_type.to_string(),
        None => mime_guess::from_path(file_path)
            .first_or_octet_stream()
            .to_string(),
    };
    info!(
        "Uploading {} ({} bytes, {}) from {}",
        file_path.display(),
        data.len(),
        content_type,
        signer.address()
    );

    let builder = TransactionBuilder::new(config.max_payload_size);
    let mut tx = builder.build("", 0, data, Vec::new())?;
    builder.attach_tag(&mut tx, CONTENT_TYPE_TAG, content_type.as_str())?;
    let id = builder.sign(&mut tx, &signer)?;

    let gateway = GatewayClient::new(&config.gateway);
    gateway.post_transaction(&tx, false).await?;

    let uploader = ChunkedUploader::new(&gateway);
    let mut session = uploader.start_session(&tx, config.chunk_size)?;
    drive(&uploader, &mut session, config).await?;

    Ok(UploadReport {
        id,
        url: gateway.retrieval_url(&id),
        content_type,
        chunks: session.total_chunks(),
        bytes: session.uploaded_bytes(),
    })
}

/// Sends every remaining chunk, retrying transport failures with
/// exponential backoff up to `config.chunk_retries` times per chunk.
pub async fn drive<T: ChunkTransport>(
    uploader: &ChunkedUploader<T>,
    session: &mut UploadSession<'_>,
    config: &ClientConfig,
) -> Result<(), CoreError> {
    let mut failures = 0u32;
    while !uploader.is_complete(session) {
        match uploader.upload_next(session).await {
            Ok(_) => {
                failures = 0;
                info!(
                    "{}/{} chunks uploaded ({}%)",
                    session.uploaded_chunks(),
                    session.total_chunks(),
                    session.pct_complete()
                );
            }
            Err(e) if e.is_retryable() && failures < config.chunk_retries => {
                let delay = backoff(config.retry_delay_ms, failures);
                failures += 1;
                warn!(
                    "Retrying chunk {} in {:?} (attempt {}/{}): {}",
                    session.cursor() + 1,
                    delay,
                    failures,
                    config.chunk_retries,
                    e
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// `base_ms * 2^attempt`, saturating.
fn backoff(base_ms: u64, attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}
