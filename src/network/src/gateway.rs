//! HTTP client for a storage gateway.

use crate::errors::NetworkError;
use crate::types::{ChunkEnvelope, TxEnvelope};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};
use weave_core::{Balance, CapabilityError, ChunkTransport, Transaction, TxId};

/// Talks to one gateway over HTTP.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    url: String,
    client: Client,
}

impl GatewayClient {
    /// Creates a client for the gateway at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Creates a client reusing an existing `reqwest` client.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        Self { url, client }
    }

    /// The gateway base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL where the data of transaction `id` can be retrieved.
    pub fn retrieval_url(&self, id: &TxId) -> String {
        format!("{}/{}", self.url, id)
    }

    /// Fetches the balance of `address` in base units.
    pub async fn balance(&self, address: &str) -> Result<Balance, NetworkError> {
        let url = format!("{}/wallet/{}/balance", self.url, address);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let body = check_status(response).await?;

        let body = body.trim();
        let balance = body.parse::<Balance>().map_err(|e| {
            NetworkError::InvalidResponse(format!("invalid balance {:?}: {}", body, e))
        })?;
        Ok(balance)
    }

    /// Posts a signed transaction header.
    ///
    /// With `with_payload` the payload travels inline; otherwise it must
    /// follow as chunks.
    pub async fn post_transaction(
        &self,
        tx: &Transaction,
        with_payload: bool,
    ) -> Result<TxId, NetworkError> {
        let envelope = TxEnvelope::from_transaction(tx, with_payload)?;
        let url = format!("{}/tx", self.url);
        debug!("POST {} {}", url, envelope);

        let response = self.client.post(&url).json(&envelope).send().await?;
        check_status(response).await?;

        info!("Gateway accepted transaction {}", envelope.id);
        Ok(envelope.id)
    }

    /// Posts one payload chunk.
    pub async fn post_chunk(
        &self,
        tx_id: &TxId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), NetworkError> {
        let envelope = ChunkEnvelope::new(tx_id, offset, data);
        let url = format!("{}/chunk", self.url);
        debug!("POST {} {}", url, envelope);

        let response = self.client.post(&url).json(&envelope).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ChunkTransport for GatewayClient {
    async fn send_chunk(
        &self,
        tx_id: &TxId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), CapabilityError> {
        self.post_chunk(tx_id, offset, data).await?;
        Ok(())
    }
}

/// Returns the body of a successful response, or `UnexpectedStatus`.
async fn check_status(response: Response) -> Result<String, NetworkError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(NetworkError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
