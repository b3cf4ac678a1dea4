//! Wire types exchanged with the gateway.

use crate::errors::NetworkError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use weave_core::{Transaction, TxId};

/// A tag as sent to the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEnvelope {
    /// The tag name
    pub name: String,
    /// The tag value
    pub value: String,
}

/// Signed transaction header posted to `/tx`.
///
/// Binary fields are unpadded URL-safe base64; integers are decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEnvelope {
    /// The transaction id
    pub id: TxId,
    /// The signer's public key
    pub owner: String,
    /// The recipient address
    pub target: String,
    /// The quantity in base units
    pub quantity: String,
    /// The tags in attachment order
    pub tags: Vec<TagEnvelope>,
    /// The payload length in bytes
    pub data_size: String,
    /// SHA-256 of the payload
    pub data_digest: String,
    /// The inline payload, empty when it is delivered as chunks
    pub data: String,
    /// The signature
    pub signature: String,
}

impl TxEnvelope {
    /// Encodes a signed transaction, inlining the payload if `with_payload` is set.
    pub fn from_transaction(tx: &Transaction, with_payload: bool) -> Result<Self, NetworkError> {
        let (id, owner, signature) = match (tx.id(), tx.owner(), tx.signature()) {
            (Some(id), Some(owner), Some(signature)) => (id, owner, signature),
            _ => return Err(NetworkError::NotSigned),
        };

        Ok(Self {
            id,
            owner: URL_SAFE_NO_PAD.encode(owner),
            target: tx.target().to_string(),
            quantity: tx.quantity().to_string(),
            tags: tx
                .tags()
                .iter()
                .map(|tag| TagEnvelope {
                    name: tag.name.clone(),
                    value: tag.value.clone(),
                })
                .collect(),
            data_size: tx.data_size().to_string(),
            data_digest: URL_SAFE_NO_PAD.encode(tx.payload_digest()),
            data: if with_payload {
                URL_SAFE_NO_PAD.encode(tx.payload())
            } else {
                String::new()
            },
            signature: URL_SAFE_NO_PAD.encode(signature),
        })
    }
}

/// One payload chunk posted to `/chunk`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkEnvelope {
    /// The transaction the chunk belongs to
    pub tx_id: TxId,
    /// Byte offset of the chunk within the payload
    pub offset: String,
    /// The chunk bytes
    pub chunk: String,
}

impl ChunkEnvelope {
    pub fn new(tx_id: &TxId, offset: u64, data: &[u8]) -> Self {
        Self {
            tx_id: *tx_id,
            offset: offset.to_string(),
            chunk: URL_SAFE_NO_PAD.encode(data),
        }
    }
}

impl fmt::Display for TxEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxEnvelope {{ id: {}, target: {:?}, quantity: {}, data_size: {}, inline: {} }}",
            self.id,
            self.target,
            self.quantity,
            self.data_size,
            !self.data.is_empty()
        )
    }
}

impl fmt::Display for ChunkEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChunkEnvelope {{ tx_id: {}, offset: {}, encoded_len: {} }}",
            self.tx_id,
            self.offset,
            self.chunk.len()
        )
    }
}
