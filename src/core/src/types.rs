//! Core types for the weave client.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Quantity in base units.
pub type Balance = u128;

/// Domain separator prepended to every signing message.
const SIGNING_DOMAIN: &[u8] = b"weave-tx-v1";

/// A name/value pair attached to a transaction. Names need not be unique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag name
    pub name: String,
    /// The tag value
    pub value: String,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Content identifier of a signed transaction: the SHA-256 of its signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TxId(pub [u8; 32]);

impl TxId {
    /// Derives the identifier from raw signature bytes.
    pub fn from_signature(signature: &[u8]) -> Self {
        TxId(sha256(signature))
    }

    /// Returns the raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&URL_SAFE_NO_PAD.encode(self.0))
    }
}

impl FromStr for TxId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| format!("invalid transaction id {:?}: {}", s, e))?;
        if bytes.len() != 32 {
            return Err(format!(
                "invalid transaction id length: {} (expected 32)",
                bytes.len()
            ));
        }
        let mut id = [0u8; 32];
        id.copy_from_slice(&bytes);
        Ok(TxId(id))
    }
}

// Serialized as the base64url string gateways use in paths and JSON.
impl Serialize for TxId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Signature material written in one step when a transaction is signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Seal {
    pub(crate) owner: Vec<u8>,
    pub(crate) signature: Vec<u8>,
    pub(crate) id: TxId,
}

/// A value transfer and/or data-carrying transaction.
///
/// Built unsigned by [`crate::TransactionBuilder`]; once signed, its contents
/// are frozen and [`Transaction::id`] is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) target: String,
    pub(crate) quantity: Balance,
    pub(crate) payload: Vec<u8>,
    pub(crate) tags: Vec<Tag>,
    pub(crate) seal: Option<Seal>,
}

impl Transaction {
    /// The recipient address. May be empty for pure data transactions.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The transferred quantity in base units.
    pub fn quantity(&self) -> Balance {
        self.quantity
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Tags in attachment order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Payload length in bytes.
    pub fn data_size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// SHA-256 of the payload.
    pub fn payload_digest(&self) -> [u8; 32] {
        sha256(&self.payload)
    }

    pub fn is_signed(&self) -> bool {
        self.seal.is_some()
    }

    /// The content identifier, present once signed.
    pub fn id(&self) -> Option<TxId> {
        self.seal.as_ref().map(|seal| seal.id)
    }

    /// The signature bytes, present once signed.
    pub fn signature(&self) -> Option<&[u8]> {
        self.seal.as_ref().map(|seal| seal.signature.as_slice())
    }

    /// The signer's public key bytes, present once signed.
    pub fn owner(&self) -> Option<&[u8]> {
        self.seal.as_ref().map(|seal| seal.owner.as_slice())
    }

    /// Returns the canonical bytes covered by the signature.
    ///
    /// Layout: domain tag, target (u64 length + bytes), quantity (u128),
    /// payload length (u64) + payload SHA-256, tag count (u64), then each tag's
    /// name and value length-prefixed. All integers little-endian.
    pub fn signing_message(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(
            SIGNING_DOMAIN.len() + self.target.len() + 96 + self.tags.len() * 32,
        );
        message.extend_from_slice(SIGNING_DOMAIN);
        put_bytes(&mut message, self.target.as_bytes());

        let mut quantity_bytes = [0u8; 16];
        LittleEndian::write_u128(&mut quantity_bytes, self.quantity);
        message.extend_from_slice(&quantity_bytes);

        put_u64(&mut message, self.data_size());
        message.extend_from_slice(&self.payload_digest());

        put_u64(&mut message, self.tags.len() as u64);
        for tag in &self.tags {
            put_bytes(&mut message, tag.name.as_bytes());
            put_bytes(&mut message, tag.value.as_bytes());
        }
        message
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(
                f,
                "Transaction {{ id: {}, target: {:?}, quantity: {}, data_size: {}, tags: {} }}",
                id,
                self.target,
                self.quantity,
                self.data_size(),
                self.tags.len()
            ),
            None => write!(
                f,
                "Transaction {{ unsigned, target: {:?}, quantity: {}, data_size: {}, tags: {} }}",
                self.target,
                self.quantity,
                self.data_size(),
                self.tags.len()
            ),
        }
    }
}

fn put_u64(buf: &mut Vec<u8>, value: u64) {
    let mut bytes = [0u8; 8];
    LittleEndian::write_u64(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    put_u64(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Computes the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
