//! Capabilities the core calls into but does not implement.

use crate::types::TxId;
use async_trait::async_trait;

/// Error type returned by capability implementations.
pub type CapabilityError = Box<dyn std::error::Error + Send + Sync>;

/// Produces signatures over transaction signing messages.
pub trait Signer {
    /// Public key bytes recorded as the transaction owner.
    fn owner(&self) -> Vec<u8>;

    /// Signs `message`, returning the raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CapabilityError>;
}

impl<S: Signer + ?Sized> Signer for &S {
    fn owner(&self) -> Vec<u8> {
        (**self).owner()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CapabilityError> {
        (**self).sign(message)
    }
}

/// Delivers one payload chunk to a remote gateway.
///
/// Implementations must accept repeated delivery of the same chunk, since
/// callers retry failed sends.
#[async_trait]
pub trait ChunkTransport {
    async fn send_chunk(&self, tx_id: &TxId, offset: u64, data: &[u8])
        -> Result<(), CapabilityError>;
}

#[async_trait]
impl<T: ChunkTransport + Sync + ?Sized> ChunkTransport for &T {
    async fn send_chunk(
        &self,
        tx_id: &TxId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), CapabilityError> {
        (**self).send_chunk(tx_id, offset, data).await
    }
}
