//! Transaction assembly and signing.
//!
//! A transaction is built unsigned, may collect tags, and is then frozen by
//! signing. Tags and payload are part of the signed content, so every
//! mutation after signing is rejected.

use crate::capability::Signer;
use crate::errors::CoreError;
use crate::types::{Balance, Seal, Tag, Transaction, TxId};
use std::fmt;
use tracing::debug;

/// Builds, tags and signs transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionBuilder {
    max_payload_size: usize,
}

impl TransactionBuilder {
    /// Creates a builder that rejects payloads larger than `max_payload_size` bytes.
    pub fn new(max_payload_size: usize) -> Self {
        Self { max_payload_size }
    }

    /// The configured payload ceiling in bytes.
    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    /// Constructs an unsigned transaction.
    ///
    /// `quantity` is in base units; any integer type is accepted and a
    /// negative value is rejected with [`CoreError::InvalidAmount`]. The target
    /// is not validated beyond being a string.
    pub fn build<Q>(
        &self,
        target: impl Into<String>,
        quantity: Q,
        payload: Vec<u8>,
        tags: Vec<Tag>,
    ) -> Result<Transaction, CoreError>
    where
        Q: TryInto<Balance> + fmt::Display + Copy,
    {
        let quantity: Balance = quantity.try_into().map_err(|_| {
            CoreError::InvalidAmount(format!(
                "{} is not a non-negative base-unit quantity",
                quantity
            ))
        })?;

        if payload.len() > self.max_payload_size {
            return Err(CoreError::PayloadTooLarge {
                size: payload.len(),
                max: self.max_payload_size,
            });
        }

        let tx = Transaction {
            target: target.into(),
            quantity,
            payload,
            tags,
            seal: None,
        };
        debug!("Built {}", tx);
        Ok(tx)
    }

    /// Appends a tag. Fails once the transaction is signed.
    pub fn attach_tag(
        &self,
        tx: &mut Transaction,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        if tx.is_signed() {
            return Err(CoreError::AlreadySigned);
        }
        tx.tags.push(Tag::new(name, value));
        Ok(())
    }

    /// Signs the transaction and returns its new identifier.
    ///
    /// Signature, owner and id are stored together only after the signer
    /// succeeds; on failure the transaction is left unsigned.
    pub fn sign<S: Signer>(&self, tx: &mut Transaction, signer: &S) -> Result<TxId, CoreError> {
        if tx.is_signed() {
            return Err(CoreError::AlreadySigned);
        }

        let message = tx.signing_message();
        let signature = signer
            .sign(&message)
            .map_err(|e| CoreError::SigningFailed(e.to_string()))?;
        let id = TxId::from_signature(&signature);

        tx.seal = Some(Seal {
            owner: signer.owner(),
            signature,
            id,
        });
        debug!("Signed transaction {}", id);
        Ok(id)
    }
}
