//! Core primitives for the weave client.
//!
//! This crate provides the transaction model, the builder that assembles and
//! signs transactions, the chunked uploader that delivers payloads, and the
//! conversion between base and display units. Signing and network transport are
//! external capabilities injected through the traits in [`capability`].

pub mod builder;
pub mod capability;
pub mod errors;
pub mod types;
pub mod units;
pub mod upload;

// Re-export commonly used types
pub use builder::TransactionBuilder;
pub use capability::{CapabilityError, ChunkTransport, Signer};
pub use errors::CoreError;
pub use types::{Balance, Tag, Transaction, TxId};
pub use upload::{Chunk, ChunkResult, ChunkedUploader, SessionState, UploadSession};
