//! Network layer for the weave client.
//!
//! This crate talks to a storage gateway over HTTP: it looks up balances,
//! posts signed transaction headers and delivers payload chunks as the
//! [`weave_core::ChunkTransport`] used by the uploader.

pub mod errors;
pub mod gateway;
pub mod types;

// Re-export commonly used types and functions
pub use errors::NetworkError;
pub use gateway::GatewayClient;
pub use types::{ChunkEnvelope, TagEnvelope, TxEnvelope};
