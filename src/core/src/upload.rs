//! Chunked, resumable payload upload.
//!
//! An [`UploadSession`] splits a signed transaction's payload into chunks and
//! tracks a cursor over them. [`ChunkedUploader::upload_next`] sends one chunk
//! per call. Retry policy belongs to the caller: a failed call leaves the
//! session untouched and can simply be repeated.

use crate::capability::ChunkTransport;
use crate::errors::CoreError;
use crate::types::{Transaction, TxId};
use tracing::{debug, warn};

/// A slice of the payload and its delivery state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Byte position within the payload
    pub offset: u64,
    /// The chunk bytes, borrowed from the transaction payload
    pub data: &'a [u8],
    /// Whether the transport has acknowledged this chunk
    pub sent: bool,
}

/// Lifecycle of an upload session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No chunk sent yet
    Pending,
    /// Some but not all chunks sent
    InProgress,
    /// Every chunk sent
    Complete,
}

/// Outcome of a successful [`ChunkedUploader::upload_next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkResult {
    /// The chunk at `index` was delivered and the cursor advanced.
    Sent {
        /// Index of the delivered chunk
        index: usize,
        /// Payload offset of the delivered chunk
        offset: u64,
        /// Length of the delivered chunk
        len: usize,
    },
    /// The session was already complete; nothing was sent.
    AlreadyComplete,
}

/// Upload progress for one signed transaction.
///
/// Must be driven by one caller at a time.
#[derive(Debug, Clone)]
pub struct UploadSession<'a> {
    tx: &'a Transaction,
    tx_id: TxId,
    chunks: Vec<Chunk<'a>>,
    cursor: usize,
}

impl<'a> UploadSession<'a> {
    fn new(tx: &'a Transaction, chunk_size: usize) -> Result<Self, CoreError> {
        let tx_id = tx.id().ok_or(CoreError::NotSigned)?;
        if chunk_size == 0 {
            return Err(CoreError::InvalidChunkSize(chunk_size));
        }

        let chunks = split_payload(tx.payload(), chunk_size);
        debug!(
            "Upload session for {}: {} bytes in {} chunks of up to {} bytes",
            tx_id,
            tx.data_size(),
            chunks.len(),
            chunk_size
        );

        Ok(Self {
            tx,
            tx_id,
            chunks,
            cursor: 0,
        })
    }

    /// The transaction being uploaded.
    pub fn transaction(&self) -> &'a Transaction {
        self.tx
    }

    pub fn tx_id(&self) -> TxId {
        self.tx_id
    }

    pub fn chunks(&self) -> &[Chunk<'a>] {
        &self.chunks
    }

    /// Index of the next chunk to send.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn uploaded_chunks(&self) -> usize {
        self.cursor
    }

    pub fn uploaded_bytes(&self) -> u64 {
        self.chunks[..self.cursor]
            .iter()
            .map(|chunk| chunk.data.len() as u64)
            .sum()
    }

    /// Percentage of chunks delivered, 100 for an empty payload.
    pub fn pct_complete(&self) -> u8 {
        if self.chunks.is_empty() {
            return 100;
        }
        ((self.cursor * 100) / self.chunks.len()) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.chunks.len()
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else if self.cursor == 0 {
            SessionState::Pending
        } else {
            SessionState::InProgress
        }
    }
}

/// Splits `payload` into consecutive slices of at most `chunk_size` bytes.
fn split_payload(payload: &[u8], chunk_size: usize) -> Vec<Chunk<'_>> {
    payload
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, data)| Chunk {
            offset: (i * chunk_size) as u64,
            data,
            sent: false,
        })
        .collect()
}

/// Drives upload sessions over a [`ChunkTransport`].
#[derive(Debug, Clone)]
pub struct ChunkedUploader<T> {
    transport: T,
}

impl<T: ChunkTransport> ChunkedUploader<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts a session for a signed transaction.
    pub fn start_session<'a>(
        &self,
        tx: &'a Transaction,
        chunk_size: usize,
    ) -> Result<UploadSession<'a>, CoreError> {
        UploadSession::new(tx, chunk_size)
    }

    /// Rebuilds a session whose first `cursor` chunks were delivered earlier.
    ///
    /// `cursor` is clamped to the chunk count.
    pub fn resume_session<'a>(
        &self,
        tx: &'a Transaction,
        chunk_size: usize,
        cursor: usize,
    ) -> Result<UploadSession<'a>, CoreError> {
        let mut session = UploadSession::new(tx, chunk_size)?;
        session.cursor = cursor.min(session.chunks.len());
        for chunk in &mut session.chunks[..session.cursor] {
            chunk.sent = true;
        }
        Ok(session)
    }

    /// Sends the chunk at the cursor.
    ///
    /// On success the chunk is marked sent and the cursor advances by one.
    /// On transport failure nothing changes, so the call can be repeated.
    pub async fn upload_next(
        &self,
        session: &mut UploadSession<'_>,
    ) -> Result<ChunkResult, CoreError> {
        if session.is_complete() {
            return Ok(ChunkResult::AlreadyComplete);
        }

        let index = session.cursor;
        let (offset, data) = {
            let chunk = &session.chunks[index];
            (chunk.offset, chunk.data)
        };

        if let Err(e) = self
            .transport
            .send_chunk(&session.tx_id, offset, data)
            .await
        {
            warn!(
                "Chunk {}/{} of {} failed at offset {}: {}",
                index + 1,
                session.chunks.len(),
                session.tx_id,
                offset,
                e
            );
            return Err(CoreError::TransportFailure {
                offset,
                reason: e.to_string(),
            });
        }

        session.chunks[index].sent = true;
        session.cursor += 1;
        debug!(
            "Chunk {}/{} of {} sent ({} bytes at offset {})",
            index + 1,
            session.chunks.len(),
            session.tx_id,
            data.len(),
            offset
        );

        Ok(ChunkResult::Sent {
            index,
            offset,
            len: data.len(),
        })
    }

    pub fn is_complete(&self, session: &UploadSession<'_>) -> bool {
        session.is_complete()
    }
}
