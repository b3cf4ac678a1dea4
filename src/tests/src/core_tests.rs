//! Tests for the core crate against a real wallet signer.

use async_trait::async_trait;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use rand::Rng;
use std::sync::Mutex;
use tokio::runtime::Runtime;
use weave_cli::Wallet;
use weave_core::{
    CapabilityError, ChunkResult, ChunkTransport, ChunkedUploader, CoreError, SessionState, Tag,
    TransactionBuilder, TxId,
};

/// Keeps delivered chunks in memory, failing every call while `down` is set.
#[derive(Default)]
struct MemoryTransport {
    received: Mutex<Vec<(u64, Vec<u8>)>>,
    down: Mutex<bool>,
}

#[async_trait]
impl ChunkTransport for MemoryTransport {
    async fn send_chunk(
        &self,
        _tx_id: &TxId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), CapabilityError> {
        if *self.down.lock().unwrap() {
            return Err("connection reset".into());
        }
        self.received.lock().unwrap().push((offset, data.to_vec()));
        Ok(())
    }
}

/// Tests that a wallet signature verifies over the signing message.
#[test]
fn test_wallet_signature_verifies() {
    let wallet = Wallet::new().unwrap();
    let signer = wallet.signer().unwrap();
    let builder = TransactionBuilder::new(1024);

    let mut tx = builder
        .build("recipient", 7u64, b"payload".to_vec(), vec![Tag::new("App", "test")])
        .unwrap();
    let id = builder.sign(&mut tx, &signer).unwrap();

    let public = VerifyingKey::try_from(tx.owner().unwrap()).unwrap();
    let signature = Signature::try_from(tx.signature().unwrap()).unwrap();
    public.verify(&tx.signing_message(), &signature).unwrap();

    assert_eq!(id, TxId::from_signature(tx.signature().unwrap()));
}

/// Tests that the id is a function of the signed contents.
#[test]
fn test_id_is_deterministic() {
    let wallet = Wallet::new().unwrap();
    let signer = wallet.signer().unwrap();
    let builder = TransactionBuilder::new(1024);

    let sign = |quantity: u64| {
        let mut tx = builder.build("dest", quantity, Vec::new(), Vec::new()).unwrap();
        builder.sign(&mut tx, &signer).unwrap()
    };

    // ed25519 signatures are deterministic, so equal contents give equal ids.
    assert_eq!(sign(1), sign(1));
    assert_ne!(sign(1), sign(2));
}

/// Tests the empty-target transfer scenario.
#[test]
fn test_build_empty_target() {
    let builder = TransactionBuilder::new(0);
    let tx = builder.build("", 5, Vec::new(), Vec::new()).unwrap();
    assert_eq!(tx.target(), "");
    assert_eq!(tx.quantity(), 5);
    assert!(tx.id().is_none());
}

/// Tests that a signed transaction is frozen.
#[test]
fn test_signed_transaction_is_frozen() {
    let signer = Wallet::new().unwrap().signer().unwrap();
    let builder = TransactionBuilder::new(64);
    let mut tx = builder.build("dest", 1, Vec::new(), Vec::new()).unwrap();

    let first = builder.sign(&mut tx, &signer).unwrap();
    assert_eq!(builder.sign(&mut tx, &signer), Err(CoreError::AlreadySigned));
    assert_eq!(
        builder.attach_tag(&mut tx, "Content-Type", "text/plain"),
        Err(CoreError::AlreadySigned)
    );
    assert_eq!(tx.id(), Some(first));
}

/// Tests a full upload that survives an outage midway.
#[test]
fn test_upload_with_outage() {
    let rt = Runtime::new().unwrap();
    let signer = Wallet::new().unwrap().signer().unwrap();
    let builder = TransactionBuilder::new(1 << 20);

    let mut payload = vec![0u8; 250_000];
    rand::thread_rng().fill(&mut payload[..]);
    let mut tx = builder.build("", 0, payload.clone(), Vec::new()).unwrap();
    builder.sign(&mut tx, &signer).unwrap();

    let transport = MemoryTransport::default();
    let uploader = ChunkedUploader::new(&transport);
    let mut session = uploader.start_session(&tx, 100_000).unwrap();
    assert_eq!(session.total_chunks(), 3);

    rt.block_on(async {
        assert!(matches!(
            uploader.upload_next(&mut session).await,
            Ok(ChunkResult::Sent { index: 0, .. })
        ));

        *transport.down.lock().unwrap() = true;
        let err = uploader.upload_next(&mut session).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.state(), SessionState::InProgress);

        *transport.down.lock().unwrap() = false;
        while !uploader.is_complete(&session) {
            uploader.upload_next(&mut session).await.unwrap();
        }
        assert_eq!(
            uploader.upload_next(&mut session).await,
            Ok(ChunkResult::AlreadyComplete)
        );
    });

    let received = transport.received.lock().unwrap();
    let lengths: Vec<_> = received.iter().map(|(_, data)| data.len()).collect();
    assert_eq!(lengths, vec![100_000, 100_000, 50_000]);
    let joined: Vec<u8> = received.iter().flat_map(|(_, data)| data.clone()).collect();
    assert_eq!(joined, payload);
}
