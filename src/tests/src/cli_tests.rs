//! Tests for the CLI commands against the mock gateway.

use crate::mock_gateway::MockGateway;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::runtime::Runtime;
use weave_cli::commands::{balance, create_wallet, send, upload};
use weave_cli::wallet::address_of;
use weave_cli::{ClientConfig, Wallet, WalletError};
use weave_core::CoreError;

fn config_for(gateway: &MockGateway) -> ClientConfig {
    ClientConfig {
        gateway: gateway.url().to_string(),
        chunk_size: 1024,
        max_payload_size: 64 * 1024,
        chunk_retries: 3,
        retry_delay_ms: 1,
    }
}

fn wallet_file(dir: &TempDir) -> (PathBuf, Wallet) {
    let path = dir.path().join("wallet.json");
    let wallet = Wallet::new().unwrap();
    wallet.save(&path).unwrap();
    (path, wallet)
}

fn random_file(dir: &Path, name: &str, len: usize) -> (PathBuf, Vec<u8>) {
    let mut data = vec![0u8; len];
    rand::thread_rng().fill(&mut data[..]);
    let path = dir.join(name);
    std::fs::write(&path, &data).unwrap();
    (path, data)
}

/// Tests wallet creation with and without saving.
#[test]
fn test_create_wallet() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("new-wallet.json");

    rt.block_on(async {
        let (wallet, address) = create_wallet::run(Some(out.as_path())).await.unwrap();
        let saved = Wallet::load(&out).unwrap();
        assert_eq!(saved, wallet);
        assert_eq!(saved.address().unwrap(), address);

        // Existing key files are never overwritten.
        assert!(create_wallet::run(Some(out.as_path())).await.is_err());
        assert_eq!(Wallet::load(&out).unwrap(), wallet);

        let (unsaved, _) = create_wallet::run(None).await.unwrap();
        assert_ne!(unsaved.mnemonic(), wallet.mnemonic());
    });
}

/// Tests the balance command.
#[test]
fn test_balance_command() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, wallet) = wallet_file(&dir);
    let address = wallet.address().unwrap();

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        gateway.set_balance(&address, 2_500_000_000_000u128);

        let report = balance::run(&config_for(&gateway), &path).await.unwrap();
        assert_eq!(report.address, address);
        assert_eq!(report.base, 2_500_000_000_000);
        assert_eq!(report.display, "2.5");
    });
}

/// Tests that a missing wallet file is reported.
#[test]
fn test_missing_wallet() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        let result = balance::run(&config_for(&gateway), dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(WalletError::WalletError(_))));
        assert!(gateway.requests().is_empty());
    });
}

/// Tests the send command.
#[test]
fn test_send_command() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, wallet) = wallet_file(&dir);

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        let id = send::run(&config_for(&gateway), &path, "recipient-address", "0.25")
            .await
            .unwrap();

        let posted = gateway.transactions();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["id"], id.to_string());
        assert_eq!(posted[0]["target"], "recipient-address");
        assert_eq!(posted[0]["quantity"], "250000000000");
        assert_eq!(posted[0]["data_size"], "0");

        let public_key = wallet.signer().unwrap().public_key().to_bytes();
        assert_eq!(posted[0]["owner"], URL_SAFE_NO_PAD.encode(public_key));
        assert_eq!(address_of(&public_key), wallet.address().unwrap());
    });
}

/// Tests that an invalid amount stops before anything is posted.
#[test]
fn test_send_invalid_amount() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, _) = wallet_file(&dir);

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        for amount in ["-1", "lots", ""] {
            let result = send::run(&config_for(&gateway), &path, "dest", amount).await;
            assert!(
                matches!(result, Err(WalletError::CoreError(CoreError::InvalidAmount(_)))),
                "accepted {:?}",
                amount
            );
        }
        assert!(gateway.requests().is_empty());
    });
}

/// Tests the upload command, including retried chunks.
#[test]
fn test_upload_command() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, _) = wallet_file(&dir);
    let (file, data) = random_file(dir.path(), "picture.png", 5000);

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        gateway.fail_next_chunks(2);

        let report = upload::run(&config_for(&gateway), &path, &file, None)
            .await
            .unwrap();

        assert_eq!(report.content_type, "image/png");
        assert_eq!(report.chunks, 5);
        assert_eq!(report.bytes, 5000);
        assert_eq!(report.url, format!("{}/{}", gateway.url(), report.id));

        let posted = gateway.transactions();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["id"], report.id.to_string());
        assert_eq!(posted[0]["tags"][0]["name"], "Content-Type");
        assert_eq!(posted[0]["tags"][0]["value"], "image/png");

        assert_eq!(gateway.accepted_chunks().len(), 5);
        assert_eq!(gateway.reassembled_payload(), data);
    });
}

/// Tests that an explicit content type wins over the extension.
#[test]
fn test_upload_explicit_content_type() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, _) = wallet_file(&dir);
    let (file, _) = random_file(dir.path(), "image.bin", 10);

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        let report = upload::run(&config_for(&gateway), &path, &file, Some("image/jpg"))
            .await
            .unwrap();
        assert_eq!(report.content_type, "image/jpg");
        assert_eq!(gateway.transactions()[0]["tags"][0]["value"], "image/jpg");
    });
}

/// Tests that an upload gives up once retries are exhausted.
#[test]
fn test_upload_retries_exhausted() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, _) = wallet_file(&dir);
    let (file, _) = random_file(dir.path(), "data.bin", 3000);

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        let config = config_for(&gateway);
        gateway.fail_next_chunks(100);

        let result = upload::run(&config, &path, &file, None).await;
        assert!(matches!(
            result,
            Err(WalletError::CoreError(CoreError::TransportFailure { offset: 0, .. }))
        ));

        // One initial attempt plus the configured retries.
        let attempts = gateway
            .requests()
            .iter()
            .filter(|r| r.path == "/chunk")
            .count();
        assert_eq!(attempts, 1 + config.chunk_retries as usize);
    });
}

/// Tests that oversized files are rejected before anything is posted.
#[test]
fn test_upload_too_large() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let (path, _) = wallet_file(&dir);
    let (file, _) = random_file(dir.path(), "big.bin", 64 * 1024 + 1);

    rt.block_on(async {
        let gateway = MockGateway::start().await.unwrap();
        let result = upload::run(&config_for(&gateway), &path, &file, None).await;
        assert!(matches!(
            result,
            Err(WalletError::CoreError(CoreError::PayloadTooLarge { .. }))
        ));
        assert!(gateway.requests().is_empty());
    });
}
