//! Wallet key file and the signer derived from it.

use crate::errors::WalletError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bip32::{Mnemonic, XPrv};
use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use weave_core::{CapabilityError, Signer};

/// A wallet key file: a BIP39 mnemonic and the account to derive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// The BIP39 mnemonic for the wallet
    mnemonic: String,
    /// The current account index
    account_index: u32,
}

impl Wallet {
    /// Creates a new wallet with a random mnemonic.
    pub fn new() -> Result<Self, WalletError> {
        let mnemonic = Mnemonic::random(OsRng, Default::default());

        Ok(Self {
            mnemonic: mnemonic.phrase().to_string(),
            account_index: 0,
        })
    }

    /// Loads a wallet from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let wallet = serde_json::from_str(&contents)?;
        Ok(wallet)
    }

    /// Saves a wallet to a file, refusing to overwrite an existing one.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), WalletError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(WalletError::WalletError(format!(
                "{} already exists",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(self.to_json()?.as_bytes())?;
        Ok(())
    }

    /// The key file contents as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, WalletError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    pub fn set_account_index(&mut self, index: u32) {
        self.account_index = index;
    }

    /// Derives the ed25519 signing key for the current account.
    pub fn signing_key(&self) -> Result<SigningKey, WalletError> {
        let mnemonic = Mnemonic::new(self.mnemonic.as_str(), Default::default())?;
        let seed = mnemonic.to_seed("");

        let root = XPrv::derive_from_path(
            seed,
            &format!("m/44'/0'/{}'", self.account_index).parse()?,
        )?;

        // ed25519 secret = SHA-256 of the BIP32 private key bytes
        let secret = root.to_bytes();
        let mut hasher = Sha256::new();
        hasher.update(secret);
        let result = hasher.finalize();

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&result);
        Ok(SigningKey::from_bytes(&seed))
    }

    /// Derives the signer for the current account.
    pub fn signer(&self) -> Result<WalletSigner, WalletError> {
        Ok(WalletSigner {
            key: self.signing_key()?,
        })
    }

    /// The network address of the current account.
    pub fn address(&self) -> Result<String, WalletError> {
        Ok(self.signer()?.address())
    }
}

/// Signs transactions with a wallet's derived key.
#[derive(Debug)]
pub struct WalletSigner {
    key: SigningKey,
}

impl WalletSigner {
    /// Address = unpadded base64url of SHA-256(public key).
    pub fn address(&self) -> String {
        address_of(self.key.verifying_key().as_bytes())
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }
}

impl Signer for WalletSigner {
    fn owner(&self) -> Vec<u8> {
        self.key.verifying_key().to_bytes().to_vec()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CapabilityError> {
        let signature = self.key.try_sign(message)?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Derives the address for raw public key bytes.
pub fn address_of(public_key: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(public_key);
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}
