//! Configuration for the CLI wallet.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for the CLI wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// The gateway to talk to. Must accept the `/tx` and `/chunk` JSON
    /// envelopes this client posts; the default is a local gateway.
    pub gateway: String,
    /// Maximum bytes per uploaded chunk
    pub chunk_size: usize,
    /// Largest payload a transaction may carry
    pub max_payload_size: usize,
    /// Attempts per chunk after the first failure
    pub chunk_retries: u32,
    /// Delay before the first retry, doubled on each further retry
    pub retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway: "http://localhost:1984".to_string(),
            chunk_size: 256 * 1024,
            max_payload_size: 100 * 1024 * 1024,
            chunk_retries: 5,
            retry_delay_ms: 1000,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Loads `explicit` if given, else the per-user config file if it exists,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/weave/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        let mut dir = dirs::config_dir()?;
        dir.push("weave");
        dir.push("config.json");
        Some(dir)
    }
}
