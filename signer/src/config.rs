//! Authorization service configuration with TOML file support.
//!
//! ```toml
//! distribution = "distribution.json"
//! signing_seed = "<64 hex digits>"
//! request_mac_key = "<hex>"
//! ```
//!
//! Secrets may be left out of the file and supplied by the caller instead
//! (the CLI reads them from the environment).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use claimdrop_types::PrivateKey;

use crate::SignerError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SignerConfig {
    /// JSON distribution list the tree is built from.
    #[serde(default = "default_distribution")]
    pub distribution: PathBuf,

    /// Hex Ed25519 seed of the signer key.
    #[serde(default)]
    pub signing_seed: Option<String>,

    /// Hex HMAC key shared with request senders.
    #[serde(default)]
    pub request_mac_key: Option<String>,
}

fn default_distribution() -> PathBuf {
    PathBuf::from("./distribution.json")
}

impl SignerConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SignerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SignerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SignerError> {
        toml::from_str(s).map_err(|e| SignerError::Config(e.to_string()))
    }

    pub fn signing_key(&self) -> Result<PrivateKey, SignerError> {
        let seed = self
            .signing_seed
            .as_deref()
            .ok_or_else(|| SignerError::Config("signing_seed is not set".into()))?;
        seed.trim()
            .parse()
            .map_err(|e| SignerError::Config(format!("signing_seed: {e}")))
    }

    /// The HMAC key, or `None` when request authentication is disabled.
    pub fn mac_key(&self) -> Result<Option<Vec<u8>>, SignerError> {
        self.request_mac_key
            .as_deref()
            .map(|k| hex::decode(k.trim()))
            .transpose()
            .map_err(|e| SignerError::Config(format!("request_mac_key: {e}")))
    }
}
