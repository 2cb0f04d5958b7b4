//! Raw deployment configuration as read from TOML.
//!
//! Amounts are decimal strings because TOML integers stop at `i64`.
//! Addresses may be hex or `cdrp_` text. Times are Unix seconds.
//!
//! ```toml
//! [token]
//! genesis_holder = "cdrp_..."
//! total_supply = "100000000000000000000000000"
//!
//! [timelock]
//! address = "cdrp_..."
//! delay_secs = 172800
//!
//! [distributor]
//! account = "cdrp_..."
//! merkle_root = "<hex>"
//! signer = "<hex public key>"
//! allocation = "15000000000000000000000000"
//! claim_deadline = 1735689600
//!
//! [custody]
//! address = "cdrp_..."
//! allocation = "10000000000000000000000000"
//!
//! [vesting]
//! amount = "1000000000000000000000"
//! begin = 1700000120
//! cliff = 1707257720
//! end = 1714515320
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DeployError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub token: TokenSection,
    pub timelock: TimelockSection,
    pub distributor: DistributorSection,
    pub custody: CustodySection,
    pub vesting: VestingSection,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenSection {
    pub genesis_holder: String,
    pub total_supply: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelockSection {
    /// Governance treasury; also receives swept, unclaimed tokens.
    pub address: String,
    #[serde(default = "default_timelock_delay")]
    pub delay_secs: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributorSection {
    pub account: String,
    pub merkle_root: String,
    pub signer: String,
    pub allocation: String,
    pub claim_deadline: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustodySection {
    pub address: String,
    #[serde(default = "default_zero_amount")]
    pub allocation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VestingSection {
    #[serde(default = "default_zero_amount")]
    pub amount: String,
    pub begin: u64,
    pub cliff: u64,
    pub end: u64,
}

fn default_timelock_delay() -> u64 {
    2 * 24 * 60 * 60
}

fn default_zero_amount() -> String {
    "0".to_string()
}

impl DeploymentConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DeployError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DeployError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, DeployError> {
        toml::from_str(s).map_err(|e| DeployError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, DeployError> {
        toml::to_string_pretty(self).map_err(|e| DeployError::Config(e.to_string()))
    }
}
