//! Distribution list files and exported proof records.
//!
//! A distribution file is a JSON array of entries:
//!
//! ```json
//! [{ "user_id": 1, "address": "<64 hex digits>", "amount": 100 }]
//! ```

use std::path::Path;

use claimdrop_types::{DistributionEntry, LeafHash, MerkleProof};
use serde::{Deserialize, Serialize};

use crate::error::MerkleError;

/// Everything a claimant needs to prove membership of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub entry: DistributionEntry,
    pub leaf: LeafHash,
    pub proof: MerkleProof,
}

pub fn parse_distribution(json: &str) -> Result<Vec<DistributionEntry>, MerkleError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_distribution(path: impl AsRef<Path>) -> Result<Vec<DistributionEntry>, MerkleError> {
    let contents = std::fs::read_to_string(path)?;
    parse_distribution(&contents)
}
