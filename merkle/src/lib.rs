//! Merkle commitment over the distribution list.
//!
//! The list of `(user_id, address, amount)` entries is committed to a single
//! [`MerkleRoot`](claimdrop_types::MerkleRoot). Entries are ordered by
//! ascending `user_id`; each level pairs adjacent nodes left to right, and the
//! lone last node of an odd-sized level is carried up unchanged.

pub mod distribution;
pub mod error;
pub mod tree;
pub mod verify;

pub use distribution::{load_distribution, parse_distribution, ProofRecord};
pub use error::MerkleError;
pub use tree::DistributionTree;
pub use verify::{compute_root, verify, verify_entry, MAX_PROOF_DEPTH};
