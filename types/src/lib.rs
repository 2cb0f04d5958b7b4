//! Fundamental types for the claimdrop token distributor.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, hashes, token amounts, timestamps, key material, and the
//! claim data that travels between the authorization service and the verifier.

pub mod address;
pub mod amount;
pub mod claim;
pub mod error;
pub mod hash;
mod hexbytes;
pub mod keys;
pub mod time;

pub use address::Address;
pub use amount::TokenAmount;
pub use claim::{
    ClaimAuthorization, ClaimRequest, DistributionEntry, MerkleProof, ProofStep, Side, UserId,
};
pub use error::ParseError;
pub use hash::{LeafHash, MerkleRoot, MessageHash, NodeHash};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
