//! Cryptographic primitives for claimdrop.
//!
//! - **Blake2b-256** with domain separation for leaves, tree nodes and claim messages
//! - **Ed25519** for claim authorization signatures
//! - **HMAC-SHA256** for authenticating requests to the authorization service
//! - Checksummed `cdrp_` address text encoding

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod mac;
pub mod sign;

pub use address::{decode_address, encode_address, parse_address, validate_address};
pub use error::CryptoError;
pub use hash::{
    blake2b_256, blake2b_256_multi, hash_claim_message, hash_leaf, hash_node, DOMAIN_CLAIM,
    DOMAIN_LEAF, DOMAIN_NODE,
};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use mac::{compute_request_mac, verify_request_mac};
pub use sign::{sign_claim, sign_message, verify_claim_signature, verify_signature};
