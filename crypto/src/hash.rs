//! Blake2b hashing for distribution leaves, tree nodes and claim messages.
//!
//! Every hash input starts with a domain tag so a leaf can never be replayed
//! as an interior node or as a signed claim message. Integers are encoded
//! big-endian at fixed width:
//!
//! ```text
//! leaf    = H("CLAIMDROP_LEAF_V1"  || u64(user_id) || address[32] || u128(amount))
//! node    = H("CLAIMDROP_NODE_V1"  || left[32] || right[32])
//! message = H("CLAIMDROP_CLAIM_V1" || u64(user_id) || user_address[32]
//!             || delegate_address[32] || u128(amount))
//! ```

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use claimdrop_types::{ClaimRequest, DistributionEntry, LeafHash, MessageHash, NodeHash};

type Blake2b256 = Blake2b<U32>;

pub const DOMAIN_LEAF: &[u8] = b"CLAIMDROP_LEAF_V1";
pub const DOMAIN_NODE: &[u8] = b"CLAIMDROP_NODE_V1";
pub const DOMAIN_CLAIM: &[u8] = b"CLAIMDROP_CLAIM_V1";

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Leaf hash of one distribution entry.
pub fn hash_leaf(entry: &DistributionEntry) -> LeafHash {
    LeafHash::new(blake2b_256_multi(&[
        DOMAIN_LEAF,
        &entry.user_id.to_be_bytes(),
        entry.address.as_bytes(),
        &entry.amount.raw().to_be_bytes(),
    ]))
}

/// Parent of two sibling nodes, `left` first.
pub fn hash_node(left: &NodeHash, right: &NodeHash) -> NodeHash {
    NodeHash::new(blake2b_256_multi(&[
        DOMAIN_NODE,
        left.as_bytes(),
        right.as_bytes(),
    ]))
}

/// Hash of the canonical claim payload. The delegate is always bound.
pub fn hash_claim_message(request: &ClaimRequest) -> MessageHash {
    MessageHash::new(blake2b_256_multi(&[
        DOMAIN_CLAIM,
        &request.user_id.to_be_bytes(),
        request.user_address.as_bytes(),
        request.delegate_address.as_bytes(),
        &request.amount.raw().to_be_bytes(),
    ]))
}
