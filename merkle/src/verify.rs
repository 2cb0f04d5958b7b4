//! Stateless proof verification.

use claimdrop_crypto::{hash_leaf, hash_node};
use claimdrop_types::{DistributionEntry, LeafHash, MerkleProof, MerkleRoot, NodeHash, Side};

/// Deepest proof a tree over `u64` user ids can produce.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Fold `leaf` up through `proof` and return the resulting root. Proofs
/// deeper than [`MAX_PROOF_DEPTH`] are refused without hashing.
pub fn compute_root(leaf: &LeafHash, proof: &MerkleProof) -> Option<MerkleRoot> {
    if proof.len() > MAX_PROOF_DEPTH {
        return None;
    }
    let node = proof
        .steps()
        .iter()
        .fold(NodeHash::from(*leaf), |node, step| match step.side {
            Side::Left => hash_node(&step.sibling, &node),
            Side::Right => hash_node(&node, &step.sibling),
        });
    Some(MerkleRoot::from(node))
}

/// True iff `leaf` was committed under `root`.
pub fn verify(leaf: &LeafHash, proof: &MerkleProof, root: &MerkleRoot) -> bool {
    compute_root(leaf, proof).is_some_and(|computed| computed == *root)
}

pub fn verify_entry(entry: &DistributionEntry, proof: &MerkleProof, root: &MerkleRoot) -> bool {
    verify(&hash_leaf(entry), proof, root)
}
