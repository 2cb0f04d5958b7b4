#![no_main]

use claimdrop_merkle::{compute_root, verify, MAX_PROOF_DEPTH};
use claimdrop_types::{LeafHash, MerkleProof, MerkleRoot, NodeHash, ProofStep, Side};
use libfuzzer_sys::fuzz_target;

// Arbitrary proofs never panic, and any proof within the depth limit
// verifies against the root it folds to.
fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }
    let mut leaf = [0u8; 32];
    leaf.copy_from_slice(&data[..32]);
    let mut root = [0u8; 32];
    root.copy_from_slice(&data[32..64]);
    let leaf = LeafHash::new(leaf);

    let steps = data[64..]
        .chunks_exact(33)
        .map(|chunk| {
            let mut sibling = [0u8; 32];
            sibling.copy_from_slice(&chunk[1..]);
            let side = if chunk[0] & 1 == 0 { Side::Left } else { Side::Right };
            ProofStep {
                sibling: NodeHash::new(sibling),
                side,
            }
        })
        .collect();
    let proof = MerkleProof::new(steps);

    let _ = verify(&leaf, &proof, &MerkleRoot::new(root));
    match compute_root(&leaf, &proof) {
        Some(folded) => assert!(verify(&leaf, &proof, &folded)),
        None => assert!(proof.len() > MAX_PROOF_DEPTH),
    }
});
