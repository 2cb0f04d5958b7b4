//! Tree construction and proof generation.

use std::collections::HashMap;

use claimdrop_crypto::{hash_leaf, hash_node};
use claimdrop_types::{
    DistributionEntry, LeafHash, MerkleProof, MerkleRoot, NodeHash, ProofStep, Side, UserId,
};
use rayon::prelude::*;
use tracing::debug;

use crate::distribution::ProofRecord;
use crate::error::MerkleError;

/// A fully materialised Merkle tree over the distribution list.
///
/// `levels[0]` holds the leaves in `user_id` order; the last level holds
/// exactly one node, the root.
#[derive(Debug, Clone)]
pub struct DistributionTree {
    entries: Vec<DistributionEntry>,
    index: HashMap<UserId, usize>,
    levels: Vec<Vec<NodeHash>>,
    root: MerkleRoot,
}

impl DistributionTree {
    /// Build the tree. Input order does not matter.
    pub fn build(
        entries: impl IntoIterator<Item = DistributionEntry>,
    ) -> Result<Self, MerkleError> {
        let mut entries: Vec<DistributionEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(MerkleError::EmptyDistribution);
        }
        entries.sort_by_key(|e| e.user_id);

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.address.is_zero() {
                return Err(MerkleError::ZeroAddress(entry.user_id));
            }
            if index.insert(entry.user_id, position).is_some() {
                return Err(MerkleError::DuplicateUserId(entry.user_id));
            }
        }

        let leaves: Vec<NodeHash> = entries
            .par_iter()
            .map(|e| NodeHash::from(hash_leaf(e)))
            .collect();

        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next = levels[levels.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_node(left, right),
                    // Lone node is carried up unchanged.
                    _ => pair[0],
                })
                .collect();
            levels.push(next);
        }
        let root = MerkleRoot::from(levels[levels.len() - 1][0]);

        debug!(
            entries = entries.len(),
            depth = levels.len() - 1,
            %root,
            "built distribution tree"
        );

        Ok(Self {
            entries,
            index,
            levels,
            root,
        })
    }

    pub fn root(&self) -> MerkleRoot {
        self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical (`user_id`) order.
    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn entry(&self, user_id: UserId) -> Option<&DistributionEntry> {
        self.index.get(&user_id).map(|&i| &self.entries[i])
    }

    pub fn leaf(&self, user_id: UserId) -> Result<LeafHash, MerkleError> {
        let &position = self
            .index
            .get(&user_id)
            .ok_or(MerkleError::UnknownUser(user_id))?;
        Ok(LeafHash::new(*self.levels[0][position].as_bytes()))
    }

    /// Sibling path from `user_id`'s leaf to the root.
    pub fn proof(&self, user_id: UserId) -> Result<MerkleProof, MerkleError> {
        let &position = self
            .index
            .get(&user_id)
            .ok_or(MerkleError::UnknownUser(user_id))?;
        Ok(self.proof_at(position))
    }

    fn proof_at(&self, mut position: usize) -> MerkleProof {
        let mut steps = Vec::with_capacity(self.levels.len());
        for level in &self.levels[..self.levels.len() - 1] {
            let step = if position % 2 == 1 {
                Some(ProofStep {
                    sibling: level[position - 1],
                    side: Side::Left,
                })
            } else {
                level.get(position + 1).map(|&sibling| ProofStep {
                    sibling,
                    side: Side::Right,
                })
            };
            steps.extend(step);
            position /= 2;
        }
        MerkleProof::new(steps)
    }

    /// One record per entry, in canonical order.
    pub fn proof_records(&self) -> Vec<ProofRecord> {
        self.entries
            .par_iter()
            .enumerate()
            .map(|(position, entry)| ProofRecord {
                entry: *entry,
                leaf: LeafHash::new(*self.levels[0][position].as_bytes()),
                proof: self.proof_at(position),
            })
            .collect()
    }
}
