//! Claim data shared by the tree builder, the authorization service and the
//! verifier.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::TokenAmount;
use crate::hash::{LeafHash, MessageHash, NodeHash};
use crate::keys::Signature;

/// Identifier of one row of the distribution list.
pub type UserId = u64;

/// One row of the static eligibility list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub user_id: UserId,
    pub address: Address,
    pub amount: TokenAmount,
}

/// The payload a claimant asks the authorization service to sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub user_id: UserId,
    pub user_address: Address,
    pub delegate_address: Address,
    pub amount: TokenAmount,
}

/// Which operand of the parent hash the sibling is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One level of a membership proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: NodeHash,
    pub side: Side,
}

/// Ordered sibling hashes from a leaf up to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    steps: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A signed claim bundle produced by the authorization service.
///
/// Submitted as-is to the distributor, which re-derives `message_hash` and
/// `leaf` from the payload fields rather than trusting them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAuthorization {
    pub user_id: UserId,
    pub user_address: Address,
    pub delegate_address: Address,
    pub amount: TokenAmount,
    pub message_hash: MessageHash,
    pub signature: Signature,
    pub leaf: LeafHash,
    pub proof: MerkleProof,
}

impl ClaimAuthorization {
    /// The payload fields as a request.
    pub fn request(&self) -> ClaimRequest {
        ClaimRequest {
            user_id: self.user_id,
            user_address: self.user_address,
            delegate_address: self.delegate_address,
            amount: self.amount,
        }
    }

    /// The entry this bundle claims to be a member of the tree.
    pub fn entry(&self) -> DistributionEntry {
        DistributionEntry {
            user_id: self.user_id,
            address: self.user_address,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::NodeHash;

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
    }

    #[test]
    fn proof_is_a_plain_json_array() {
        let proof = MerkleProof::new(vec![ProofStep {
            sibling: NodeHash::new([0; 32]),
            side: Side::Right,
        }]);
        let json = serde_json::to_value(&proof).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["side"], "right");
    }

    #[test]
    fn entry_from_authorization_drops_delegate() {
        let auth = ClaimAuthorization {
            user_id: 9,
            user_address: Address::new([1; 32]),
            delegate_address: Address::new([2; 32]),
            amount: TokenAmount::new(40),
            message_hash: MessageHash::ZERO,
            signature: Signature([0; 64]),
            leaf: LeafHash::ZERO,
            proof: MerkleProof::default(),
        };
        let entry = auth.entry();
        assert_eq!(entry.user_id, 9);
        assert_eq!(entry.address, Address::new([1; 32]));
        assert_eq!(entry.amount, TokenAmount::new(40));
    }
}
