use claimdrop_token::TokenError;
use claimdrop_types::{Timestamp, UserId};
use thiserror::Error;

/// Why a claim was rejected. A rejected claim changes no state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("caller is not the claimant address")]
    SenderMismatch,

    #[error("message hash does not match the claim payload")]
    HashMismatch,

    #[error("signature does not verify against the authorized signer")]
    SignatureInvalid,

    #[error("leaf hash does not match the claim entry")]
    LeafHashMismatch,

    #[error("merkle proof does not verify against the root")]
    ProofInvalid,

    #[error("user id {0} has already claimed")]
    AlreadyClaimed(UserId),

    #[error("payout failed: {0}")]
    Payout(#[from] TokenError),
}

impl ClaimError {
    /// Stable short name, used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::SenderMismatch => "sender_mismatch",
            Self::HashMismatch => "hash_mismatch",
            Self::SignatureInvalid => "signature_invalid",
            Self::LeafHashMismatch => "leaf_hash_mismatch",
            Self::ProofInvalid => "proof_invalid",
            Self::AlreadyClaimed(_) => "already_claimed",
            Self::Payout(_) => "payout_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("claim window is open until {deadline}")]
    ClaimWindowOpen { deadline: Timestamp },

    #[error("nothing left to sweep")]
    NothingToSweep,

    #[error("transfer to treasury failed: {0}")]
    Transfer(#[from] TokenError),
}

#[derive(Debug, Error)]
pub enum DistributorError {
    #[error("merkle root must not be zero")]
    ZeroRoot,

    #[error("{0} address must not be zero")]
    ZeroAddress(&'static str),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
