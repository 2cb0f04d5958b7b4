use claimdrop_types::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("the zero address cannot hold or send tokens")]
    ZeroAddress,

    #[error("{0} is not authorized for this operation")]
    Unauthorized(Address),

    #[error("distributor is already registered")]
    DistributorAlreadySet,

    #[error("sequence {requested} has not happened yet (current {current})")]
    FutureSequence { requested: u64, current: u64 },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
