use claimdrop_types::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MerkleError {
    #[error("distribution list is empty")]
    EmptyDistribution,

    #[error("user id {0} appears more than once")]
    DuplicateUserId(UserId),

    #[error("user id {0} has the zero address")]
    ZeroAddress(UserId),

    #[error("user id {0} is not in the distribution")]
    UnknownUser(UserId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed distribution file: {0}")]
    Json(#[from] serde_json::Error),
}
