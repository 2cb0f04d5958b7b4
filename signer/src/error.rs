use claimdrop_merkle::MerkleError;
use claimdrop_types::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("user id {0} is not in the distribution")]
    UnknownUser(UserId),

    #[error("address does not match the entry for user id {0}")]
    AddressMismatch(UserId),

    #[error("user id {user_id} is entitled to {entitled}, not {requested}")]
    AmountMismatch {
        user_id: UserId,
        requested: u128,
        entitled: u128,
    },

    #[error("request authentication tag is invalid")]
    BadRequestMac,

    #[error("no request authentication key is configured")]
    RequestKeyMissing,

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Merkle(#[from] MerkleError),
}
