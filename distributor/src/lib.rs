//! Claim verification for the claimdrop token distributor.
//!
//! A [`Distributor`] holds an immutable Merkle root and signer identity and
//! the set of user ids that have already claimed. [`Distributor::claim`]
//! checks a [`ClaimAuthorization`](claimdrop_types::ClaimAuthorization) in a
//! fixed order and, if every check passes, pays the claimant through a
//! [`PayoutLedger`](claimdrop_token::PayoutLedger) and records the claim.
//!
//! Check order, first failure wins:
//!
//! 1. caller is the claimant address
//! 2. message hash matches the payload
//! 3. signature verifies against the signer
//! 4. leaf matches `(user_id, address, amount)`
//! 5. Merkle proof verifies against the root
//! 6. user id has not claimed

pub mod distributor;
pub mod error;
pub mod event;

pub use distributor::{ClaimState, Distributor, DistributorConfig};
pub use error::{ClaimError, DistributorError, SweepError};
pub use event::DistributorEvent;
