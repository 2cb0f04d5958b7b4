//! Fixed-supply token ledger with balance-weighted vote delegation.
//!
//! This is the host-ledger collaborator the distributor pays out through:
//! - balances and transfers of a supply minted once at genesis
//! - per-account delegation, where unset is distinct from self-delegation
//! - per-delegate vote weight with sequence-tagged checkpoints
//! - a single registered distributor that may set delegates on behalf of
//!   claimants while paying them out

pub mod error;
pub mod ledger;
pub mod payout;
pub mod weights;

pub use error::TokenError;
pub use ledger::TokenLedger;
pub use payout::PayoutLedger;
pub use weights::{Checkpoint, VoteWeights};
