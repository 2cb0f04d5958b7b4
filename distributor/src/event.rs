//! Events recorded by the distributor for indexers and auditors.

use claimdrop_types::{Address, TokenAmount, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributorEvent {
    /// A claim was accepted and paid.
    Claimed {
        user_id: UserId,
        account: Address,
        delegate: Address,
        amount: TokenAmount,
    },
    /// Unclaimed tokens were moved to the treasury after the deadline.
    Swept { treasury: Address, amount: TokenAmount },
}
