//! Balances, transfers and delegation.

use std::collections::HashMap;

use claimdrop_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TokenError;
use crate::weights::VoteWeights;

/// The token ledger.
///
/// Every mutating call advances `sequence` by one before applying its
/// effects; vote checkpoints are tagged with that number. A call that fails
/// leaves the ledger untouched, including the sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    balances: HashMap<Address, TokenAmount>,
    delegates: HashMap<Address, Address>,
    weights: VoteWeights,
    total_supply: TokenAmount,
    admin: Address,
    distributor: Option<Address>,
    sequence: u64,
}

impl TokenLedger {
    /// Mint the whole supply to `genesis_holder`, who also becomes admin.
    pub fn new(genesis_holder: Address, total_supply: TokenAmount) -> Result<Self, TokenError> {
        if genesis_holder.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let mut balances = HashMap::new();
        if !total_supply.is_zero() {
            balances.insert(genesis_holder, total_supply);
        }
        info!(holder = %genesis_holder, supply = %total_supply, "token minted");
        Ok(Self {
            balances,
            delegates: HashMap::new(),
            weights: VoteWeights::new(),
            total_supply,
            admin: genesis_holder,
            distributor: None,
            sequence: 0,
        })
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn distributor(&self) -> Option<Address> {
        self.distributor
    }

    /// Number of mutating operations applied so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Current delegate of `account`, `None` when unset.
    pub fn delegates(&self, account: &Address) -> Option<Address> {
        self.delegates.get(account).copied()
    }

    pub fn current_votes(&self, delegate: &Address) -> TokenAmount {
        self.weights.weight(delegate)
    }

    /// Votes of `delegate` as of the end of operation `sequence`.
    pub fn prior_votes(&self, delegate: &Address, sequence: u64) -> Result<TokenAmount, TokenError> {
        if sequence > self.sequence {
            return Err(TokenError::FutureSequence {
                requested: sequence,
                current: self.sequence,
            });
        }
        Ok(self.weights.weight_at(delegate, sequence))
    }

    pub fn vote_weights(&self) -> &VoteWeights {
        &self.weights
    }

    /// Total balance held by accounts that have a delegate set.
    pub fn delegated_supply(&self) -> TokenAmount {
        self.delegates
            .keys()
            .map(|account| self.balance_of(account))
            .sum()
    }

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        self.check_transfer(from, to, amount)?;
        self.sequence += 1;
        self.apply_transfer(from, to, amount);
        Ok(())
    }

    /// Point `from`'s votes at `to`. Delegating to the zero address clears
    /// the delegation.
    pub fn delegate(&mut self, from: &Address, to: &Address) -> Result<(), TokenError> {
        if from.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.sequence += 1;
        self.apply_delegate(from, to);
        Ok(())
    }

    /// Register the one account allowed to call [`delegate_on_behalf`].
    /// Only the admin may do this, and only once.
    ///
    /// [`delegate_on_behalf`]: TokenLedger::delegate_on_behalf
    pub fn set_distributor(&mut self, caller: &Address, distributor: &Address) -> Result<(), TokenError> {
        if *caller != self.admin {
            return Err(TokenError::Unauthorized(*caller));
        }
        if distributor.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if self.distributor.is_some() {
            return Err(TokenError::DistributorAlreadySet);
        }
        self.sequence += 1;
        self.distributor = Some(*distributor);
        info!(%distributor, "distributor registered on token");
        Ok(())
    }

    /// Set `delegator`'s delegate on their behalf. Caller must be the
    /// registered distributor.
    pub fn delegate_on_behalf(
        &mut self,
        caller: &Address,
        delegator: &Address,
        delegatee: &Address,
    ) -> Result<(), TokenError> {
        self.check_distributor(caller)?;
        if delegator.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.sequence += 1;
        self.apply_delegate(delegator, delegatee);
        Ok(())
    }

    pub(crate) fn check_distributor(&self, caller: &Address) -> Result<(), TokenError> {
        match self.distributor {
            Some(d) if d == *caller => Ok(()),
            _ => Err(TokenError::Unauthorized(*caller)),
        }
    }

    pub(crate) fn check_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if from.is_zero() || to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            });
        }
        Ok(())
    }

    pub(crate) fn next_sequence(&mut self) {
        self.sequence += 1;
    }

    /// Caller has run `check_transfer`.
    pub(crate) fn apply_transfer(&mut self, from: &Address, to: &Address, amount: TokenAmount) {
        if from == to || amount.is_zero() {
            return;
        }
        let from_balance = self.balance_of(from).saturating_sub(amount);
        if from_balance.is_zero() {
            self.balances.remove(from);
        } else {
            self.balances.insert(*from, from_balance);
        }
        let to_balance = self.balance_of(to).saturating_add(amount);
        self.balances.insert(*to, to_balance);

        let src = self.delegates(from);
        let dst = self.delegates(to);
        self.weights
            .move_weight(src.as_ref(), dst.as_ref(), amount, self.sequence);
        debug!(%from, %to, %amount, seq = self.sequence, "transfer");
    }

    pub(crate) fn apply_delegate(&mut self, from: &Address, to: &Address) {
        let old = self.delegates(from);
        let new = (!to.is_zero()).then_some(*to);
        match new {
            Some(to) => self.delegates.insert(*from, to),
            None => self.delegates.remove(from),
        };
        let balance = self.balance_of(from);
        self.weights
            .move_weight(old.as_ref(), new.as_ref(), balance, self.sequence);
        debug!(%from, ?old, ?new, seq = self.sequence, "delegate changed");
    }

    pub fn save_state(&self) -> Result<Vec<u8>, TokenError> {
        bincode::serialize(self).map_err(|e| TokenError::Snapshot(e.to_string()))
    }

    pub fn load_state(data: &[u8]) -> Result<Self, TokenError> {
        bincode::deserialize(data).map_err(|e| TokenError::Snapshot(e.to_string()))
    }
}
