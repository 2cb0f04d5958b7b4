//! Per-delegate vote weight, maintained incrementally as balances and
//! delegations change.
//!
//! A delegate's weight is the sum of the balances of every account that
//! delegates to it. Each change is also recorded as a [`Checkpoint`] tagged
//! with the ledger sequence number, so historical weight can be read back.

use std::collections::HashMap;

use claimdrop_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// Weight of a delegate as of the end of ledger operation `sequence`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub sequence: u64,
    pub votes: TokenAmount,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteWeights {
    /// delegate → current weight. Zero-weight delegates are dropped.
    weights: HashMap<Address, TokenAmount>,
    /// delegate → checkpoints in ascending sequence order.
    checkpoints: HashMap<Address, Vec<Checkpoint>>,
    total_weight: TokenAmount,
}

impl VoteWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_weight(&mut self, delegate: &Address, amount: TokenAmount, sequence: u64) {
        if amount.is_zero() {
            return;
        }
        let entry = self.weights.entry(*delegate).or_insert(TokenAmount::ZERO);
        *entry = entry.saturating_add(amount);
        let votes = *entry;
        self.total_weight = self.total_weight.saturating_add(amount);
        self.write_checkpoint(delegate, sequence, votes);
    }

    /// Remove up to `amount` of weight; never drives a delegate below zero.
    pub fn remove_weight(&mut self, delegate: &Address, amount: TokenAmount, sequence: u64) {
        let Some(entry) = self.weights.get_mut(delegate) else {
            return;
        };
        let removed = amount.min(*entry);
        if removed.is_zero() {
            return;
        }
        *entry = entry.saturating_sub(removed);
        let votes = *entry;
        if votes.is_zero() {
            self.weights.remove(delegate);
        }
        self.total_weight = self.total_weight.saturating_sub(removed);
        self.write_checkpoint(delegate, sequence, votes);
    }

    /// Move weight between two optional delegates. An unset side is skipped.
    pub fn move_weight(
        &mut self,
        from: Option<&Address>,
        to: Option<&Address>,
        amount: TokenAmount,
        sequence: u64,
    ) {
        if from == to || amount.is_zero() {
            return;
        }
        if let Some(from) = from {
            self.remove_weight(from, amount, sequence);
        }
        if let Some(to) = to {
            self.add_weight(to, amount, sequence);
        }
    }

    pub fn weight(&self, delegate: &Address) -> TokenAmount {
        self.weights
            .get(delegate)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Weight of `delegate` as of the end of operation `sequence`.
    pub fn weight_at(&self, delegate: &Address, sequence: u64) -> TokenAmount {
        let Some(points) = self.checkpoints.get(delegate) else {
            return TokenAmount::ZERO;
        };
        match points.partition_point(|c| c.sequence <= sequence) {
            0 => TokenAmount::ZERO,
            n => points[n - 1].votes,
        }
    }

    pub fn checkpoints(&self, delegate: &Address) -> &[Checkpoint] {
        self.checkpoints
            .get(delegate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_weight(&self) -> TokenAmount {
        self.total_weight
    }

    pub fn delegate_count(&self) -> usize {
        self.weights.len()
    }

    fn write_checkpoint(&mut self, delegate: &Address, sequence: u64, votes: TokenAmount) {
        let points = self.checkpoints.entry(*delegate).or_default();
        match points.last_mut() {
            Some(last) if last.sequence == sequence => last.votes = votes,
            _ => points.push(Checkpoint { sequence, votes }),
        }
    }
}
