//! The claim state machine.

use std::collections::BTreeSet;

use claimdrop_crypto::{hash_claim_message, hash_leaf, verify_claim_signature};
use claimdrop_merkle::verify;
use claimdrop_token::PayoutLedger;
use claimdrop_types::{
    Address, ClaimAuthorization, MerkleRoot, PublicKey, Timestamp, TokenAmount, UserId,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ClaimError, DistributorError, SweepError};
use crate::event::DistributorEvent;

/// Construction parameters. None of these can change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorConfig {
    /// The distributor's own account; the pool claims are paid from.
    pub account: Address,
    pub merkle_root: MerkleRoot,
    /// Public key of the authorization service.
    pub signer: PublicKey,
    /// Receives unclaimed tokens after `claim_deadline`.
    pub treasury: Address,
    pub claim_deadline: Timestamp,
}

impl DistributorConfig {
    fn check(&self) -> Result<(), DistributorError> {
        if self.merkle_root.is_zero() {
            return Err(DistributorError::ZeroRoot);
        }
        if self.account.is_zero() {
            return Err(DistributorError::ZeroAddress("distributor"));
        }
        if self.treasury.is_zero() {
            return Err(DistributorError::ZeroAddress("treasury"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimState {
    Unclaimed,
    Claimed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Distributor {
    config: DistributorConfig,
    claimed: BTreeSet<UserId>,
    total_claimed: TokenAmount,
    #[serde(skip)]
    events: Vec<DistributorEvent>,
}

impl Distributor {
    pub fn new(config: DistributorConfig) -> Result<Self, DistributorError> {
        config.check()?;
        info!(
            account = %config.account,
            root = %config.merkle_root,
            signer = %config.signer,
            "distributor created"
        );
        Ok(Self {
            config,
            claimed: BTreeSet::new(),
            total_claimed: TokenAmount::ZERO,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &DistributorConfig {
        &self.config
    }

    pub fn account(&self) -> Address {
        self.config.account
    }

    pub fn merkle_root(&self) -> MerkleRoot {
        self.config.merkle_root
    }

    pub fn signer(&self) -> PublicKey {
        self.config.signer
    }

    pub fn claim_state(&self, user_id: UserId) -> ClaimState {
        if self.claimed.contains(&user_id) {
            ClaimState::Claimed
        } else {
            ClaimState::Unclaimed
        }
    }

    pub fn is_claimed(&self, user_id: UserId) -> bool {
        self.claimed.contains(&user_id)
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }

    pub fn total_claimed(&self) -> TokenAmount {
        self.total_claimed
    }

    /// Events recorded since construction or the last [`drain_events`].
    ///
    /// [`drain_events`]: Distributor::drain_events
    pub fn events(&self) -> &[DistributorEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<DistributorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run every claim check without touching state.
    pub fn check_claim(
        &self,
        caller: &Address,
        auth: &ClaimAuthorization,
    ) -> Result<(), ClaimError> {
        if *caller != auth.user_address {
            return Err(ClaimError::SenderMismatch);
        }
        if hash_claim_message(&auth.request()) != auth.message_hash {
            return Err(ClaimError::HashMismatch);
        }
        if !verify_claim_signature(&auth.message_hash, &auth.signature, &self.config.signer) {
            return Err(ClaimError::SignatureInvalid);
        }
        if hash_leaf(&auth.entry()) != auth.leaf {
            return Err(ClaimError::LeafHashMismatch);
        }
        if !verify(&auth.leaf, &auth.proof, &self.config.merkle_root) {
            return Err(ClaimError::ProofInvalid);
        }
        if self.is_claimed(auth.user_id) {
            return Err(ClaimError::AlreadyClaimed(auth.user_id));
        }
        Ok(())
    }

    /// Verify and settle one claim.
    ///
    /// On success the claimant is paid `auth.amount` from the pool, gets
    /// `auth.delegate_address` as delegate if they had none, and the user id
    /// is marked claimed. On any error nothing changes.
    pub fn claim<L: PayoutLedger>(
        &mut self,
        caller: &Address,
        auth: &ClaimAuthorization,
        ledger: &mut L,
    ) -> Result<(), ClaimError> {
        if let Err(e) = self.check_claim(caller, auth) {
            warn!(
                user_id = auth.user_id,
                %caller,
                reason = e.reason(),
                "claim rejected"
            );
            return Err(e);
        }

        if let Err(e) = ledger.payout(
            &self.config.account,
            &auth.user_address,
            auth.amount,
            &auth.delegate_address,
        ) {
            warn!(user_id = auth.user_id, error = %e, "claim payout failed");
            return Err(e.into());
        }

        self.claimed.insert(auth.user_id);
        self.total_claimed = self.total_claimed.saturating_add(auth.amount);
        self.events.push(DistributorEvent::Claimed {
            user_id: auth.user_id,
            account: auth.user_address,
            delegate: auth.delegate_address,
            amount: auth.amount,
        });
        info!(
            user_id = auth.user_id,
            account = %auth.user_address,
            amount = %auth.amount,
            "claim accepted"
        );
        Ok(())
    }

    /// Move whatever is left in the pool to the treasury. Only allowed once
    /// `now` is past the claim deadline. Claims keep being verified
    /// afterwards but fail at payout once the pool is empty.
    pub fn sweep<L: PayoutLedger>(
        &mut self,
        now: Timestamp,
        ledger: &mut L,
    ) -> Result<TokenAmount, SweepError> {
        if now <= self.config.claim_deadline {
            return Err(SweepError::ClaimWindowOpen {
                deadline: self.config.claim_deadline,
            });
        }
        let remaining = ledger.balance_of(&self.config.account);
        if remaining.is_zero() {
            return Err(SweepError::NothingToSweep);
        }
        ledger.release(&self.config.account, &self.config.treasury, remaining)?;
        self.events.push(DistributorEvent::Swept {
            treasury: self.config.treasury,
            amount: remaining,
        });
        info!(treasury = %self.config.treasury, amount = %remaining, "unclaimed tokens swept");
        Ok(remaining)
    }

    /// Persist configuration and claimed set. Pending events are not saved.
    pub fn save_state(&self) -> Result<Vec<u8>, DistributorError> {
        bincode::serialize(self).map_err(|e| DistributorError::Snapshot(e.to_string()))
    }

    /// Restore a snapshot. The configuration is held to the same rules as
    /// [`Distributor::new`].
    pub fn load_state(data: &[u8]) -> Result<Self, DistributorError> {
        let restored: Self = bincode::deserialize(data)
            .map_err(|e| DistributorError::Snapshot(e.to_string()))?;
        restored.config.check()?;
        Ok(restored)
    }
}
